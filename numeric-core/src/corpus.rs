//! Corpus serialization.
//!
//! A serialized corpus is plain text: decimal tokens, each followed by a
//! single space (the last token included). Parsing accepts any whitespace
//! between tokens, so files split across lines decode the same way.

use num_bigint::BigUint;
use num_traits::Num;
use rand::Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::generate::generate_value;
use crate::NumericError;

/// What [`write_corpus`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct WriteSummary {
    /// Number of values written.
    pub values: u64,
    /// Bytes written, separators included.
    pub bytes: u64,
}

/// Stream freshly generated values to `writer` until at least `target_bytes`
/// bytes have been written.
///
/// The output overshoots `target_bytes` by less than one token. A target of
/// zero writes nothing.
pub fn write_corpus<W: Write, R: Rng + ?Sized>(
    writer: &mut W,
    target_bytes: u64,
    rng: &mut R,
) -> Result<WriteSummary, NumericError> {
    let mut summary = WriteSummary::default();
    let mut token = String::with_capacity(24);
    while summary.bytes < target_bytes {
        push_token(&mut token, &generate_value(rng));
        writer.write_all(token.as_bytes())?;
        summary.values += 1;
        summary.bytes += token.len() as u64;
    }
    writer.flush()?;
    log::debug!(
        "wrote {} values ({} bytes, target {})",
        summary.values,
        summary.bytes,
        target_bytes
    );
    Ok(summary)
}

/// Serialize an existing corpus in the same format as [`write_corpus`].
pub fn write_values<W: Write>(writer: &mut W, values: &[BigUint]) -> Result<WriteSummary, NumericError> {
    let mut summary = WriteSummary::default();
    let mut token = String::with_capacity(24);
    for value in values {
        push_token(&mut token, value);
        writer.write_all(token.as_bytes())?;
        summary.values += 1;
        summary.bytes += token.len() as u64;
    }
    writer.flush()?;
    Ok(summary)
}

fn push_token(buf: &mut String, value: &BigUint) {
    use std::fmt::Write as _;
    buf.clear();
    // Writing into a String cannot fail.
    let _ = write!(buf, "{} ", value);
}

/// Decode a serialized corpus, tokens in parallel.
///
/// Any token that is not a run of ASCII decimal digits rejects the whole
/// corpus with [`NumericError::Format`].
pub fn parse_corpus(text: &str) -> Result<Vec<BigUint>, NumericError> {
    text.par_split_whitespace().map(parse_token).collect()
}

/// Read and decode the corpus stored at `path`.
pub fn read_corpus(path: impl AsRef<Path>) -> Result<Vec<BigUint>, NumericError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    let text = String::from_utf8(bytes).map_err(|e| {
        let offset = e.utf8_error().valid_up_to();
        non_utf8_token(e.as_bytes(), offset)
    })?;
    parse_corpus(&text)
}

/// Format error naming the whitespace-delimited token around `offset`.
fn non_utf8_token(bytes: &[u8], offset: usize) -> NumericError {
    let start = bytes[..offset]
        .iter()
        .rposition(|b| b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    let end = bytes[offset..]
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .map_or(bytes.len(), |i| offset + i);
    format_error(&String::from_utf8_lossy(&bytes[start..end]))
}

fn parse_token(token: &str) -> Result<BigUint, NumericError> {
    // from_str_radix alone would also take a leading '+' and '_' separators
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_error(token));
    }
    BigUint::from_str_radix(token, 10).map_err(|_| format_error(token))
}

fn format_error(token: &str) -> NumericError {
    const MAX_SHOWN: usize = 40;
    let shown: String = token.chars().take(MAX_SHOWN).collect();
    NumericError::Format { token: shown }
}
