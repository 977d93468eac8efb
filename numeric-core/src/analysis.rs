//! Corpus analysis: prime count, narcissistic count, and most frequent values.

use num_bigint::BigUint;
use rayon::prelude::*;
use serde::Serialize;

use crate::frequency::{rank, FrequentValue};
use crate::narcissistic::is_narcissistic;
use crate::primality::{is_probable_prime, DEFAULT_ROUNDS};
use crate::NumericError;

/// Parameters of an analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Miller-Rabin rounds for values wider than 64 bits.
    pub rounds: u32,
    /// How many frequent values to rank.
    pub top_k: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            rounds: DEFAULT_ROUNDS,
            top_k: 10,
        }
    }
}

/// Statistics of one corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub corpus_len: usize,
    pub prime_count: u64,
    pub narcissistic_count: u64,
    /// At most `requested_top` entries, count descending then value ascending.
    pub top_frequent: Vec<FrequentValue>,
    pub requested_top: usize,
}

impl AnalysisResult {
    /// True when the corpus had fewer distinct values than were requested.
    pub fn is_short(&self) -> bool {
        self.top_frequent.len() < self.requested_top
    }
}

/// Analyze `corpus` on the current rayon pool.
///
/// Classification and frequency ranking run side by side via `rayon::join`.
/// Classification is a per-element map-reduce into two counters; ranking
/// counts the whole corpus before selecting the top entries.
pub fn analyze(corpus: &[BigUint], config: &AnalysisConfig) -> AnalysisResult {
    let ((prime_count, narcissistic_count), top_frequent) = rayon::join(
        || classify_all(corpus, config.rounds),
        || rank(corpus, config.top_k),
    );

    AnalysisResult {
        corpus_len: corpus.len(),
        prime_count,
        narcissistic_count,
        top_frequent,
        requested_top: config.top_k,
    }
}

/// Analyze `corpus` on a dedicated pool of `threads` workers.
pub fn analyze_with_threads(
    corpus: &[BigUint],
    config: &AnalysisConfig,
    threads: usize,
) -> Result<AnalysisResult, NumericError> {
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    log::debug!("analysis pool with {} threads", pool.current_num_threads());
    Ok(pool.install(|| analyze(corpus, config)))
}

fn classify_all(corpus: &[BigUint], rounds: u32) -> (u64, u64) {
    corpus
        .par_iter()
        .map(|n| {
            (
                is_probable_prime(n, rounds) as u64,
                is_narcissistic(n) as u64,
            )
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1))
}
