//! Random big-integer corpora and the statistics computed over them.
//!
//! A corpus is a sequence of non-zero `BigUint` values of at most 64 bits,
//! produced by [`generate::generate_value`] and persisted as space-separated
//! decimal tokens by [`corpus`]. [`analysis::analyze`] fans a corpus out over
//! three statistics in parallel: probable primes, narcissistic numbers, and the
//! most frequent values.

pub mod analysis;
pub mod corpus;
pub mod frequency;
pub mod generate;
pub mod narcissistic;
pub mod primality;

pub use analysis::{analyze, analyze_with_threads, AnalysisConfig, AnalysisResult};
pub use corpus::{parse_corpus, read_corpus, write_corpus, write_values, WriteSummary};
pub use frequency::{rank, FrequencyTable, FrequentValue};
pub use generate::{generate_corpus, generate_value, par_generate_corpus, random_bits, MAX_BITS};
pub use narcissistic::{digit_count, is_narcissistic};
pub use primality::{is_probable_prime, DEFAULT_ROUNDS};

/// Errors raised while building or analyzing a corpus.
#[derive(Debug, thiserror::Error)]
pub enum NumericError {
    #[error("malformed corpus token {token:?}: expected decimal digits")]
    Format { token: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build analysis thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
