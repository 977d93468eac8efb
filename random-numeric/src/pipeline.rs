//! Generate, read back, and analyze a corpus file, timing each phase.

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use numeric_core::{
    analyze, analyze_with_threads, read_corpus, write_corpus, AnalysisResult, NumericError, WriteSummary,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::RunConfig;
use crate::RunError;

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// `None` when an existing file was analyzed.
    pub written: Option<WriteSummary>,
    pub result: AnalysisResult,
    pub read_time: Duration,
    pub analyze_time: Duration,
}

pub fn run(config: &RunConfig) -> Result<RunReport, RunError> {
    let written = if config.analyze_only {
        None
    } else {
        Some(generate_file(config)?)
    };

    log::info!("reading corpus from {}", config.file.display());
    let start = Instant::now();
    let corpus = read_corpus(&config.file).map_err(|source| RunError::Read {
        path: config.file.clone(),
        source,
    })?;
    let read_time = start.elapsed();
    log::info!("read {} values in {:?}", corpus.len(), read_time);

    let start = Instant::now();
    let result = match config.threads {
        Some(threads) => analyze_with_threads(&corpus, &config.analysis, threads)?,
        None => analyze(&corpus, &config.analysis),
    };
    let analyze_time = start.elapsed();
    log::info!(
        "analyzed {} values in {:?}: {} primes, {} narcissistic",
        result.corpus_len,
        analyze_time,
        result.prime_count,
        result.narcissistic_count
    );
    if result.is_short() {
        log::warn!(
            "only {} distinct values, fewer than the {} requested",
            result.top_frequent.len(),
            result.requested_top
        );
    }

    Ok(RunReport {
        written,
        result,
        read_time,
        analyze_time,
    })
}

fn generate_file(config: &RunConfig) -> Result<WriteSummary, RunError> {
    let write_error = |source: NumericError| RunError::Write {
        path: config.file.clone(),
        source,
    };

    log::info!(
        "writing {} bytes of random numbers to {}",
        config.target_bytes,
        config.file.display()
    );
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let file = File::create(&config.file).map_err(|e| write_error(e.into()))?;
    let mut writer = BufWriter::new(file);
    let summary = write_corpus(&mut writer, config.target_bytes, &mut rng).map_err(write_error)?;
    log::info!("wrote {} values ({} bytes)", summary.values, summary.bytes);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_small_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RunConfig::new(dir.path().join("numbers.txt"));
        config.target_bytes = 20_000;
        config.seed = Some(1);

        let report = run(&config).unwrap();
        let written = report.written.unwrap();
        assert!(written.bytes >= 20_000);
        assert_eq!(report.result.corpus_len as u64, written.values);
        assert_eq!(report.result.top_frequent.len(), 10);
    }

    #[test]
    fn test_seeded_runs_agree() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = RunConfig::new(dir.path().join("a.txt"));
        a.target_bytes = 8_000;
        a.seed = Some(77);
        let mut b = a.clone();
        b.file = dir.path().join("b.txt");
        b.threads = Some(2);

        let ra = run(&a).unwrap();
        let rb = run(&b).unwrap();
        assert_eq!(ra.result, rb.result);
        assert_eq!(
            std::fs::read(&a.file).unwrap(),
            std::fs::read(&b.file).unwrap()
        );
    }

    #[test]
    fn test_analyze_only_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RunConfig::new(dir.path().join("missing.txt"));
        config.analyze_only = true;
        assert!(matches!(run(&config), Err(RunError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "1 2 three 4 ").unwrap();
        let mut config = RunConfig::new(&path);
        config.analyze_only = true;
        match run(&config) {
            Err(RunError::Read {
                source: NumericError::Format { token },
                ..
            }) => assert_eq!(token, "three"),
            other => panic!("expected format error, got {:?}", other.map(|r| r.result)),
        }
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RunConfig::new(dir.path().join("no-such-dir").join("f.txt"));
        config.target_bytes = 10;
        assert!(matches!(run(&config), Err(RunError::Write { .. })));
    }
}
