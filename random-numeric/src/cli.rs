use std::path::PathBuf;

use clap::Parser;
use numeric_core::{AnalysisConfig, DEFAULT_ROUNDS};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "random-numeric")]
#[command(version, about = "Generate a file of random numbers and analyze it")]
pub struct Cli {
    /// Corpus file to write and then analyze
    pub file: PathBuf,

    /// Target file size in megabytes
    #[arg(short, long, default_value_t = 64)]
    pub size: u64,

    /// Number of most frequent values to report
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Miller-Rabin rounds for values wider than 64 bits
    #[arg(long, default_value_t = DEFAULT_ROUNDS)]
    pub rounds: u32,

    /// Worker threads for the analysis (default: one per core)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: Option<u64>,

    /// Seed for reproducible generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Analyze an existing file without generating a new one
    #[arg(long)]
    pub analyze_only: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Settings consumed by [`crate::pipeline::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub file: PathBuf,
    /// Target corpus size in bytes.
    pub target_bytes: u64,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
    pub analyze_only: bool,
    pub analysis: AnalysisConfig,
}

impl RunConfig {
    /// Defaults for everything except the file.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        RunConfig {
            file: file.into(),
            target_bytes: 64 * BYTES_PER_MB,
            seed: None,
            threads: None,
            analyze_only: false,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl From<&Cli> for RunConfig {
    fn from(cli: &Cli) -> Self {
        RunConfig {
            file: cli.file.clone(),
            target_bytes: cli.size.saturating_mul(BYTES_PER_MB),
            seed: cli.seed,
            threads: cli.threads.map(|t| t as usize),
            analyze_only: cli.analyze_only,
            analysis: AnalysisConfig {
                rounds: cli.rounds,
                top_k: cli.top,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("random-numeric").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["numbers.txt"]).unwrap();
        let config = RunConfig::from(&cli);
        assert_eq!(config, RunConfig::new("numbers.txt"));
        assert_eq!(config.target_bytes, 64 * 1024 * 1024);
        assert_eq!(config.analysis.top_k, 10);
        assert_eq!(config.analysis.rounds, DEFAULT_ROUNDS);
    }

    #[test]
    fn test_size_flag_short_and_long() {
        let short = RunConfig::from(&parse(&["f", "-s", "3"]).unwrap());
        let long = RunConfig::from(&parse(&["f", "--size", "3"]).unwrap());
        assert_eq!(short.target_bytes, 3 * 1024 * 1024);
        assert_eq!(short, long);
    }

    #[test]
    fn test_optional_flags() {
        let cli = parse(&[
            "f", "--top", "5", "--rounds", "40", "--threads", "2", "--seed", "9", "--analyze-only", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        let config = RunConfig::from(&cli);
        assert_eq!(config.analysis, AnalysisConfig { rounds: 40, top_k: 5 });
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.seed, Some(9));
        assert!(config.analyze_only);
    }

    #[test]
    fn test_invalid_arguments_rejected() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["f", "--bogus"]).is_err());
        assert!(parse(&["f", "-s", "lots"]).is_err());
        assert!(parse(&["f", "--threads", "0"]).is_err());
    }
}
