//! random-numeric CLI.
//!
//!   random-numeric numbers.txt                 64 MB corpus, text report
//!   random-numeric numbers.txt -s 8 --seed 1   8 MB reproducible corpus
//!   random-numeric numbers.txt --analyze-only --json --threads 4
//!
//! Set RUST_LOG=info to follow the phases.

use clap::Parser;

use random_numeric::cli::{Cli, RunConfig};
use random_numeric::{pipeline, report, RunError};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let config = RunConfig::from(&cli);

    if let Err(e) = run(&config, cli.json) {
        log::error!("run failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &RunConfig, json: bool) -> Result<(), RunError> {
    let outcome = pipeline::run(config)?;
    let rendered = if json {
        report::render_json(&outcome)?
    } else {
        report::render_text(&outcome)
    };
    print!("{}", rendered);
    if json {
        println!();
    }
    Ok(())
}
