//! Scaling runs for the analysis pipeline.
//!
//! Analyzes generated corpora of increasing size on pools of increasing
//! width, reporting wall time, throughput, and whether every pool width
//! agreed on the result.

use std::time::{Duration, Instant};

use num_bigint::BigUint;
use numeric_core::{analyze_with_threads, par_generate_corpus, AnalysisConfig, AnalysisResult};

const SEED: u64 = 12345;

fn main() {
    println!("================================================================");
    println!("  SCALING: corpus analysis across sizes and pool widths");
    println!("================================================================\n");

    let sizes: Vec<usize> = vec![10_000, 50_000, 250_000, 1_000_000];
    let max_threads = rayon::current_num_threads();
    let widths: Vec<usize> = [1usize, 2, 4, 8, 16]
        .into_iter()
        .filter(|&w| w <= max_threads)
        .collect();
    let config = AnalysisConfig::default();

    println!(
        "  {:>9} {:>7} {:>12} {:>14} {:>8} {:>8}",
        "values", "threads", "time_ms", "values/s", "primes", "narc"
    );
    println!("  {}", "-".repeat(64));

    for &size in &sizes {
        let start = Instant::now();
        let corpus = par_generate_corpus(size, SEED);
        let gen_time = start.elapsed();

        let mut reference: Option<AnalysisResult> = None;
        for &threads in &widths {
            let (result, elapsed) = match timed(&corpus, &config, threads) {
                Some(r) => r,
                None => {
                    println!("  {:>9} {:>7} {:>12}", size, threads, "FAILED");
                    continue;
                }
            };

            println!(
                "  {:>9} {:>7} {:>12} {:>14.0} {:>8} {:>8}",
                size,
                threads,
                elapsed.as_millis(),
                size as f64 / elapsed.as_secs_f64().max(1e-9),
                result.prime_count,
                result.narcissistic_count
            );

            match &reference {
                Some(expected) if *expected != result => {
                    println!("  !! result differs from the 1-thread run");
                }
                Some(_) => {}
                None => reference = Some(result),
            }
        }

        if let Some(r) = &reference {
            let top: Vec<String> = r
                .top_frequent
                .iter()
                .take(3)
                .map(|f| format!("{}x{}", f.value, f.count))
                .collect();
            println!(
                "  {:>9} generated in {} ms, top: {}, share <= 8 bits: {:.3}",
                size,
                gen_time.as_millis(),
                top.join(", "),
                short_share(&corpus)
            );
        }
        println!();
    }
}

fn timed(corpus: &[BigUint], config: &AnalysisConfig, threads: usize) -> Option<(AnalysisResult, Duration)> {
    let start = Instant::now();
    let result = analyze_with_threads(corpus, config, threads).ok()?;
    Some((result, start.elapsed()))
}

/// Fraction of values with at most 8 bits. Bit-length-uniform generation
/// puts this near 7/63; a value-uniform generator would put it near zero.
fn short_share(corpus: &[BigUint]) -> f64 {
    if corpus.is_empty() {
        return 0.0;
    }
    let short = corpus.iter().filter(|v| v.bits() <= 8).count();
    short as f64 / corpus.len() as f64
}
