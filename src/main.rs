//! Differential fuzz CLI.
//!
//! Runs the Cryptol MD5 specification against the trusted reference on
//! randomized inputs of lengths `0..MAX_LEN` and reports every mismatch.

use clap::Parser;
use md5_fuzz::{CryptolRunner, DiffHarness, Md5Oracle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "md5-fuzz")]
#[command(about = "Differential fuzzer for a Cryptol MD5 specification", long_about = None)]
#[command(version)]
struct Cli {
    /// Exclusive upper bound on tested input lengths; one input per length
    /// in 0..MAX_LEN is compared.
    max_len: usize,

    /// Seed the input generator for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Exit non-zero when any mismatch was recorded.
    #[arg(long)]
    fail_on_mismatch: bool,

    /// Print the final summary as JSON.
    #[arg(long)]
    json: bool,

    /// Cryptol interpreter executable.
    #[arg(long, default_value = "cryptol")]
    cryptol: PathBuf,

    /// Cryptol module implementing md5.
    #[arg(long, default_value = "md5.cry")]
    module: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let harness = DiffHarness::new(
        Md5Oracle::new(),
        CryptolRunner::with_paths(cli.cryptol, cli.module),
    );

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let summary = match harness.run(&mut rng, cli.max_len) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: failed to serialize summary: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", summary.report());
    }

    if cli.fail_on_mismatch && !summary.all_passed() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
