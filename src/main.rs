use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use mimalloc::MiMalloc;

use genfill::genesis::GenesisDocument;
use genfill::pipeline::{self, PoolConfig};
use genfill::{estimate, to_mib};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Inflate a genesis document's `alloc` map with random accounts until the
/// serialized file reaches a target size.
#[derive(Parser)]
#[command(name = "genfill", about = "Generate oversized genesis fixtures", version)]
struct Cli {
    /// Genesis JSON document to use as the base
    input: PathBuf,

    /// Where to write the inflated document
    output: PathBuf,

    /// Target file size in megabytes
    target_mb: f64,

    /// Number of producer threads
    #[arg(long, default_value_t = 4)]
    producers: usize,

    /// Accounts generated per batch
    #[arg(long, default_value_t = 10_000)]
    batch_size: usize,

    /// Emit a progress line every N merged batches
    #[arg(long, default_value_t = 100)]
    log_every: u64,

    /// Number of sample accounts for the size estimate
    #[arg(long, default_value_t = estimate::DEFAULT_SAMPLE_COUNT)]
    sample_count: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    ensure!(
        cli.target_mb.is_finite(),
        "target size must be a finite number of megabytes"
    );
    let cfg = PoolConfig {
        producers: cli.producers,
        batch_size: cli.batch_size,
        log_every: cli.log_every,
    };
    cfg.validate()?;
    let target_bytes = cli.target_mb * 1024.0 * 1024.0;

    let mut doc = GenesisDocument::load(&cli.input)?;
    let start_bytes = doc
        .serialized_len()
        .context("failed to measure the input document")? as f64;

    let mut rng = rand::thread_rng();
    let average = estimate::average_account_bytes(&mut rng, cli.sample_count)?;
    let needed = estimate::accounts_needed(target_bytes, start_bytes, average);
    println!("Average account size: {average:.1} bytes, ~{needed} accounts needed");

    let stdout = io::stdout();
    let outcome = pipeline::fill_to_target(
        &cfg,
        start_bytes,
        target_bytes,
        average,
        &mut stdout.lock(),
    )?;

    if outcome.batches > 0 && outcome.estimated_bytes > target_bytes {
        println!(
            "Stopped at estimated {:.2} MB (target {:.2} MB, overshoot {:.2} MB)",
            to_mib(outcome.estimated_bytes),
            to_mib(target_bytes),
            to_mib(outcome.estimated_bytes - target_bytes)
        );
    }

    doc.merge_alloc(outcome.alloc)?;
    let actual_size = doc.write_atomic(&cli.output)?;
    println!(
        "Generated {} with actual size {:.2} MB",
        cli.output.display(),
        to_mib(actual_size as f64)
    );

    Ok(())
}
