//! Concurrent batch generation: N producer threads feeding one consumer
//! through a bounded channel.
//!
//! Producers share exactly one piece of control state, the stop flag. The
//! running size estimate and the accumulated map are owned by the consumer
//! alone, so no locking is needed on either.
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result, anyhow, ensure};
use crossbeam_channel::bounded;

use crate::account::{self, AccountAlloc, AccountBatch};

/// Worker pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of producer threads.
    pub producers: usize,
    /// Accounts generated per batch.
    pub batch_size: usize,
    /// Emit a progress line every this many merged batches.
    pub log_every: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            producers: 4,
            batch_size: 10_000,
            log_every: 100,
        }
    }
}

impl PoolConfig {
    /// Reject configurations that would stall or divide by zero before any
    /// thread is spawned.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.producers > 0, "producer count must be non-zero");
        ensure!(self.batch_size > 0, "batch size must be non-zero");
        ensure!(self.log_every > 0, "log frequency must be non-zero");
        Ok(())
    }
}

/// What the generation run produced.
#[derive(Debug)]
pub struct Outcome {
    /// Generated accounts, merged across all batches in dequeue order.
    pub alloc: AccountAlloc,
    /// Final estimated document size in bytes.
    pub estimated_bytes: f64,
    /// Number of batches merged.
    pub batches: u64,
}

impl Outcome {
    /// Total accounts generated, counting collision overwrites.
    pub fn accounts_generated(&self, batch_size: usize) -> u64 {
        self.batches * batch_size as u64
    }
}

/// Generate batches concurrently until the estimated document size reaches
/// `target_bytes`, writing periodic progress lines to `progress`.
///
/// The consumer runs on the calling thread. Once the estimate crosses the
/// target it raises the stop flag, drains every batch the producers already
/// committed (each may have at most one in flight), and joins all producer
/// threads before returning. Returns an empty outcome without spawning
/// anything if `start_bytes` already meets the target.
pub fn fill_to_target<W: Write>(
    cfg: &PoolConfig,
    start_bytes: f64,
    target_bytes: f64,
    average_account_bytes: f64,
    progress: &mut W,
) -> Result<Outcome> {
    cfg.validate()?;
    ensure!(
        average_account_bytes > 0.0,
        "average account size must be positive"
    );

    if start_bytes >= target_bytes {
        return Ok(Outcome {
            alloc: AccountAlloc::new(),
            estimated_bytes: start_bytes,
            batches: 0,
        });
    }

    let stop = Arc::new(AtomicBool::new(false));
    let (batch_tx, batch_rx) = bounded::<AccountBatch>(cfg.producers);

    let mut producers = Vec::with_capacity(cfg.producers);
    for id in 0..cfg.producers {
        let tx = batch_tx.clone();
        let stop = Arc::clone(&stop);
        let batch_size = cfg.batch_size;
        let handle = thread::Builder::new()
            .name(format!("producer-{id}"))
            .spawn(move || {
                let mut rng = rand::thread_rng();
                while !stop.load(Ordering::Relaxed) {
                    let batch = account::random_batch(&mut rng, batch_size);
                    // The consumer drains until every sender is gone, so a
                    // failed send only means the consumer is gone entirely.
                    if tx.send(batch).is_err() {
                        break;
                    }
                }
            })
            .with_context(|| format!("failed to spawn producer {id}"))?;
        producers.push(handle);
    }
    // Drop the original sender so the receive loop ends once the last
    // producer exits.
    drop(batch_tx);

    let batch_cost = average_account_bytes * cfg.batch_size as f64;
    let mut alloc = AccountAlloc::new();
    let mut estimated = start_bytes;
    let mut batches = 0u64;

    for batch in batch_rx.iter() {
        // Later batches win on address collision.
        alloc.extend(batch);
        estimated += batch_cost;
        batches += 1;
        if batches % cfg.log_every == 0 {
            writeln!(
                progress,
                "Current estimated size: {:.2} MB",
                crate::to_mib(estimated)
            )?;
        }
        if estimated >= target_bytes {
            stop.store(true, Ordering::Relaxed);
        }
    }

    // No producer outlives the run.
    for handle in producers {
        handle
            .join()
            .map_err(|_| anyhow!("a producer thread panicked"))?;
    }

    Ok(Outcome {
        alloc,
        estimated_bytes: estimated,
        batches,
    })
}
