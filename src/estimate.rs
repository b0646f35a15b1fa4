//! Per-account serialized-size estimation.
//!
//! Runs once at startup, before any worker is spawned. The resulting average
//! converts the byte budget into an informational account count; the actual
//! stopping condition downstream is size-based.
use anyhow::{Context, Result, ensure};
use rand::Rng;

use crate::account;

/// Default number of accounts sampled for the estimate.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Estimate the serialized byte cost of one account by generating
/// `sample_count` accounts and dividing their compact JSON length.
pub fn average_account_bytes<R: Rng + ?Sized>(rng: &mut R, sample_count: usize) -> Result<f64> {
    ensure!(sample_count > 0, "sample count must be non-zero");
    let sample = account::random_batch(rng, sample_count);
    let serialized =
        serde_json::to_string(&sample).context("failed to serialize sample accounts")?;
    ensure!(
        !serialized.is_empty(),
        "sample accounts serialized to zero bytes"
    );
    Ok(serialized.len() as f64 / sample_count as f64)
}

/// Informational ceiling: how many accounts it takes to grow a document of
/// `current_bytes` to `target_bytes`. Clamped to zero when the document is
/// already large enough.
pub fn accounts_needed(target_bytes: f64, current_bytes: f64, average_account_bytes: f64) -> u64 {
    let remaining = target_bytes - current_bytes;
    if remaining <= 0.0 || average_account_bytes <= 0.0 {
        return 0;
    }
    (remaining / average_account_bytes) as u64
}
