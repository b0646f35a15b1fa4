//! Random account generation: addresses, balances, and whole batches.
use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hex digits in a generated address, excluding the `0x` prefix.
pub const ADDRESS_HEX_CHARS: usize = 40;

/// Upper bound (inclusive) for generated balances: 10^18.
pub const MAX_BALANCE: u64 = 1_000_000_000_000_000_000;

const HEX_ALPHABET: &[u8; 16] = b"0123456789abcdef";

/// A single allocation entry. The balance is a `0x`-prefixed hex string,
/// matching the on-disk genesis format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub balance: String,
}

/// One producer iteration's worth of accounts, handed off whole through the
/// queue. Ordering is irrelevant; colliding addresses overwrite on merge.
pub type AccountBatch = HashMap<String, AccountRecord>;

/// The accumulated address → record map grown by the consumer.
pub type AccountAlloc = HashMap<String, AccountRecord>;

/// Generate a random `0x`-prefixed 40-hex-char address. Lowercase only.
pub fn random_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut address = String::with_capacity(2 + ADDRESS_HEX_CHARS);
    address.push_str("0x");
    for _ in 0..ADDRESS_HEX_CHARS {
        address.push(HEX_ALPHABET[rng.gen_range(0..HEX_ALPHABET.len())] as char);
    }
    address
}

/// Generate a random balance in `[1, 10^18]`, hex-encoded with `0x` prefix.
pub fn random_balance<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:#x}", rng.gen_range(1..=MAX_BALANCE))
}

/// Generate one batch of `size` random accounts.
///
/// Address collisions inside a batch silently overwrite; the map may hold
/// marginally fewer than `size` entries (statistically negligible given the
/// 160-bit address space).
pub fn random_batch<R: Rng + ?Sized>(rng: &mut R, size: usize) -> AccountBatch {
    let mut batch = AccountBatch::with_capacity(size);
    for _ in 0..size {
        batch.insert(
            random_address(rng),
            AccountRecord {
                balance: random_balance(rng),
            },
        );
    }
    batch
}
