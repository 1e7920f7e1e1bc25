// crates/sanad-oracle/src/entropy.rs
//
// Randomness source for jury selection.
//
// The source is abstracted behind a trait so a verifiable-random-function
// backend can be substituted without touching any oracle logic.
//
// WARNING: the default ChainEntropy derives its seed from chain-visible
// values (the current timestamp and a call counter). It is NOT
// cryptographically secure: a participant who can influence or predict
// block timestamps can bias jury selection. This is a documented weakness
// of the reference behavior, deliberately not hardened here.

use sha2::{Digest, Sha256};

/// A seed provider for jury selection.
pub trait EntropySource {
    /// Produce a 32-byte seed for one selection at time `now`.
    fn seed(&mut self, now: u64) -> [u8; 32];
}

/// Weak, chain-derived entropy: SHA-256 over the timestamp and a
/// monotonically increasing counter. Predictable by design; see the
/// module warning.
pub struct ChainEntropy {
    counter: u64,
}

impl ChainEntropy {
    pub fn new() -> Self {
        Self { counter: 0 }
    }
}

impl Default for ChainEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for ChainEntropy {
    fn seed(&mut self, now: u64) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"sanad:entropy");
        hasher.update(now.to_le_bytes());
        hasher.update(self.counter.to_le_bytes());
        self.counter += 1;
        hasher.finalize().into()
    }
}

/// Fixed-seed entropy for deterministic tests.
pub struct FixedEntropy(pub [u8; 32]);

impl EntropySource for FixedEntropy {
    fn seed(&mut self, _now: u64) -> [u8; 32] {
        self.0
    }
}
