// crates/sanad-core/src/types.rs
//
// Identifiers used throughout the Sanad Protocol.
//
// Accounts, resources, attestations, and flags are all addressed by 32-byte
// values. Resources are content-addressed (the hash of the inscribed
// artifact); attestation and flag ids are derived by domain-separated
// SHA-256 over their parent identifiers plus an engine nonce, so ids are
// collision-free within a block and not guessable from the parents alone.

use sha2::{Digest, Sha256};

/// An account identity on the network (ed25519 public key bytes).
pub type AccountId = [u8; 32];

/// Content hash identifying an inscribed resource.
pub type ResourceHash = [u8; 32];

/// Identifier of a single attestation (one auditor's stake on one resource).
pub type AttestationId = [u8; 32];

/// Identifier of a dispute flag.
pub type FlagId = [u8; 32];

/// The all-zero hash. Rejected wherever a real resource hash is required.
pub const ZERO_HASH: [u8; 32] = [0u8; 32];

/// Derive a 32-byte identifier from a domain tag, a set of parent byte
/// strings, and a monotonically increasing nonce.
///
/// The domain tag keeps attestation ids and flag ids in disjoint spaces
/// even when the parent bytes coincide.
pub fn derive_id(domain: &str, parts: &[&[u8]], nonce: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(domain.as_bytes());
    for part in parts {
        hasher.update(part);
    }
    hasher.update(nonce.to_le_bytes());
    hasher.finalize().into()
}

/// Short hex rendering of a 32-byte id for logs and error messages.
///
/// Returns the first 8 hex characters (4 bytes), e.g. "3fa1b2c4".
pub fn short_hex(bytes: &[u8; 32]) -> String {
    hex::encode(&bytes[..4])
}
