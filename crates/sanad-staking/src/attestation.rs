// crates/sanad-staking/src/attestation.rs
//
// Attestation record, lock-duration multipliers, and trust tiers.
//
// Trust-score multipliers by lock length (basis points):
//   7 days  -> 10000 (1.0x)
//   30 days -> 15000 (1.5x)
//   90 days -> 20000 (2.0x)
//
// Durations between the canonical entries map to the nearest bracket
// BELOW: [7d, 30d) -> 1.0x, [30d, 90d) -> 1.5x, exactly 90d -> 2.0x.
// The three canonical durations therefore hit their exact entries.
//
// This table is distinct from the reward pool's multiplier table; the two
// must not be conflated.

use serde::{Deserialize, Serialize};
use std::fmt;

use sanad_core::{AccountId, AttestationId, ResourceHash};
use sanad_ledger::{Habba, HABBA_PER_SND};

/// Minimum attestation lock: 7 days.
pub const MIN_LOCK_SECS: u64 = 7 * 24 * 3600;

/// Maximum attestation lock: 90 days.
pub const MAX_LOCK_SECS: u64 = 90 * 24 * 3600;

const THIRTY_DAYS_SECS: u64 = 30 * 24 * 3600;

/// Trust score at or above which a resource is COMMUNITY (in habba).
pub const COMMUNITY_THRESHOLD: Habba = 100 * HABBA_PER_SND;

/// Trust score at or above which a resource is VERIFIED (in habba).
pub const VERIFIED_THRESHOLD: Habba = 1_000 * HABBA_PER_SND;

/// Trust score at or above which a resource is TRUSTED (in habba).
pub const TRUSTED_THRESHOLD: Habba = 10_000 * HABBA_PER_SND;

/// Trust-score multiplier for a lock duration, in basis points.
///
/// Nearest-below bracket matching over the canonical 7d/30d/90d entries.
/// Callers validate the [7d, 90d] range before asking for a multiplier.
pub fn trust_multiplier_bps(lock_secs: u64) -> u32 {
    if lock_secs >= MAX_LOCK_SECS {
        20_000
    } else if lock_secs >= THIRTY_DAYS_SECS {
        15_000
    } else {
        10_000
    }
}

/// One auditor's locked stake vouching for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    /// Hash-derived identifier, unique per (auditor, resource, nonce).
    pub id: AttestationId,
    /// Owning auditor. Only the auditor may unstake.
    pub auditor: AccountId,
    /// The resource this stake vouches for.
    pub resource_hash: ResourceHash,
    /// Staked principal in habba. Zeroed by slash and by withdrawal.
    pub amount: Habba,
    /// Lock duration in seconds, within [MIN_LOCK_SECS, MAX_LOCK_SECS].
    pub lock_secs: u64,
    /// Timestamp (unix seconds) after which the principal may be
    /// withdrawn.
    pub lock_until: u64,
    /// Creation timestamp.
    pub created_at: u64,
    /// One-way flag set by a guilty-verdict slash. Never cleared.
    pub slashed: bool,
    /// One-way flag set by withdrawal. Never cleared.
    pub withdrawn: bool,
}

impl Attestation {
    /// Whether this attestation still contributes to aggregates.
    pub fn is_live(&self) -> bool {
        !self.slashed && !self.withdrawn
    }

    /// Trust-score contribution in habba: amount x lock multiplier.
    pub fn score(&self) -> Habba {
        if !self.is_live() {
            return 0;
        }
        self.amount * trust_multiplier_bps(self.lock_secs) as Habba / 10_000
    }
}

/// Named trust bucket derived from a resource's trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrustTier {
    /// Score below 100 SND.
    Unverified,
    /// Score in [100, 1000) SND.
    Community,
    /// Score in [1000, 10000) SND.
    Verified,
    /// Score at or above 10000 SND.
    Trusted,
}

impl TrustTier {
    /// Bucket a trust score (in habba) into a tier. Thresholds apply to
    /// the post-multiplier score, not raw stake.
    pub fn from_score(score: Habba) -> Self {
        if score >= TRUSTED_THRESHOLD {
            TrustTier::Trusted
        } else if score >= VERIFIED_THRESHOLD {
            TrustTier::Verified
        } else if score >= COMMUNITY_THRESHOLD {
            TrustTier::Community
        } else {
            TrustTier::Unverified
        }
    }
}

impl fmt::Display for TrustTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustTier::Unverified => write!(f, "UNVERIFIED"),
            TrustTier::Community => write!(f, "COMMUNITY"),
            TrustTier::Verified => write!(f, "VERIFIED"),
            TrustTier::Trusted => write!(f, "TRUSTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_multipliers() {
        assert_eq!(trust_multiplier_bps(MIN_LOCK_SECS), 10_000);
        assert_eq!(trust_multiplier_bps(THIRTY_DAYS_SECS), 15_000);
        assert_eq!(trust_multiplier_bps(MAX_LOCK_SECS), 20_000);
    }

    #[test]
    fn test_nearest_below_bracketing() {
        // One second short of 30 days stays in the 1.0x bracket.
        assert_eq!(trust_multiplier_bps(THIRTY_DAYS_SECS - 1), 10_000);
        // One second short of 90 days stays in the 1.5x bracket.
        assert_eq!(trust_multiplier_bps(MAX_LOCK_SECS - 1), 15_000);
        // 45 days maps below to the 30-day entry.
        assert_eq!(trust_multiplier_bps(45 * 24 * 3600), 15_000);
    }

    #[test]
    fn test_score_applies_multiplier() {
        let mut attestation = Attestation {
            id: [0u8; 32],
            auditor: [1u8; 32],
            resource_hash: [2u8; 32],
            amount: 1_000 * HABBA_PER_SND,
            lock_secs: MAX_LOCK_SECS,
            lock_until: MAX_LOCK_SECS,
            created_at: 0,
            slashed: false,
            withdrawn: false,
        };
        assert_eq!(attestation.score(), 2_000 * HABBA_PER_SND);

        attestation.slashed = true;
        assert_eq!(attestation.score(), 0);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(TrustTier::from_score(0), TrustTier::Unverified);
        assert_eq!(
            TrustTier::from_score(COMMUNITY_THRESHOLD - 1),
            TrustTier::Unverified
        );
        assert_eq!(
            TrustTier::from_score(COMMUNITY_THRESHOLD),
            TrustTier::Community
        );
        assert_eq!(
            TrustTier::from_score(VERIFIED_THRESHOLD),
            TrustTier::Verified
        );
        assert_eq!(
            TrustTier::from_score(TRUSTED_THRESHOLD - 1),
            TrustTier::Verified
        );
        assert_eq!(TrustTier::from_score(TRUSTED_THRESHOLD), TrustTier::Trusted);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(TrustTier::Unverified < TrustTier::Community);
        assert!(TrustTier::Community < TrustTier::Verified);
        assert!(TrustTier::Verified < TrustTier::Trusted);
    }
}
