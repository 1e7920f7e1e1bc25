// crates/sanad-staking/src/lib.rs
//
// sanad-staking: the staking engine for the Sanad Protocol.
//
// Auditors lock $SND against a resource hash as an attestation of its
// trustworthiness. Attestations aggregate into a lock-multiplier-weighted
// trust score, bucketed into trust tiers. The engine enforces per-auditor
// stake limits and an anti-concentration cap, and exposes the one-way
// slash transition invoked on a guilty dispute verdict.

pub mod attestation;
pub mod engine;

pub use attestation::{
    trust_multiplier_bps, Attestation, TrustTier, COMMUNITY_THRESHOLD, MAX_LOCK_SECS,
    MIN_LOCK_SECS, TRUSTED_THRESHOLD, VERIFIED_THRESHOLD,
};
pub use engine::{
    SlashReceipt, StakingEngine, CONCENTRATION_CAP_DIVISOR, MAX_PAUSE_SECS,
    MAX_STAKE_PER_AUDITOR,
};
