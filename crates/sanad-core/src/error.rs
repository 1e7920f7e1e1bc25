// crates/sanad-core/src/error.rs
//
// Protocol-wide error taxonomy for the Sanad Protocol.
//
// Every fallible operation surfaces a specific kind; nothing is collapsed
// into a generic failure. Kinds fall into five classes:
//   - Validation: bad input, rejected before any state change.
//   - Authorization: wrong role, not owner, not juror.
//   - State conflict: already slashed, already voted, still locked, ...
//   - Economic limit: max stake, concentration cap, deposits, balances.
//   - Systemic: engine paused.
//
// Callers are expected to present the kind verbatim or map it to a short
// human-readable reason; the core never retries on its own.

use thiserror::Error;

use crate::roles::Role;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanadError {
    // --- Validation ---
    /// Amount must be greater than zero.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// The zero hash is not a valid resource hash.
    #[error("invalid resource hash")]
    InvalidResourceHash,

    /// Lock duration below the 7-day minimum.
    #[error("lock duration {0}s is below the minimum")]
    LockTooShort(u64),

    /// Lock duration above the 90-day maximum.
    #[error("lock duration {0}s is above the maximum")]
    LockTooLong(u64),

    /// Inscription uri or metadata exceeds the size limit.
    #[error("inscription metadata exceeds the size limit")]
    MetadataTooLarge,

    /// Pause duration above the 7-day maximum.
    #[error("pause duration {0}s is above the maximum")]
    PauseTooLong(u64),

    // --- Authorization ---
    /// Caller does not hold the required role.
    #[error("caller is missing the {0} role")]
    Unauthorized(Role),

    /// Caller does not own the referenced record.
    #[error("caller is not the owner")]
    NotOwner,

    /// Caller is not on the flag's jury.
    #[error("caller is not a juror on this flag")]
    NotJuror,

    // --- State conflict ---
    /// Resource hash already inscribed (registry is append-only).
    #[error("resource already inscribed")]
    ResourceAlreadyInscribed,

    /// No inscription found for the resource hash.
    #[error("resource not found")]
    ResourceNotFound,

    /// Resource already carries a deprecation link.
    #[error("resource already deprecated")]
    AlreadyDeprecated,

    /// Attestation lock period has not elapsed.
    #[error("attestation is still locked until {0}")]
    StillLocked(u64),

    /// Attestation was already slashed; slashing is one-way.
    #[error("attestation already slashed")]
    AlreadySlashed,

    /// Attestation does not exist or was already withdrawn.
    #[error("no stake found")]
    NoStakeFound,

    /// The resource already has an active (non-terminal) flag.
    #[error("resource already flagged")]
    ResourceAlreadyFlagged,

    /// No flag found for the given id.
    #[error("flag not found")]
    FlagNotFound,

    /// Juror already cast a vote on this flag; votes are write-once.
    #[error("juror already voted")]
    AlreadyVoted,

    /// Flag is not in the InReview state.
    #[error("flag is not in review")]
    NotInReview,

    /// Voting deadline has elapsed; the flag must be finalized instead.
    #[error("voting period has closed")]
    VotingClosed,

    /// Voting deadline has not elapsed yet.
    #[error("voting period is still open")]
    VotingStillOpen,

    /// Appeals are only possible from a terminal verdict.
    #[error("flag has no terminal verdict")]
    NotTerminal,

    /// The appeal window after the verdict has elapsed.
    #[error("appeal window has closed")]
    AppealWindowClosed,

    /// The flag was already appealed once; one round only.
    #[error("flag already appealed")]
    AlreadyAppealed,

    /// Account is already in the juror pool.
    #[error("account already in juror pool")]
    AlreadyInPool,

    // --- Economic limit ---
    /// Stake would push the auditor past the per-auditor maximum.
    #[error("stake exceeds the per-auditor maximum")]
    ExceedsMaxStake,

    /// Stake would push the auditor's share of the resource past one third.
    #[error("stake exceeds the concentration cap")]
    ExceedsConcentrationCap,

    /// Flag or appeal deposit below the required minimum.
    #[error("deposit below the required minimum")]
    InsufficientDeposit,

    /// Account balance cannot cover the transfer.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Mint would overflow the token supply.
    #[error("token supply overflow")]
    SupplyOverflow,

    /// No pending rewards to claim.
    #[error("no rewards to claim")]
    NoRewardsToClaim,

    // --- Systemic ---
    /// Staking is paused until the recorded timestamp.
    #[error("staking is paused until {0}")]
    Paused(u64),
}
