// crates/sanad-rewards/src/lib.rs
//
// sanad-rewards: auditor yield for the Sanad Protocol.
//
// Successful stakes accrue a pending reward proportional to
// amount x rate x lock duration x lock multiplier. Auditors claim the
// full pending balance at once; payout comes from the ledger's rewards
// vault, which is funded by admin deposits and forfeited flag deposits.

pub mod pool;

pub use pool::{
    reward_multiplier_bps, RewardPool, DEFAULT_RATE_PER_SECOND, RATE_SCALE,
};
