// crates/sanad-rewards/src/pool.rs
//
// Reward accrual and claims.
//
// Reward formula:
//
//   reward = amount * rate_per_second / RATE_SCALE * lock_secs
//            * multiplier_bps / 10_000
//
// where rate_per_second is an 18-decimal per-second fraction of the
// staked amount. The default rate approximates 5% APR.
//
// Reward multipliers by lock length (basis points):
//   30 days  -> 10000 (1.0x)
//   90 days  -> 15000 (1.5x)
//   365 days -> 30000 (3.0x)
//
// Durations between entries map to the nearest bracket below; anything
// under 90 days earns the 1.0x base. This table is DISTINCT from the
// staking engine's trust-score multiplier table; the two must never be
// conflated.

use std::collections::HashMap;

use sanad_core::{AccountId, SanadError};
use sanad_ledger::Habba;

/// Scale of `rate_per_second`: the rate is a fraction with 18 decimals.
pub const RATE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Default reward rate: ~5% APR, i.e. 0.05 / 31,536,000 seconds.
pub const DEFAULT_RATE_PER_SECOND: u128 = 1_585_489_599;

const NINETY_DAYS_SECS: u64 = 90 * 24 * 3600;
const YEAR_SECS: u64 = 365 * 24 * 3600;

/// Reward multiplier for a lock duration, in basis points, over the
/// default table. Kept as a free function for callers that only need the
/// static table; the pool itself consults its (admin-tunable) copy.
pub fn reward_multiplier_bps(lock_secs: u64) -> u32 {
    if lock_secs >= YEAR_SECS {
        30_000
    } else if lock_secs >= NINETY_DAYS_SECS {
        15_000
    } else {
        10_000
    }
}

/// The reward pool: per-auditor pending and claimed balances.
///
/// The pool accounts for entitlements only; the tokens themselves sit in
/// the ledger's REWARDS_VAULT, and the protocol layer pays claims out of
/// it.
pub struct RewardPool {
    pending: HashMap<AccountId, Habba>,
    claimed: HashMap<AccountId, Habba>,
    total_accrued: Habba,
    total_claimed: Habba,
    rate_per_second: u128,
    /// (min_lock_secs, bps) entries sorted ascending by min_lock_secs.
    multipliers: Vec<(u64, u32)>,
}

impl RewardPool {
    /// Create a pool with the default rate and multiplier table.
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            claimed: HashMap::new(),
            total_accrued: 0,
            total_claimed: 0,
            rate_per_second: DEFAULT_RATE_PER_SECOND,
            multipliers: vec![(0, 10_000), (NINETY_DAYS_SECS, 15_000), (YEAR_SECS, 30_000)],
        }
    }

    /// Accrue a reward for a successful stake and return the computed
    /// amount. A zero computed reward (zero amount or zero rate) accrues
    /// nothing.
    ///
    /// The protocol layer's staking flow is the only caller; there is no
    /// externally reachable accrual entry point.
    pub fn accrue(&mut self, auditor: AccountId, amount: Habba, lock_secs: u64) -> Habba {
        let bps = self.multiplier_bps(lock_secs) as u128;
        let reward = amount * self.rate_per_second / RATE_SCALE * lock_secs as u128 * bps / 10_000;
        if reward > 0 {
            *self.pending.entry(auditor).or_insert(0) += reward;
            self.total_accrued += reward;
        }
        reward
    }

    /// Claim the full pending balance, moving it to the cumulative
    /// claimed counter. Returns the claimed amount; the protocol layer
    /// pays it out of the rewards vault in the same transition.
    ///
    /// # Errors
    /// `NoRewardsToClaim` when the pending balance is zero.
    pub fn claim(&mut self, auditor: &AccountId) -> Result<Habba, SanadError> {
        let amount = self.pending.get(auditor).copied().unwrap_or(0);
        if amount == 0 {
            return Err(SanadError::NoRewardsToClaim);
        }
        self.pending.insert(*auditor, 0);
        *self.claimed.entry(*auditor).or_insert(0) += amount;
        self.total_claimed += amount;
        Ok(amount)
    }

    /// The pool's multiplier for a lock duration, in basis points
    /// (nearest entry at or below the duration; 10000 base).
    pub fn multiplier_bps(&self, lock_secs: u64) -> u32 {
        self.multipliers
            .iter()
            .rev()
            .find(|(min_lock, _)| lock_secs >= *min_lock)
            .map(|(_, bps)| *bps)
            .unwrap_or(10_000)
    }

    /// Set the per-second reward rate (RATE_SCALE-scaled).
    pub fn set_reward_rate(&mut self, rate_per_second: u128) {
        self.rate_per_second = rate_per_second;
    }

    /// Insert or update a multiplier table entry, keeping the table
    /// sorted by minimum lock.
    pub fn set_lock_multiplier(&mut self, min_lock_secs: u64, bps: u32) {
        match self.multipliers.iter_mut().find(|(l, _)| *l == min_lock_secs) {
            Some(entry) => entry.1 = bps,
            None => {
                self.multipliers.push((min_lock_secs, bps));
                self.multipliers.sort_by_key(|(l, _)| *l);
            }
        }
    }

    /// Current per-second reward rate (RATE_SCALE-scaled).
    pub fn reward_rate(&self) -> u128 {
        self.rate_per_second
    }

    /// Pending (unclaimed) reward balance for an auditor, in habba.
    pub fn pending_rewards(&self, auditor: &AccountId) -> Habba {
        self.pending.get(auditor).copied().unwrap_or(0)
    }

    /// Cumulative claimed rewards for an auditor, in habba.
    pub fn claimed_rewards(&self, auditor: &AccountId) -> Habba {
        self.claimed.get(auditor).copied().unwrap_or(0)
    }

    /// Total rewards ever accrued across all auditors, in habba.
    pub fn total_accrued(&self) -> Habba {
        self.total_accrued
    }

    /// Total rewards ever claimed across all auditors, in habba.
    pub fn total_claimed(&self) -> Habba {
        self.total_claimed
    }
}

impl Default for RewardPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanad_ledger::HABBA_PER_SND;

    const DAY: u64 = 24 * 3600;

    fn auditor(n: u8) -> AccountId {
        [n; 32]
    }

    #[test]
    fn test_default_multiplier_table() {
        let pool = RewardPool::new();
        assert_eq!(pool.multiplier_bps(30 * DAY), 10_000);
        assert_eq!(pool.multiplier_bps(90 * DAY), 15_000);
        assert_eq!(pool.multiplier_bps(365 * DAY), 30_000);
        // Nearest-below bracketing.
        assert_eq!(pool.multiplier_bps(89 * DAY), 10_000);
        assert_eq!(pool.multiplier_bps(180 * DAY), 15_000);
    }

    #[test]
    fn test_reward_table_differs_from_trust_table() {
        // 90 days earns 1.5x here; the staking trust table gives 2.0x at
        // 90 days. Guard against conflating the two.
        assert_eq!(reward_multiplier_bps(90 * DAY), 15_000);
    }

    #[test]
    fn test_accrue_math() {
        let mut pool = RewardPool::new();
        // Rate of 1/1000 per second makes the arithmetic inspectable.
        pool.set_reward_rate(RATE_SCALE / 1_000);

        let reward = pool.accrue(auditor(1), 1_000, 30 * DAY);
        // 1000/1000 = 1 per second, 30 days, 1.0x multiplier.
        assert_eq!(reward, 30 * DAY as u128);
        assert_eq!(pool.pending_rewards(&auditor(1)), reward);

        // 90-day lock earns the 1.5x reward multiplier.
        let reward_90 = pool.accrue(auditor(2), 1_000, 90 * DAY);
        assert_eq!(reward_90, 90 * DAY as u128 * 15_000 / 10_000);
    }

    #[test]
    fn test_default_rate_approximates_5_percent_apr() {
        let mut pool = RewardPool::new();
        // 1000 SND for a full year at 1.0x... except a year lock earns
        // 3.0x, so use the raw rate over 365 days and the base bracket
        // via an 89-day lock scaled up: simpler to check 30 days.
        let reward = pool.accrue(auditor(1), 1_000 * HABBA_PER_SND, 30 * DAY);
        // ~0.41% of principal over 30 days (5% * 30/365).
        let principal = 1_000 * HABBA_PER_SND;
        let lower = principal * 40 / 10_000;
        let upper = principal * 42 / 10_000;
        assert!(reward > lower && reward < upper, "reward {} out of range", reward);
    }

    #[test]
    fn test_accruals_accumulate() {
        let mut pool = RewardPool::new();
        pool.set_reward_rate(RATE_SCALE / 1_000);
        pool.accrue(auditor(1), 1_000, 30 * DAY);
        pool.accrue(auditor(1), 1_000, 30 * DAY);
        assert_eq!(pool.pending_rewards(&auditor(1)), 2 * 30 * DAY as u128);
        assert_eq!(pool.total_accrued(), 2 * 30 * DAY as u128);
    }

    #[test]
    fn test_claim_moves_to_claimed() {
        let mut pool = RewardPool::new();
        pool.set_reward_rate(RATE_SCALE / 1_000);
        pool.accrue(auditor(1), 1_000, 30 * DAY);

        let claimed = pool.claim(&auditor(1)).unwrap();
        assert_eq!(claimed, 30 * DAY as u128);
        assert_eq!(pool.pending_rewards(&auditor(1)), 0);
        assert_eq!(pool.claimed_rewards(&auditor(1)), claimed);
        assert_eq!(pool.total_claimed(), claimed);
    }

    #[test]
    fn test_claim_with_nothing_pending_fails() {
        let mut pool = RewardPool::new();
        assert_eq!(pool.claim(&auditor(1)), Err(SanadError::NoRewardsToClaim));

        // A second claim right after a successful one also fails.
        pool.set_reward_rate(RATE_SCALE / 1_000);
        pool.accrue(auditor(1), 1_000, 30 * DAY);
        pool.claim(&auditor(1)).unwrap();
        assert_eq!(pool.claim(&auditor(1)), Err(SanadError::NoRewardsToClaim));
    }

    #[test]
    fn test_set_lock_multiplier_overrides() {
        let mut pool = RewardPool::new();
        pool.set_lock_multiplier(90 * DAY, 20_000);
        assert_eq!(pool.multiplier_bps(90 * DAY), 20_000);

        // New entries slot into sorted position.
        pool.set_lock_multiplier(180 * DAY, 25_000);
        assert_eq!(pool.multiplier_bps(200 * DAY), 25_000);
        assert_eq!(pool.multiplier_bps(365 * DAY), 30_000);
    }

    #[test]
    fn test_zero_rate_accrues_nothing() {
        let mut pool = RewardPool::new();
        pool.set_reward_rate(0);
        assert_eq!(pool.accrue(auditor(1), 1_000 * HABBA_PER_SND, 30 * DAY), 0);
        assert_eq!(pool.pending_rewards(&auditor(1)), 0);
        assert_eq!(pool.total_accrued(), 0);
    }
}
