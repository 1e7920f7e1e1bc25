// crates/sanad-oracle/src/jury.rs
//
// Juror pool membership and pseudo-random jury selection.
//
// Selection is a partial Fisher-Yates shuffle over the eligible pool,
// driven by an StdRng seeded from the oracle's EntropySource. With the
// default chain-derived entropy this is NOT secure randomness; see
// entropy.rs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sanad_core::{AccountId, SanadError};

/// Fixed jury size per dispute.
pub const JURY_SIZE: usize = 5;

/// The set of accounts eligible for jury duty, in admission order.
pub struct JurorPool {
    members: Vec<AccountId>,
}

impl JurorPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Add an account to the pool.
    ///
    /// # Errors
    /// Returns `SanadError::AlreadyInPool` for a duplicate.
    pub fn add(&mut self, account: AccountId) -> Result<(), SanadError> {
        if self.contains(&account) {
            return Err(SanadError::AlreadyInPool);
        }
        self.members.push(account);
        Ok(())
    }

    /// Add a batch of accounts, skipping duplicates per entry (the batch
    /// is not atomic). Returns the number actually added.
    pub fn add_batch(&mut self, accounts: &[AccountId]) -> usize {
        accounts.iter().filter(|a| self.add(**a).is_ok()).count()
    }

    /// Whether an account is in the pool.
    pub fn contains(&self, account: &AccountId) -> bool {
        self.members.contains(account)
    }

    /// Number of pool members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Pool members passing an eligibility predicate, in admission order.
    pub fn eligible<F>(&self, mut keep: F) -> Vec<AccountId>
    where
        F: FnMut(&AccountId) -> bool,
    {
        self.members.iter().filter(|a| keep(a)).copied().collect()
    }
}

impl Default for JurorPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw `JURY_SIZE` distinct jurors from the eligible list using a seeded
/// partial Fisher-Yates shuffle. Callers must ensure
/// `eligible.len() >= JURY_SIZE`.
pub fn select_jury(eligible: &[AccountId], seed: [u8; 32]) -> Vec<AccountId> {
    let mut rng = StdRng::from_seed(seed);
    let mut pool = eligible.to_vec();
    for i in 0..JURY_SIZE {
        let j = rng.gen_range(i..pool.len());
        pool.swap(i, j);
    }
    pool.truncate(JURY_SIZE);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(n: u8) -> AccountId {
        [n; 32]
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut pool = JurorPool::new();
        pool.add(account(1)).unwrap();
        assert_eq!(pool.add(account(1)), Err(SanadError::AlreadyInPool));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_add_batch_skips_duplicates() {
        let mut pool = JurorPool::new();
        pool.add(account(1)).unwrap();
        let added = pool.add_batch(&[account(1), account(2), account(3), account(2)]);
        assert_eq!(added, 2);
        assert_eq!(pool.len(), 3);
        assert!(pool.contains(&account(3)));
    }

    #[test]
    fn test_eligible_filters() {
        let mut pool = JurorPool::new();
        for n in 1..=6 {
            pool.add(account(n)).unwrap();
        }
        let eligible = pool.eligible(|a| a[0] % 2 == 0);
        assert_eq!(eligible, vec![account(2), account(4), account(6)]);
    }

    #[test]
    fn test_select_jury_is_deterministic_per_seed() {
        let eligible: Vec<AccountId> = (1..=20).map(account).collect();
        let a = select_jury(&eligible, [7u8; 32]);
        let b = select_jury(&eligible, [7u8; 32]);
        assert_eq!(a, b);
        assert_eq!(a.len(), JURY_SIZE);
    }

    #[test]
    fn test_select_jury_draws_distinct_members() {
        let eligible: Vec<AccountId> = (1..=20).map(account).collect();
        let jury = select_jury(&eligible, [3u8; 32]);
        let mut deduped = jury.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), JURY_SIZE);
        for juror in &jury {
            assert!(eligible.contains(juror));
        }
    }

    #[test]
    fn test_different_seeds_usually_differ() {
        let eligible: Vec<AccountId> = (1..=100).map(|n| account(n as u8)).collect();
        let a = select_jury(&eligible, [1u8; 32]);
        let b = select_jury(&eligible, [2u8; 32]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_select_jury_exact_pool_size() {
        let eligible: Vec<AccountId> = (1..=JURY_SIZE as u8).map(account).collect();
        let mut jury = select_jury(&eligible, [5u8; 32]);
        jury.sort();
        let mut expected = eligible.clone();
        expected.sort();
        assert_eq!(jury, expected);
    }
}
