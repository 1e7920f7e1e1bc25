// crates/sanad-ledger/src/ledger.rs
//
// Balance and supply accounting for $SND.
//
// The ledger is a pure accounting component: it enforces balance and
// supply arithmetic but knows nothing about roles. Role gating for mint
// and burn happens at the protocol layer, which queries the AccessControl
// table before calling in.
//
// Three well-known custody accounts hold value on behalf of the protocol
// modules: the staking vault (locked attestations), the oracle vault
// (flag and appeal deposits), and the rewards vault (claimable yield).

use std::collections::HashMap;

use sanad_core::{AccountId, SanadError};

use crate::token::{Habba, MAX_SUPPLY_HABBA};

/// Custody account for locked attestation principal.
pub const STAKING_VAULT: AccountId = [0xA1; 32];

/// Custody account for flag and appeal deposits.
pub const ORACLE_VAULT: AccountId = [0xA2; 32];

/// Custody account for the reward pool.
pub const REWARDS_VAULT: AccountId = [0xA3; 32];

/// The $SND ledger: per-account balances and total supply.
pub struct Ledger {
    balances: HashMap<AccountId, Habba>,
    total_supply: Habba,
}

impl Ledger {
    /// Create an empty ledger with zero supply.
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            total_supply: 0,
        }
    }

    /// Mint new tokens into an account, increasing total supply.
    ///
    /// # Errors
    /// Returns `SanadError::InvalidAmount` for a zero amount and
    /// `SanadError::SupplyOverflow` if the mint would exceed the maximum
    /// supply.
    pub fn mint(&mut self, to: AccountId, amount: Habba) -> Result<(), SanadError> {
        if amount == 0 {
            return Err(SanadError::InvalidAmount);
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .filter(|s| *s <= MAX_SUPPLY_HABBA)
            .ok_or(SanadError::SupplyOverflow)?;
        self.total_supply = new_supply;
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }

    /// Burn tokens from an account, decreasing total supply. Burned value
    /// is permanently removed; it is never credited to any party.
    ///
    /// # Errors
    /// Returns `SanadError::InsufficientBalance` if the account cannot
    /// cover the amount.
    pub fn burn(&mut self, from: &AccountId, amount: Habba) -> Result<(), SanadError> {
        let balance = self.balances.get_mut(from).ok_or(SanadError::InsufficientBalance)?;
        if *balance < amount {
            return Err(SanadError::InsufficientBalance);
        }
        *balance -= amount;
        self.total_supply -= amount;
        Ok(())
    }

    /// Move tokens between two accounts. Supply is unchanged.
    ///
    /// # Errors
    /// Returns `SanadError::InvalidAmount` for a zero amount and
    /// `SanadError::InsufficientBalance` if the sender cannot cover it.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: AccountId,
        amount: Habba,
    ) -> Result<(), SanadError> {
        if amount == 0 {
            return Err(SanadError::InvalidAmount);
        }
        let balance = self.balances.get_mut(from).ok_or(SanadError::InsufficientBalance)?;
        if *balance < amount {
            return Err(SanadError::InsufficientBalance);
        }
        *balance -= amount;
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }

    /// Balance of an account in habba. Unknown accounts have zero.
    pub fn balance_of(&self, account: &AccountId) -> Habba {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Current total supply in habba.
    pub fn total_supply(&self) -> Habba {
        self.total_supply
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
