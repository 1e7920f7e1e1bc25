// crates/sanad-ledger/src/lib.rs
//
// sanad-ledger: $SND token ledger for the Sanad Protocol.
//
// Fungible balance and supply accounting with mint/burn/transfer. All
// monetary values are tracked in habba (the smallest unit of $SND).
// 1 SND = 10^18 habba.

pub mod ledger;
pub mod token;

pub use ledger::{Ledger, ORACLE_VAULT, REWARDS_VAULT, STAKING_VAULT};
pub use token::{Habba, Snd, HABBA_PER_SND, MAX_SUPPLY_HABBA};
