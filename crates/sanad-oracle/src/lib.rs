// crates/sanad-oracle/src/lib.rs
//
// sanad-oracle: the dispute engine for the Sanad Protocol.
//
// Anyone may flag an inscribed resource by posting a collateral deposit.
// A pseudo-random jury drawn from the juror pool (excluding anyone with a
// stake in the flagged resource) votes guilty or innocent; a 2/3
// supermajority of cast votes produces a binding verdict. A guilty
// verdict slashes every live attestation on the resource. One appeal
// round with a fresh jury and a doubled deposit is possible within a
// fixed window; the appeal verdict is final.

pub mod engine;
pub mod entropy;
pub mod flag;
pub mod jury;

pub use engine::{Oracle, VerdictOutcome};
pub use entropy::{ChainEntropy, EntropySource, FixedEntropy};
pub use flag::{Flag, FlagStatus, JurySeat};
pub use jury::{select_jury, JurorPool, JURY_SIZE};

use sanad_ledger::{Habba, HABBA_PER_SND};

/// Minimum collateral to raise a flag: 100 SND.
pub const MIN_FLAG_DEPOSIT: Habba = 100 * HABBA_PER_SND;

/// Voting window after jury assembly: 3 days.
pub const VOTING_PERIOD_SECS: u64 = 3 * 24 * 3600;

/// Appeal window after a terminal verdict: 3 days.
pub const APPEAL_WINDOW_SECS: u64 = 3 * 24 * 3600;

/// An appeal requires this multiple of the original flag deposit.
pub const APPEAL_DEPOSIT_FACTOR: u128 = 2;
