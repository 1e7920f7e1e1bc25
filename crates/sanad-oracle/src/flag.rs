// crates/sanad-oracle/src/flag.rs
//
// Flag record and dispute state machine.
//
// Per-flag lifecycle:
//
//   Pending --> InReview --> {Guilty | Innocent | Dismissed}
//                                |
//                             Appealed --> InReview --> {Guilty | Innocent | Dismissed}
//
// Pending means the eligible juror pool was too small at creation; jury
// assembly can be retried. Terminal states are immutable except for the
// one-time appeal re-open; the `appealed` flag is one-way, so a second
// appeal is impossible.

use serde::{Deserialize, Serialize};

use sanad_core::events::Verdict;
use sanad_core::{AccountId, FlagId, ResourceHash};
use sanad_ledger::Habba;

/// Where a flag stands in the dispute lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagStatus {
    /// Created, jury not yet assembled (pool too small).
    Pending,
    /// Jury seated, votes being collected.
    InReview,
    /// Guilty supermajority; attestations slashed.
    Guilty,
    /// Innocent supermajority; attestations unaffected.
    Innocent,
    /// No supermajority either way.
    Dismissed,
    /// Re-opened by an appeal, awaiting a fresh jury.
    Appealed,
}

impl FlagStatus {
    /// Whether the status is a verdict (terminal but for the one appeal).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FlagStatus::Guilty | FlagStatus::Innocent | FlagStatus::Dismissed
        )
    }

    /// The verdict this status represents, if terminal.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            FlagStatus::Guilty => Some(Verdict::Guilty),
            FlagStatus::Innocent => Some(Verdict::Innocent),
            FlagStatus::Dismissed => Some(Verdict::Dismissed),
            _ => None,
        }
    }
}

/// One juror's seat on a flag's jury. Votes are write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurySeat {
    pub juror: AccountId,
    /// None until the juror votes; Some(true) = guilty.
    pub vote: Option<bool>,
}

/// A dispute instance against one resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    /// Hash-derived identifier.
    pub id: FlagId,
    /// Account that posted the collateral.
    pub flagger: AccountId,
    /// The disputed resource.
    pub resource_hash: ResourceHash,
    /// Content hash of the off-chain evidence bundle.
    pub evidence_hash: [u8; 32],
    /// Collateral in habba, held in the oracle vault until settlement.
    pub deposit: Habba,
    pub status: FlagStatus,
    /// The seated jury; empty while Pending/Appealed without a jury.
    pub jury: Vec<JurySeat>,
    /// End of the voting window; set at jury assembly.
    pub voting_deadline: Option<u64>,
    /// When the most recent verdict was reached; anchors the appeal
    /// window.
    pub verdict_at: Option<u64>,
    /// The first-round verdict, kept for history once an appeal re-opens
    /// the flag.
    pub first_verdict: Option<Verdict>,
    /// One-way: set when the appeal is opened.
    pub appealed: bool,
    /// The account that opened the appeal, if any.
    pub appellant: Option<AccountId>,
    /// Appeal collateral in habba (2x the original deposit).
    pub appeal_deposit: Habba,
    pub created_at: u64,
}

impl Flag {
    /// Number of votes cast so far.
    pub fn votes_cast(&self) -> usize {
        self.jury.iter().filter(|s| s.vote.is_some()).count()
    }

    /// (guilty, innocent) counts over cast votes.
    pub fn tally(&self) -> (usize, usize) {
        let guilty = self.jury.iter().filter(|s| s.vote == Some(true)).count();
        let innocent = self.jury.iter().filter(|s| s.vote == Some(false)).count();
        (guilty, innocent)
    }

    /// The seated jurors, in selection order.
    pub fn jurors(&self) -> Vec<AccountId> {
        self.jury.iter().map(|s| s.juror).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(FlagStatus::Guilty.is_terminal());
        assert!(FlagStatus::Innocent.is_terminal());
        assert!(FlagStatus::Dismissed.is_terminal());
        assert!(!FlagStatus::Pending.is_terminal());
        assert!(!FlagStatus::InReview.is_terminal());
        assert!(!FlagStatus::Appealed.is_terminal());
    }

    #[test]
    fn test_status_to_verdict() {
        assert_eq!(FlagStatus::Guilty.verdict(), Some(Verdict::Guilty));
        assert_eq!(FlagStatus::InReview.verdict(), None);
    }

    #[test]
    fn test_tally() {
        let flag = Flag {
            id: [0u8; 32],
            flagger: [1u8; 32],
            resource_hash: [2u8; 32],
            evidence_hash: [3u8; 32],
            deposit: 0,
            status: FlagStatus::InReview,
            jury: vec![
                JurySeat { juror: [10u8; 32], vote: Some(true) },
                JurySeat { juror: [11u8; 32], vote: Some(true) },
                JurySeat { juror: [12u8; 32], vote: Some(false) },
                JurySeat { juror: [13u8; 32], vote: None },
            ],
            voting_deadline: None,
            verdict_at: None,
            first_verdict: None,
            appealed: false,
            appellant: None,
            appeal_deposit: 0,
            created_at: 0,
        };
        assert_eq!(flag.votes_cast(), 3);
        assert_eq!(flag.tally(), (2, 1));
    }
}
