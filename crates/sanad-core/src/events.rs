// crates/sanad-core/src/events.rs
//
// Append-only event log for the Sanad Protocol.
//
// Every state transition emits exactly one event (verdicts that slash emit
// one Slashed event per affected attestation). External consumers (the
// indexer, API, and CLI) replicate the log into their own read stores;
// the core never reads the log back, so its correctness is independent of
// any consumer's polling cadence.

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::{AccountId, AttestationId, FlagId, ResourceHash};

/// Terminal outcome of a dispute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Guilty supermajority: the resource's attestations are slashed.
    Guilty,
    /// Innocent supermajority: attestations stand, flagger loses 10%.
    Innocent,
    /// No supermajority either way: flagger loses 50%.
    Dismissed,
}

/// One entry in the protocol event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // Ledger
    Minted {
        to: AccountId,
        amount: u128,
    },
    Burned {
        from: AccountId,
        amount: u128,
    },

    // Registry
    ResourceInscribed {
        resource_hash: ResourceHash,
        inscriber: AccountId,
        kind: String,
    },
    ResourceDeprecated {
        resource_hash: ResourceHash,
        successor: ResourceHash,
    },

    // Staking
    Staked {
        attestation_id: AttestationId,
        auditor: AccountId,
        resource_hash: ResourceHash,
        amount: u128,
        lock_until: u64,
        lock_secs: u64,
    },
    Unstaked {
        attestation_id: AttestationId,
        auditor: AccountId,
        amount: u128,
    },
    Slashed {
        attestation_id: AttestationId,
        auditor: AccountId,
        resource_hash: ResourceHash,
        amount: u128,
    },
    Paused {
        by: AccountId,
        until: u64,
    },
    Unpaused {
        by: AccountId,
    },

    // Oracle
    FlagRaised {
        flag_id: FlagId,
        flagger: AccountId,
        resource_hash: ResourceHash,
        deposit: u128,
    },
    JuryAssembled {
        flag_id: FlagId,
        jury: Vec<AccountId>,
    },
    JurorVoted {
        flag_id: FlagId,
        juror: AccountId,
        guilty: bool,
    },
    VerdictReached {
        flag_id: FlagId,
        verdict: Verdict,
        appeal: bool,
    },
    AppealOpened {
        flag_id: FlagId,
        appellant: AccountId,
        deposit: u128,
    },

    // Rewards
    RewardAccrued {
        auditor: AccountId,
        amount: u128,
        reward: u128,
    },
    RewardClaimed {
        auditor: AccountId,
        amount: u128,
    },
    PoolFunded {
        from: AccountId,
        amount: u128,
    },
    RewardRateChanged {
        rate_per_second: u128,
    },
    LockMultiplierChanged {
        lock_secs: u64,
        multiplier_bps: u32,
    },
    EmergencyWithdrawal {
        to: AccountId,
        amount: u128,
    },

    // Access control
    RoleGranted {
        account: AccountId,
        role: Role,
    },
    RoleRevoked {
        account: AccountId,
        role: Role,
    },
}

/// A sequenced, timestamped event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotonically increasing sequence number, starting at 0.
    pub seq: u64,
    /// Timestamp (unix seconds) of the transition that emitted the event.
    pub at: u64,
    pub event: Event,
}

/// The append-only protocol event log.
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append an event and return its sequence number.
    pub fn emit(&mut self, at: u64, event: Event) -> u64 {
        let seq = self.records.len() as u64;
        self.records.push(EventRecord { seq, at, event });
        seq
    }

    /// All records, in emission order.
    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records at or after the given sequence number.
    ///
    /// This is the indexer's resume point: after processing up to `seq - 1`
    /// it asks for `records_from(seq)`.
    pub fn records_from(&self, seq: u64) -> &[EventRecord] {
        let start = (seq as usize).min(self.records.len());
        &self.records[start..]
    }

    /// Number of records in the log.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
