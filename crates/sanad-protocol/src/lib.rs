// crates/sanad-protocol/src/lib.rs
//
// sanad-protocol: the transaction boundary of the Sanad Protocol.
//
// The Protocol struct owns every module's state (ledger, registry,
// staking engine, oracle, reward pool) plus the access-control table and
// the append-only event log. Each public method is one atomic state
// transition: it either fully applies (state, events, logs) or returns a
// specific error before the first irreversible side effect. There are no
// background jobs; all expiry is evaluated lazily against the `now`
// parameter the caller supplies.
//
// External collaborators (indexer, API, CLI, scanner) consume the event
// stream and the read queries; they never mutate state except through the
// entry points here.

pub mod protocol;

pub use protocol::Protocol;

pub use sanad_core::{
    AccessControl, AccountId, AttestationId, Event, EventLog, EventRecord, FlagId, ResourceHash,
    Role, SanadError,
};
pub use sanad_core::events::Verdict;
pub use sanad_ledger::{Habba, Ledger, Snd, HABBA_PER_SND};
pub use sanad_oracle::{Flag, FlagStatus, Oracle};
pub use sanad_registry::{Inscription, Registry, ResourceKind};
pub use sanad_rewards::RewardPool;
pub use sanad_staking::{Attestation, StakingEngine, TrustTier};
