// crates/sanad-core/src/lib.rs
//
// sanad-core: Core types, error taxonomy, access control, and the
// append-only event log for the Sanad Protocol.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines account and resource identifiers, id derivation helpers, the
// protocol-wide error enum, the role table, and the event stream consumed
// by external indexers.

pub mod error;
pub mod events;
pub mod roles;
pub mod types;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use sanad_core::SanadError;`

pub use error::SanadError;
pub use events::{Event, EventLog, EventRecord};
pub use roles::{AccessControl, Role};
pub use types::{
    derive_id, short_hex, AccountId, AttestationId, FlagId, ResourceHash, ZERO_HASH,
};
