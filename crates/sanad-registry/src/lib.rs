// crates/sanad-registry/src/lib.rs
//
// sanad-registry: Content-addressed inscription store for the Sanad
// Protocol.
//
// Resources (AI skills, configs, prompts) are inscribed once under their
// 32-byte content hash. The store is append-only: an inscription is never
// removed or rewritten, only linked forward to a successor via a one-way
// deprecation link. Every other module references resources by hash alone
// and never consults the registry, so cross-module references stay
// stateless.

pub mod registry;

pub use registry::{Inscription, Registry, ResourceKind, MAX_METADATA_BYTES, MAX_URI_BYTES};
