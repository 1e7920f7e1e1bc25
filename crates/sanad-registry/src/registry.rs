// crates/sanad-registry/src/registry.rs
//
// The inscription store.
//
// Lifecycle of an inscription:
//
//   inscribe --> (immutable) --> deprecate (one-way link to a successor)
//
// There is no removal and no in-place edit. Deprecation does not affect
// staking or disputes on the old hash; it is a discovery hint for
// consumers.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use sanad_core::{AccountId, ResourceHash, SanadError, ZERO_HASH};

/// Maximum byte length of an inscription uri.
pub const MAX_URI_BYTES: usize = 512;

/// Maximum serialized byte length of inscription metadata.
pub const MAX_METADATA_BYTES: usize = 4096;

/// What kind of artifact an inscription points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    /// An AI skill package.
    Skill,
    /// A configuration artifact.
    Config,
    /// A prompt artifact.
    Prompt,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Skill => write!(f, "Skill"),
            ResourceKind::Config => write!(f, "Config"),
            ResourceKind::Prompt => write!(f, "Prompt"),
        }
    }
}

/// One inscribed resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inscription {
    /// Content hash of the artifact; the registry key.
    pub resource_hash: ResourceHash,
    pub kind: ResourceKind,
    /// Account that inscribed the resource. Only the inscriber may
    /// deprecate it.
    pub inscriber: AccountId,
    /// Retrieval hint (e.g. an IPFS or HTTPS uri). At most
    /// `MAX_URI_BYTES` bytes.
    pub uri: String,
    /// Free-form descriptive metadata. At most `MAX_METADATA_BYTES`
    /// bytes serialized.
    pub metadata: serde_json::Value,
    /// Timestamp (unix seconds) of inscription.
    pub inscribed_at: u64,
    /// Set once when a successor supersedes this resource.
    pub deprecated_by: Option<ResourceHash>,
}

/// The append-only registry of inscriptions, keyed by content hash.
pub struct Registry {
    inscriptions: HashMap<ResourceHash, Inscription>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inscriptions: HashMap::new(),
        }
    }

    /// Inscribe a new resource under its content hash.
    ///
    /// # Errors
    /// - `SanadError::InvalidResourceHash` for the zero hash.
    /// - `SanadError::ResourceAlreadyInscribed` for a duplicate hash.
    /// - `SanadError::MetadataTooLarge` if the uri or serialized metadata
    ///   exceeds its size limit.
    pub fn inscribe(
        &mut self,
        inscriber: AccountId,
        resource_hash: ResourceHash,
        kind: ResourceKind,
        uri: String,
        metadata: serde_json::Value,
        now: u64,
    ) -> Result<&Inscription, SanadError> {
        if resource_hash == ZERO_HASH {
            return Err(SanadError::InvalidResourceHash);
        }
        if self.inscriptions.contains_key(&resource_hash) {
            return Err(SanadError::ResourceAlreadyInscribed);
        }
        if uri.len() > MAX_URI_BYTES {
            return Err(SanadError::MetadataTooLarge);
        }
        let serialized = serde_json::to_string(&metadata).map_err(|_| SanadError::MetadataTooLarge)?;
        if serialized.len() > MAX_METADATA_BYTES {
            return Err(SanadError::MetadataTooLarge);
        }

        let inscription = Inscription {
            resource_hash,
            kind,
            inscriber,
            uri,
            metadata,
            inscribed_at: now,
            deprecated_by: None,
        };
        Ok(self
            .inscriptions
            .entry(resource_hash)
            .or_insert(inscription))
    }

    /// Link an inscribed resource forward to its successor. One-way: a
    /// resource can be deprecated at most once, by its inscriber, and the
    /// successor must itself be inscribed.
    ///
    /// # Errors
    /// - `SanadError::ResourceNotFound` if either hash is not inscribed.
    /// - `SanadError::NotOwner` if the caller is not the inscriber.
    /// - `SanadError::InvalidResourceHash` if the successor equals the
    ///   resource being deprecated.
    /// - `SanadError::AlreadyDeprecated` on a second deprecation.
    pub fn deprecate(
        &mut self,
        caller: &AccountId,
        resource_hash: ResourceHash,
        successor: ResourceHash,
    ) -> Result<(), SanadError> {
        if successor == resource_hash {
            return Err(SanadError::InvalidResourceHash);
        }
        if !self.inscriptions.contains_key(&successor) {
            return Err(SanadError::ResourceNotFound);
        }
        let inscription = self
            .inscriptions
            .get_mut(&resource_hash)
            .ok_or(SanadError::ResourceNotFound)?;
        if inscription.inscriber != *caller {
            return Err(SanadError::NotOwner);
        }
        if inscription.deprecated_by.is_some() {
            return Err(SanadError::AlreadyDeprecated);
        }
        inscription.deprecated_by = Some(successor);
        Ok(())
    }

    /// Look up an inscription by content hash.
    pub fn get(&self, resource_hash: &ResourceHash) -> Option<&Inscription> {
        self.inscriptions.get(resource_hash)
    }

    /// Whether a resource hash has been inscribed.
    pub fn exists(&self, resource_hash: &ResourceHash) -> bool {
        self.inscriptions.contains_key(resource_hash)
    }

    /// Whether an inscribed resource carries a deprecation link.
    /// Unknown hashes are not deprecated.
    pub fn is_deprecated(&self, resource_hash: &ResourceHash) -> bool {
        self.inscriptions
            .get(resource_hash)
            .map(|i| i.deprecated_by.is_some())
            .unwrap_or(false)
    }

    /// Number of inscriptions in the registry.
    pub fn len(&self) -> usize {
        self.inscriptions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inscriptions.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
