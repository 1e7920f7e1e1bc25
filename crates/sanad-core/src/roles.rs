// crates/sanad-core/src/roles.rs
//
// Role-based access control for the Sanad Protocol.
//
// A single AccessControl component backed by an explicit (account, role)
// assignment table. Every privileged entry point queries it through
// `require_role`; there is no inheritance-based mixin, only composition.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SanadError;
use crate::types::AccountId;

/// Capabilities that can be granted to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full administrative control: grants/revokes roles, tunes reward
    /// parameters, performs emergency withdrawals.
    Admin,
    /// May trigger slashing of attestations (held by the dispute engine's
    /// operator identity).
    Oracle,
    /// May mint new tokens.
    Minter,
    /// May burn tokens from custody accounts.
    Burner,
    /// May pause and unpause the staking engine.
    Pauser,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Oracle => write!(f, "Oracle"),
            Role::Minter => write!(f, "Minter"),
            Role::Burner => write!(f, "Burner"),
            Role::Pauser => write!(f, "Pauser"),
        }
    }
}

/// The role assignment table.
pub struct AccessControl {
    grants: HashSet<(AccountId, Role)>,
}

impl AccessControl {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            grants: HashSet::new(),
        }
    }

    /// Check whether an account holds a role.
    pub fn has_role(&self, account: &AccountId, role: Role) -> bool {
        self.grants.contains(&(*account, role))
    }

    /// Grant a role to an account. Granting twice is a no-op.
    pub fn grant_role(&mut self, account: AccountId, role: Role) {
        self.grants.insert((account, role));
    }

    /// Revoke a role from an account. Revoking an absent grant is a no-op.
    pub fn revoke_role(&mut self, account: &AccountId, role: Role) {
        self.grants.remove(&(*account, role));
    }

    /// Require that an account holds a role.
    ///
    /// # Errors
    /// Returns `SanadError::Unauthorized` naming the missing role.
    pub fn require_role(&self, account: &AccountId, role: Role) -> Result<(), SanadError> {
        if self.has_role(account, role) {
            Ok(())
        } else {
            Err(SanadError::Unauthorized(role))
        }
    }
}

impl Default for AccessControl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(n: u8) -> AccountId {
        [n; 32]
    }

    #[test]
    fn test_grant_and_check() {
        let mut acl = AccessControl::new();
        acl.grant_role(account(1), Role::Minter);
        assert!(acl.has_role(&account(1), Role::Minter));
        assert!(!acl.has_role(&account(1), Role::Burner));
        assert!(!acl.has_role(&account(2), Role::Minter));
    }

    #[test]
    fn test_require_role() {
        let mut acl = AccessControl::new();
        acl.grant_role(account(1), Role::Oracle);
        assert!(acl.require_role(&account(1), Role::Oracle).is_ok());
        assert_eq!(
            acl.require_role(&account(2), Role::Oracle),
            Err(SanadError::Unauthorized(Role::Oracle))
        );
    }

    #[test]
    fn test_revoke() {
        let mut acl = AccessControl::new();
        acl.grant_role(account(1), Role::Admin);
        acl.revoke_role(&account(1), Role::Admin);
        assert!(!acl.has_role(&account(1), Role::Admin));
    }

    #[test]
    fn test_roles_are_independent() {
        let mut acl = AccessControl::new();
        acl.grant_role(account(1), Role::Admin);
        // Admin does not imply any other role; the table is explicit.
        assert!(!acl.has_role(&account(1), Role::Pauser));
    }
}
