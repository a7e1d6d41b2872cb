//! Authorization gate
//!
//! Roles map to capabilities through one explicit table, consulted before
//! every mutating directory, catalog or lending call. The table is plain
//! data: test suites can enumerate every (role, capability) pair, and
//! catalog variants with a slightly different matrix adjust it with
//! [`CapabilityTable::grant`] / [`CapabilityTable::revoke`] instead of
//! scattering role checks through the services.

use std::collections::{BTreeSet, HashMap};

use crate::domain::user::RoleType;
use crate::domain::DomainError;

/// An operation class a role may or may not invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Add and remove user accounts
    ManageUsers,
    /// Add and update catalog entries
    ManageCatalog,
    /// Delete catalog entries
    RemoveCatalogItem,
    /// Borrow and return books
    Lend,
}

impl Capability {
    /// Every capability, for exhaustive matrix enumeration
    pub const ALL: [Capability; 4] = [
        Self::ManageUsers,
        Self::ManageCatalog,
        Self::RemoveCatalogItem,
        Self::Lend,
    ];
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ManageUsers => write!(f, "manage-users"),
            Self::ManageCatalog => write!(f, "manage-catalog"),
            Self::RemoveCatalogItem => write!(f, "remove-catalog-item"),
            Self::Lend => write!(f, "lend"),
        }
    }
}

/// Role → capability table.
#[derive(Debug, Clone, Default)]
pub struct CapabilityTable {
    grants: HashMap<RoleType, BTreeSet<Capability>>,
}

impl CapabilityTable {
    /// An empty table: every operation denied
    pub fn new() -> Self {
        Self::default()
    }

    /// The library matrix: admins run the directory and the catalog but do
    /// not lend; librarians curate the catalog; readers and students
    /// borrow and return.
    pub fn library() -> Self {
        Self::new()
            .grant(RoleType::Admin, Capability::ManageUsers)
            .grant(RoleType::Admin, Capability::ManageCatalog)
            .grant(RoleType::Admin, Capability::RemoveCatalogItem)
            .grant(RoleType::Librarian, Capability::ManageCatalog)
            .grant(RoleType::Reader, Capability::Lend)
            .grant(RoleType::Student, Capability::Lend)
    }

    pub fn grant(mut self, role: RoleType, capability: Capability) -> Self {
        self.grants.entry(role).or_default().insert(capability);
        self
    }

    pub fn revoke(mut self, role: RoleType, capability: Capability) -> Self {
        if let Some(capabilities) = self.grants.get_mut(&role) {
            capabilities.remove(&capability);
        }
        self
    }

    pub fn allows(&self, role: RoleType, capability: Capability) -> bool {
        self.grants
            .get(&role)
            .is_some_and(|capabilities| capabilities.contains(&capability))
    }

    /// Gate check: `Permission` error on denial, before any side effect.
    pub fn authorize(&self, role: RoleType, capability: Capability) -> Result<(), DomainError> {
        if self.allows(role, capability) {
            return Ok(());
        }

        Err(DomainError::permission(format!(
            "Role '{role}' may not perform '{capability}'"
        )))
    }

    /// Capabilities granted to a role, in stable order
    pub fn capabilities(&self, role: RoleType) -> Vec<Capability> {
        self.grants
            .get(&role)
            .map(|capabilities| capabilities.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_matrix_exhaustive() {
        let table = CapabilityTable::library();

        let expected: &[(RoleType, Capability, bool)] = &[
            (RoleType::Admin, Capability::ManageUsers, true),
            (RoleType::Admin, Capability::ManageCatalog, true),
            (RoleType::Admin, Capability::RemoveCatalogItem, true),
            (RoleType::Admin, Capability::Lend, false),
            (RoleType::Librarian, Capability::ManageUsers, false),
            (RoleType::Librarian, Capability::ManageCatalog, true),
            (RoleType::Librarian, Capability::RemoveCatalogItem, false),
            (RoleType::Librarian, Capability::Lend, false),
            (RoleType::Reader, Capability::ManageUsers, false),
            (RoleType::Reader, Capability::ManageCatalog, false),
            (RoleType::Reader, Capability::RemoveCatalogItem, false),
            (RoleType::Reader, Capability::Lend, true),
            (RoleType::Student, Capability::ManageUsers, false),
            (RoleType::Student, Capability::ManageCatalog, false),
            (RoleType::Student, Capability::RemoveCatalogItem, false),
            (RoleType::Student, Capability::Lend, true),
        ];

        // Every (role, capability) pair appears exactly once
        assert_eq!(expected.len(), RoleType::ALL.len() * Capability::ALL.len());

        for (role, capability, allowed) in expected {
            assert_eq!(
                table.allows(*role, *capability),
                *allowed,
                "{role} / {capability}"
            );
        }
    }

    #[test]
    fn test_authorize_denial_is_permission_error() {
        let table = CapabilityTable::library();

        let result = table.authorize(RoleType::Reader, Capability::ManageCatalog);
        assert!(matches!(result, Err(DomainError::Permission { .. })));

        assert!(table.authorize(RoleType::Reader, Capability::Lend).is_ok());
    }

    #[test]
    fn test_grant_and_revoke_for_variants() {
        // A product-catalog deployment lets librarians delete entries
        let table = CapabilityTable::library()
            .grant(RoleType::Librarian, Capability::RemoveCatalogItem)
            .revoke(RoleType::Admin, Capability::ManageCatalog);

        assert!(table.allows(RoleType::Librarian, Capability::RemoveCatalogItem));
        assert!(!table.allows(RoleType::Admin, Capability::ManageCatalog));
        // Untouched grants survive
        assert!(table.allows(RoleType::Admin, Capability::ManageUsers));
    }

    #[test]
    fn test_empty_table_denies_everything() {
        let table = CapabilityTable::new();

        for role in RoleType::ALL {
            for capability in Capability::ALL {
                assert!(!table.allows(role, capability));
            }
        }
    }
}
