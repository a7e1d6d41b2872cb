//! User entity and related types

use serde::{Deserialize, Serialize};

/// Role discriminant, used as the key of the capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleType {
    Admin,
    Librarian,
    Reader,
    Student,
}

impl RoleType {
    /// Every role, for exhaustive matrix enumeration in tests and tooling
    pub const ALL: [RoleType; 4] = [Self::Admin, Self::Librarian, Self::Reader, Self::Student];
}

impl std::fmt::Display for RoleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Librarian => write!(f, "librarian"),
            Self::Reader => write!(f, "reader"),
            Self::Student => write!(f, "student"),
        }
    }
}

/// Role of a user, with variant-specific payload.
///
/// Serialized with the `role` discriminator field the store uses, so a
/// student persists as `{"role": "student", "studentNumber": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Librarian,
    Reader,
    Student {
        #[serde(rename = "studentNumber")]
        student_number: String,
    },
}

impl Role {
    /// Convenience constructor for the student variant
    pub fn student(student_number: impl Into<String>) -> Self {
        Self::Student {
            student_number: student_number.into(),
        }
    }

    pub fn role_type(&self) -> RoleType {
        match self {
            Self::Admin => RoleType::Admin,
            Self::Librarian => RoleType::Librarian,
            Self::Reader => RoleType::Reader,
            Self::Student { .. } => RoleType::Student,
        }
    }

    pub fn student_number(&self) -> Option<&str> {
        match self {
            Self::Student { student_number } => Some(student_number),
            _ => None,
        }
    }
}

/// User entity
///
/// Users are immutable once created: role and username never change in
/// place, and removal is by username. The credential is stored verbatim,
/// matching the legacy store format (see `CredentialScheme`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier, stable for the lifetime of the user
    id: String,
    /// Login name, unique across all users, case-sensitive
    username: String,
    /// Stored credential, compared verbatim on login
    password: String,
    /// Role discriminator plus variant payload
    #[serde(flatten)]
    role: Role,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn role_type(&self) -> RoleType {
        self.role.role_type()
    }
}
