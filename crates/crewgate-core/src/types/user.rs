//! User identity — read-only to this engine.

use serde::{Deserialize, Serialize};

/// Application role of a user within the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    Admin,
    OfficeCrew,
    FieldCrew,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::OfficeCrew => "officeCrew",
            Self::FieldCrew => "fieldCrew",
        }
    }
}

/// A user as seen by the entitlement gate and seat allocator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub role: UserRole,
    pub is_company_admin: bool,
}

impl User {
    pub fn new(id: impl Into<String>, role: UserRole, is_company_admin: bool) -> Self {
        Self {
            id: id.into(),
            role,
            is_company_admin,
        }
    }

    /// Convenience constructor for a company admin.
    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(id, UserRole::Admin, true)
    }
}
