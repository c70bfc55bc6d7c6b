//! Account and authentication domain models.

use serde::{Deserialize, Serialize};

/// Account role — drives UI gating, not enforced security.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "seller")]
    Seller,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    /// Wire text representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized user projection returned by login and carried in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Present for seller accounts only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
}
