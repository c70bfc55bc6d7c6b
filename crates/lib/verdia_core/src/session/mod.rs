// @zen-component: SES-CredentialStore
//
//! Session state — the credential record and the stores that hold it.
//!
//! The record keeps the access/refresh token pair together, so the two are
//! either both present (authenticated) or both absent (anonymous); there is
//! no way to persist exactly one. Token validity is never inspected locally —
//! the request gateway reacts to server 401s instead.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::auth::UserProfile;

/// Session store errors.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("No data directory available for session storage")]
    NoDataDir,

    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The process-wide credential record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Short-lived bearer credential attached to protected requests.
    pub access_token: String,
    /// Longer-lived credential used solely to mint a new access token.
    pub refresh_token: String,
    /// Profile of the signed-in user.
    pub user: UserProfile,
}

/// Storage backend for the credential record.
///
/// Injected into the request gateway at construction so tests can substitute
/// an in-memory store.
pub trait SessionStore: Send + Sync {
    /// Current session, or `None` when anonymous. Unreadable persisted state
    /// is treated as anonymous, never as an error.
    fn load(&self) -> Option<Session>;

    /// Persist a full session (login / registration outcome).
    fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Swap only the access half of an existing token pair (refresh outcome).
    /// Fails with [`SessionError::NotAuthenticated`] when no session exists.
    fn replace_access_token(&self, access_token: &str) -> Result<(), SessionError>;

    /// Drop all credential state (logout / irrecoverable refresh failure).
    fn clear(&self) -> Result<(), SessionError>;
}

#[cfg(test)]
pub(crate) fn sample_session() -> Session {
    use crate::models::auth::Role;

    Session {
        access_token: "access-1".into(),
        refresh_token: "refresh-1".into(),
        user: UserProfile {
            id: "u1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            role: Role::User,
            shop_name: None,
        },
    }
}
