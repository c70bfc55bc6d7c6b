//! File-backed session store.
//!
//! Persists the credential record as one JSON document under the platform
//! data directory, so CLI invocations share a signed-in session.

use std::path::PathBuf;

use tracing::warn;

use super::{Session, SessionError, SessionStore};

/// Durable store — `dirs::data_dir()/verdia/session.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at the default platform location.
    pub fn new() -> Result<Self, SessionError> {
        let dir = dirs::data_dir().ok_or(SessionError::NoDataDir)?;
        Ok(Self {
            path: dir.join("verdia").join("session.json"),
        })
    }

    /// Store at an explicit path (tests, alternate profiles).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the persisted document.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                // Unreadable state is anonymous, not fatal.
                warn!(path = %self.path.display(), error = %e, "discarding corrupt session file");
                None
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn replace_access_token(&self, access_token: &str) -> Result<(), SessionError> {
        let mut session = self.load().ok_or(SessionError::NotAuthenticated)?;
        session.access_token = access_token.to_string();
        self.save(&session)
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
