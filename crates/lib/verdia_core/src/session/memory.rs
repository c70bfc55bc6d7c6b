//! In-memory session store.

use std::sync::RwLock;

use super::{Session, SessionError, SessionStore};

/// Volatile store — session lives for the lifetime of the process.
/// Primary use is tests and embedded consumers that manage persistence
/// themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Option<Session>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store (test convenience).
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<Session> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn replace_access_token(&self, access_token: &str) -> Result<(), SessionError> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        match guard.as_mut() {
            Some(session) => {
                session.access_token = access_token.to_string();
                Ok(())
            }
            None => Err(SessionError::NotAuthenticated),
        }
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
