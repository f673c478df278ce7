//! Identity-provider boundary.
//!
//! The hosted identity provider is reached through [`SessionProvider`], which
//! is injected into the router. [`InMemorySessionProvider`] stands in for it
//! in development and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use autoservice_auth::{Session, SessionHandle};
use autoservice_core::UserId;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("unknown user {0}")]
    UnknownUser(UserId),

    #[error("password rejected: {0}")]
    WeakPassword(String),

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Session for a bearer token. Unknown or absent tokens resolve to an
    /// anonymous session, never an error.
    async fn resolve(&self, token: Option<&str>) -> SessionHandle;

    /// Set a new password and clear the must-change flag on the account.
    async fn complete_password_change(
        &self,
        user_id: UserId,
        new_password: &str,
    ) -> Result<(), ProviderError>;
}

/// Token → session map. Sessions registered here can be mutated through the
/// returned handle to simulate the provider resolving them later.
#[derive(Debug, Default)]
pub struct InMemorySessionProvider {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, token: impl Into<String>, session: Session) -> SessionHandle {
        let handle = SessionHandle::new(session);
        if let Ok(mut map) = self.sessions.write() {
            map.insert(token.into(), handle.clone());
        }
        handle
    }

    fn handles_for(&self, user_id: UserId) -> Vec<SessionHandle> {
        let Ok(map) = self.sessions.read() else {
            return Vec::new();
        };
        map.values()
            .filter(|h| {
                h.snapshot()
                    .user
                    .as_ref()
                    .is_some_and(|u| u.id == user_id)
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SessionProvider for InMemorySessionProvider {
    async fn resolve(&self, token: Option<&str>) -> SessionHandle {
        let found = token.and_then(|t| {
            let map = self.sessions.read().ok()?;
            map.get(t).cloned()
        });
        found.unwrap_or_else(|| SessionHandle::new(Session::anonymous()))
    }

    async fn complete_password_change(
        &self,
        user_id: UserId,
        new_password: &str,
    ) -> Result<(), ProviderError> {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ProviderError::WeakPassword(format!(
                "must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let handles = self.handles_for(user_id);
        if handles.is_empty() {
            return Err(ProviderError::UnknownUser(user_id));
        }
        for handle in handles {
            handle.update(|s| {
                if let Some(user) = s.user.as_mut() {
                    user.metadata.must_change_password = false;
                }
            });
        }
        tracing::info!(%user_id, "password changed");
        Ok(())
    }
}
