//! Session contract consumed from the external identity provider.
//!
//! The provider owns and mutates these values; the guards take read-only
//! snapshots of them.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use autoservice_core::{TenantId, UserId};

use crate::Role;

/// Provider-side metadata stored on the user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    /// Set by an administrator when issuing a temporary password.
    #[serde(default)]
    pub must_change_password: bool,
}

/// Authenticated user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub metadata: UserMetadata,
}

/// Application profile row linked to an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub role: Role,
    /// `null`, a missing key and `""` all mean "no tenant assigned".
    #[serde(default, deserialize_with = "deserialize_tenant_id")]
    pub tenant_id: Option<TenantId>,
}

fn deserialize_tenant_id<'de, D>(deserializer: D) -> Result<Option<TenantId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Tenant verification state derived from a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantClaim {
    /// The profile has not been fetched yet; nothing can be decided.
    Unchecked,
    /// The profile was fetched and carries no tenant.
    Missing,
    Verified(TenantId),
}

/// Point-in-time view of the current user's session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The provider is still resolving authentication.
    #[serde(default)]
    pub loading: bool,
    pub user: Option<AuthUser>,
    pub profile: Option<UserProfile>,
}

impl Session {
    /// Session whose resolution is still in flight.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Resolved session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Resolved, authenticated session whose profile has not arrived yet.
    pub fn authenticated(user: AuthUser) -> Self {
        Self {
            loading: false,
            user: Some(user),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn must_change_password(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.metadata.must_change_password)
    }

    pub fn role(&self) -> Option<&Role> {
        self.profile.as_ref().map(|p| &p.role)
    }

    pub fn tenant_claim(&self) -> TenantClaim {
        match &self.profile {
            None => TenantClaim::Unchecked,
            Some(UserProfile {
                tenant_id: None, ..
            }) => TenantClaim::Missing,
            Some(UserProfile {
                tenant_id: Some(id),
                ..
            }) => TenantClaim::Verified(*id),
        }
    }
}

/// Anything a guard can read the current session from.
///
/// Guards receive their source at construction; there is no ambient,
/// process-wide session.
pub trait SessionSource {
    fn current(&self) -> Session;
}

impl SessionSource for Session {
    fn current(&self) -> Session {
        self.clone()
    }
}

impl<S> SessionSource for &S
where
    S: SessionSource + ?Sized,
{
    fn current(&self) -> Session {
        (**self).current()
    }
}

impl<S> SessionSource for Arc<S>
where
    S: SessionSource + ?Sized,
{
    fn current(&self) -> Session {
        (**self).current()
    }
}
