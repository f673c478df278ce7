use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier attached to a user profile by the identity provider.
///
/// Roles are opaque strings; the constants below are the ones the workshop
/// application assigns, but unknown roles still compare by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const SUPERADMIN: Role = Role(Cow::Borrowed("superadmin"));
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));
    pub const CONSULTANT: Role = Role(Cow::Borrowed("consultant"));
    pub const TECHNICIAN: Role = Role(Cow::Borrowed("technician"));
    pub const ACCOUNTANT: Role = Role(Cow::Borrowed("accountant"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Platform operator role, above any single tenant.
    pub fn is_superadmin(&self) -> bool {
        self.as_str() == Self::SUPERADMIN.as_str()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Role {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}
