//! Well-known redirect targets used by the guards.

use std::borrow::Cow;

/// Paths the guards redirect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePaths {
    pub login: Cow<'static, str>,
    pub unauthorized: Cow<'static, str>,
    pub change_password: Cow<'static, str>,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            login: Cow::Borrowed("/login"),
            unauthorized: Cow::Borrowed("/unauthorized"),
            change_password: Cow::Borrowed("/change-password"),
        }
    }
}

impl RoutePaths {
    /// Whether `path` addresses the password-change page.
    ///
    /// Query strings and a single trailing slash are ignored.
    pub fn is_change_password(&self, path: &str) -> bool {
        normalize(path) == normalize(&self.change_password)
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.strip_suffix('/') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => path,
    }
}
