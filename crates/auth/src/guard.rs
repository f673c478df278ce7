//! Access guard for tenant-scoped routes.
//!
//! Evaluation order (first match wins):
//!
//! 1. session still loading → [`GuardOutcome::Loading`]
//! 2. nobody signed in → login, remembering where the user was headed
//! 3. profile not fetched yet (tenant unchecked) → [`GuardOutcome::Loading`]
//! 4. profile without a tenant → unauthorized
//! 5. password change pending and not already on that page → change-password
//! 6. route restricted to roles the user does not hold → unauthorized
//! 7. render
//!
//! Step 5 is the only place the password-change rule is enforced.

use std::collections::BTreeSet;

use serde::Serialize;

use autoservice_core::{TenantId, UserId};

use crate::{Role, RoutePaths, Session, SessionSource, TenantClaim};

/// Roles a route accepts. Empty means "any authenticated tenant member".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRequirement {
    pub allowed_roles: BTreeSet<Role>,
}

impl RouteRequirement {
    pub fn any_role() -> Self {
        Self::default()
    }

    pub fn roles<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Self {
            allowed_roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn admits(&self, role: &Role) -> bool {
        self.allowed_roles.is_empty() || self.allowed_roles.contains(role)
    }
}

/// Identity handed to protected content once access is granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantedAccess {
    pub user_id: UserId,
    /// Always set by [`AccessGuard`]; a superadmin may have no home tenant.
    pub tenant_id: Option<TenantId>,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    Unauthenticated,
    TenantUnverified,
    PasswordChangeRequired,
    RoleNotAllowed,
    NotSuperadmin,
}

/// Navigation instruction produced by a guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    /// Originating location, kept so login can send the user back.
    pub from: Option<String>,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
    pub reason: RedirectReason,
}

impl Redirect {
    pub(crate) fn replace(to: &str, reason: RedirectReason) -> Self {
        Self {
            to: to.to_string(),
            from: None,
            replace: true,
            reason,
        }
    }

    fn with_origin(mut self, from: &str) -> Self {
        self.from = Some(from.to_string());
        self
    }

    /// Target with the origin appended as a `from` query parameter.
    pub fn location(&self) -> String {
        match &self.from {
            Some(from) => {
                let sep = if self.to.contains('?') { '&' } else { '?' };
                format!("{}{}from={}", self.to, sep, urlencoding::encode(from))
            }
            None => self.to.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    /// Not decidable yet; show a loading indicator.
    Loading,
    Render(GrantedAccess),
    Redirect(Redirect),
}

impl GuardOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, GuardOutcome::Loading)
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            GuardOutcome::Redirect(r) => Some(r),
            _ => None,
        }
    }
}

/// Guard for routes that need a signed-in member of a verified tenant.
#[derive(Debug, Clone)]
pub struct AccessGuard<S> {
    source: S,
    paths: RoutePaths,
}

impl<S: SessionSource> AccessGuard<S> {
    pub fn new(source: S, paths: RoutePaths) -> Self {
        Self { source, paths }
    }

    pub fn paths(&self) -> &RoutePaths {
        &self.paths
    }

    /// Decide what to do for `path` given the current session.
    pub fn check(&self, requirement: &RouteRequirement, path: &str) -> GuardOutcome {
        let session = self.source.current();
        let outcome = evaluate(&session, &self.paths, requirement, path);
        tracing::debug!(path, ?outcome, "access guard evaluated");
        outcome
    }
}

/// The guard's state machine, free of any session source.
pub fn evaluate(
    session: &Session,
    paths: &RoutePaths,
    requirement: &RouteRequirement,
    path: &str,
) -> GuardOutcome {
    if session.loading {
        return GuardOutcome::Loading;
    }

    let Some(user) = session.user.as_ref() else {
        return GuardOutcome::Redirect(
            Redirect::replace(&paths.login, RedirectReason::Unauthenticated).with_origin(path),
        );
    };

    let tenant_id = match session.tenant_claim() {
        TenantClaim::Unchecked => return GuardOutcome::Loading,
        TenantClaim::Missing => {
            return GuardOutcome::Redirect(Redirect::replace(
                &paths.unauthorized,
                RedirectReason::TenantUnverified,
            ));
        }
        TenantClaim::Verified(id) => id,
    };

    if user.metadata.must_change_password && !paths.is_change_password(path) {
        return GuardOutcome::Redirect(Redirect::replace(
            &paths.change_password,
            RedirectReason::PasswordChangeRequired,
        ));
    }

    // tenant_claim() is Verified only when a profile exists.
    let Some(role) = session.role() else {
        return GuardOutcome::Loading;
    };

    if !requirement.admits(role) {
        return GuardOutcome::Redirect(Redirect::replace(
            &paths.unauthorized,
            RedirectReason::RoleNotAllowed,
        ));
    }

    GuardOutcome::Render(GrantedAccess {
        user_id: user.id,
        tenant_id: Some(tenant_id),
        role: role.clone(),
    })
}
