//! Guard for platform-operator routes (superadmin only).

use crate::guard::{GrantedAccess, GuardOutcome, Redirect, RedirectReason};
use crate::{RoutePaths, Session, SessionSource};

#[derive(Debug, Clone)]
pub struct SuperadminGuard<S> {
    source: S,
    paths: RoutePaths,
}

impl<S: SessionSource> SuperadminGuard<S> {
    pub fn new(source: S, paths: RoutePaths) -> Self {
        Self { source, paths }
    }

    pub fn check(&self, path: &str) -> GuardOutcome {
        let session = self.source.current();
        let outcome = evaluate_superadmin(&session, &self.paths);
        tracing::debug!(path, ?outcome, "superadmin guard evaluated");
        outcome
    }
}

/// Loading while anything is unresolved, otherwise superadmin or unauthorized.
pub fn evaluate_superadmin(session: &Session, paths: &RoutePaths) -> GuardOutcome {
    if session.loading {
        return GuardOutcome::Loading;
    }

    let (Some(user), Some(profile)) = (session.user.as_ref(), session.profile.as_ref()) else {
        if session.is_authenticated() {
            // Signed in, profile still on its way.
            return GuardOutcome::Loading;
        }
        return GuardOutcome::Redirect(Redirect::replace(
            &paths.unauthorized,
            RedirectReason::NotSuperadmin,
        ));
    };

    if !profile.role.is_superadmin() {
        return GuardOutcome::Redirect(Redirect::replace(
            &paths.unauthorized,
            RedirectReason::NotSuperadmin,
        ));
    }

    GuardOutcome::Render(GrantedAccess {
        user_id: user.id,
        tenant_id: profile.tenant_id,
        role: profile.role.clone(),
    })
}
