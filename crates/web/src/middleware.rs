//! Route guarding for the HTTP router.
//!
//! Each guarded route group gets a [`GuardState`] naming its rule. The
//! middleware resolves the caller's session from the bearer token, runs the
//! matching guard (waiting briefly while the session is still loading) and
//! turns the outcome into a response.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{OriginalUri, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use autoservice_auth::{
    AccessGuard, GuardOutcome, Redirect, RoutePaths, RouteRequirement, SuperadminGuard,
};

use crate::context::{PrincipalContext, TenantContext};
use crate::session::SessionProvider;

#[derive(Debug, Clone)]
pub enum GuardRule {
    /// Signed-in member of a verified tenant, optionally restricted by role.
    Member(RouteRequirement),
    Superadmin,
}

#[derive(Clone)]
pub struct GuardState {
    pub provider: Arc<dyn SessionProvider>,
    pub paths: RoutePaths,
    pub loading_wait: Duration,
    pub rule: GuardRule,
}

impl GuardState {
    pub fn with_rule(&self, rule: GuardRule) -> Self {
        Self {
            rule,
            ..self.clone()
        }
    }
}

pub async fn guard_middleware(
    State(state): State<GuardState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = extract_bearer(req.headers());
    let path = request_path(&req);
    let handle = state.provider.resolve(token).await;

    let outcome = match &state.rule {
        GuardRule::Member(requirement) => {
            let guard = AccessGuard::new(handle.clone(), state.paths.clone());
            handle
                .settle(state.loading_wait, || guard.check(requirement, &path))
                .await
        }
        GuardRule::Superadmin => {
            let guard = SuperadminGuard::new(handle.clone(), state.paths.clone());
            handle
                .settle(state.loading_wait, || guard.check(&path))
                .await
        }
    };

    match outcome {
        GuardOutcome::Render(access) => {
            if let Some(tenant_id) = access.tenant_id {
                req.extensions_mut().insert(TenantContext::new(tenant_id));
            }
            req.extensions_mut().insert(PrincipalContext::from(&access));
            next.run(req).await
        }
        GuardOutcome::Redirect(redirect) => {
            tracing::info!(
                path = %path,
                to = %redirect.to,
                reason = ?redirect.reason,
                "request redirected"
            );
            redirect_response(&redirect)
        }
        GuardOutcome::Loading => loading_response(),
    }
}

/// `303 See Other`: the browser replaces the request with a GET to the
/// target and keeps no entry for the guarded URL.
fn redirect_response(redirect: &Redirect) -> Response {
    let location = redirect.location();
    match HeaderValue::from_str(&location) {
        Ok(value) => (StatusCode::SEE_OTHER, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!(%location, "redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn loading_response() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        [(header::RETRY_AFTER, HeaderValue::from_static("1"))],
        Json(json!({ "status": "loading" })),
    )
        .into_response()
}

/// Path and query of the URL the client asked for, before any nesting.
fn request_path(req: &axum::http::Request<axum::body::Body>) -> String {
    let uri = req
        .extensions()
        .get::<OriginalUri>()
        .map(|o| &o.0)
        .unwrap_or_else(|| req.uri());
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
