//! HTTP application wiring.
//!
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: request bodies and query strings
//! - `errors.rs`: JSON error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use autoservice_auth::{Role, RoutePaths, RouteRequirement};
use autoservice_data::Workshop;

use crate::config::AppConfig;
use crate::middleware::{self, GuardRule, GuardState};
use crate::session::SessionProvider;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared handler dependencies.
#[derive(Clone)]
pub struct AppServices {
    pub workshop: Workshop,
    pub provider: Arc<dyn SessionProvider>,
}

/// Build the full HTTP router (used by `main.rs` and the black-box tests).
pub fn build_app(
    config: &AppConfig,
    provider: Arc<dyn SessionProvider>,
    workshop: Workshop,
) -> Router {
    let services = Arc::new(AppServices {
        workshop,
        provider: provider.clone(),
    });

    let guard = GuardState {
        provider,
        paths: RoutePaths::default(),
        loading_wait: config.loading_wait,
        rule: GuardRule::Member(RouteRequirement::any_role()),
    };

    // route_layer: unmatched paths fall through to the plain 404.
    let guarded = |router: Router, rule: GuardRule| {
        router.route_layer(axum::middleware::from_fn_with_state(
            guard.with_rule(rule),
            middleware::guard_middleware,
        ))
    };

    let members = guarded(
        routes::member_router(),
        GuardRule::Member(RouteRequirement::any_role()),
    );
    let personnel = guarded(
        routes::personnel::router(),
        GuardRule::Member(RouteRequirement::roles([Role::ADMIN])),
    );
    let reports = guarded(
        routes::reports::router(),
        GuardRule::Member(RouteRequirement::roles([Role::ADMIN, Role::CONSULTANT])),
    );
    let platform = guarded(routes::admin::router(), GuardRule::Superadmin);

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/login", get(routes::system::login))
        .route("/unauthorized", get(routes::system::unauthorized))
        .merge(members)
        .merge(personnel)
        .merge(reports)
        .merge(platform)
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
