use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use autoservice_data::{JobStatus, Part, TenantFilter, TenantStore};

use crate::app::{dto, AppServices};
use crate::context::{PrincipalContext, TenantContext};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Login page. Echoes the location the user will be returned to.
pub async fn login(Query(query): Query<dto::LoginQuery>) -> impl IntoResponse {
    Json(serde_json::json!({
        "page": "login",
        "return_to": query.from.unwrap_or_else(|| "/dashboard".to_string()),
    }))
}

pub async fn unauthorized() -> impl IntoResponse {
    Json(serde_json::json!({
        "page": "unauthorized",
        "message": "You do not have access to this page.",
    }))
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let filter = TenantFilter::for_tenant(tenant.tenant_id());
    let ws = &services.workshop;

    let open_jobs = ws
        .jobs
        .query(&filter.and(|j: &autoservice_data::ServiceJob| {
            matches!(j.status, JobStatus::Open | JobStatus::InProgress)
        }))
        .len();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "tenant_id": tenant.tenant_id().to_string(),
            "user_id": principal.user_id().to_string(),
            "role": principal.role().as_str(),
            "customers": ws.customers.list(filter).len(),
            "vehicles": ws.vehicles.list(filter).len(),
            "open_jobs": open_jobs,
            "parts_to_reorder": ws.parts.query(&filter.and(Part::needs_reorder)).len(),
        })),
    )
        .into_response()
}
