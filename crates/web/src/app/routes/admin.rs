//! Platform operator routes (superadmin only).

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/admin/tenants", get(list_tenants))
}

/// Tenants with data in this deployment and their record counts.
pub async fn list_tenants(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let tenants: Vec<_> = services
        .workshop
        .tenant_overview()
        .into_iter()
        .map(|(tenant_id, records)| {
            serde_json::json!({ "tenant_id": tenant_id.to_string(), "records": records })
        })
        .collect();

    tracing::info!(
        user_id = %principal.user_id(),
        tenants = tenants.len(),
        "tenant overview served"
    );
    (StatusCode::OK, Json(serde_json::json!({ "items": tenants }))).into_response()
}
