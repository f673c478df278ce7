use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use autoservice_core::DomainError;
use autoservice_data::{Part, TenantFilter, TenantStore};

use crate::app::{dto, errors, AppServices};
use crate::context::TenantContext;

pub fn router() -> Router {
    Router::new()
        .route("/inventory", get(list_parts))
        .route("/inventory/low-stock", get(low_stock))
        .route("/inventory/:id/adjust", post(adjust_stock))
}

pub async fn list_parts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
) -> axum::response::Response {
    let items = services
        .workshop
        .parts
        .list(TenantFilter::for_tenant(tenant.tenant_id()));
    let stock_value_cents: u64 = items.iter().map(Part::stock_value_cents).sum();
    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": items, "stock_value_cents": stock_value_cents })),
    )
        .into_response()
}

pub async fn low_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
) -> axum::response::Response {
    let items = services
        .workshop
        .parts
        .query(&TenantFilter::for_tenant(tenant.tenant_id()).and(Part::needs_reorder));
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::AdjustStockRequest>,
) -> axum::response::Response {
    let part_id = match dto::parse_record_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let filter = TenantFilter::for_tenant(tenant.tenant_id());

    let Some(mut part) = services.workshop.parts.get(filter, part_id) else {
        return errors::domain_error_to_response(DomainError::NotFound);
    };
    if let Err(e) = part.adjust_stock(body.delta) {
        return errors::domain_error_to_response(e);
    }

    services.workshop.parts.insert(part.clone());
    tracing::info!(
        tenant_id = %tenant.tenant_id(),
        sku = %part.sku,
        delta = body.delta,
        "stock adjusted"
    );
    (StatusCode::OK, Json(part)).into_response()
}
