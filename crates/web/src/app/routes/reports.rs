use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{Duration, Utc};

use autoservice_data::{ReportPeriod, TenantFilter, technician_performance};

use crate::app::{dto, AppServices};
use crate::context::TenantContext;

const DEFAULT_WINDOW_DAYS: u32 = 30;

pub fn router() -> Router {
    Router::new().route("/reports/technicians", get(technicians))
}

pub async fn technicians(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Query(query): Query<dto::ReportQuery>,
) -> axum::response::Response {
    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS).clamp(1, 366);
    let to = Utc::now();
    let period = ReportPeriod {
        from: to - Duration::days(i64::from(days)),
        to,
    };

    let rows = technician_performance(
        &services.workshop,
        TenantFilter::for_tenant(tenant.tenant_id()),
        &period,
    );
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "from": period.from,
            "to": period.to,
            "technicians": rows,
        })),
    )
        .into_response()
}
