use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use autoservice_data::{Employee, TenantFilter, TenantStore};

use crate::app::{dto, errors, AppServices};
use crate::context::TenantContext;

pub fn router() -> Router {
    Router::new().route("/personnel", get(list_employees).post(create_employee))
}

pub async fn list_employees(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
) -> axum::response::Response {
    let items = services
        .workshop
        .employees
        .list(TenantFilter::for_tenant(tenant.tenant_id()));
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_employee(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Json(body): Json<dto::CreateEmployeeRequest>,
) -> axum::response::Response {
    match Employee::new(tenant.tenant_id(), &body.name, body.position) {
        Ok(employee) => {
            services.workshop.employees.insert(employee.clone());
            (StatusCode::CREATED, Json(employee)).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
