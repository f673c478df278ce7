use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use autoservice_data::{Customer, TenantFilter, TenantStore, Vehicle};

use crate::app::{dto, errors, AppServices};
use crate::context::TenantContext;

pub fn router() -> Router {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/:id/vehicles", get(list_customer_vehicles))
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
) -> axum::response::Response {
    let items = services
        .workshop
        .customers
        .list(TenantFilter::for_tenant(tenant.tenant_id()));
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Json(body): Json<dto::CreateCustomerRequest>,
) -> axum::response::Response {
    let customer = match Customer::new(
        tenant.tenant_id(),
        &body.name,
        body.phone.as_deref(),
        body.email.as_deref(),
    ) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.workshop.customers.insert(customer.clone());
    tracing::info!(tenant_id = %tenant.tenant_id(), customer_id = %customer.id, "customer created");
    (StatusCode::CREATED, Json(customer)).into_response()
}

pub async fn list_customer_vehicles(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let customer_id = match dto::parse_record_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let filter = TenantFilter::for_tenant(tenant.tenant_id());

    // Another tenant's customer id is indistinguishable from an unknown one.
    if services.workshop.customers.get(filter, customer_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found");
    }

    let items = services
        .workshop
        .vehicles
        .query(&filter.and(move |v: &Vehicle| v.customer_id == customer_id));
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn list_vehicles(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
) -> axum::response::Response {
    let items = services
        .workshop
        .vehicles
        .list(TenantFilter::for_tenant(tenant.tenant_id()));
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn create_vehicle(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(tenant): Extension<TenantContext>,
    Json(body): Json<dto::CreateVehicleRequest>,
) -> axum::response::Response {
    let customer_id = match dto::parse_record_id(&body.customer_id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let filter = TenantFilter::for_tenant(tenant.tenant_id());
    if services.workshop.customers.get(filter, customer_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found");
    }

    let vehicle = match Vehicle::new(
        tenant.tenant_id(),
        customer_id,
        &body.vin,
        &body.make,
        &body.model,
        body.year,
        body.plate.as_deref(),
    ) {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.workshop.vehicles.insert(vehicle.clone());
    (StatusCode::CREATED, Json(vehicle)).into_response()
}
