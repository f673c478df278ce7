use axum::{routing::get, Router};

pub mod account;
pub mod admin;
pub mod customers;
pub mod inventory;
pub mod personnel;
pub mod reports;
pub mod system;

/// Routes open to any signed-in member of a verified tenant.
pub fn member_router() -> Router {
    Router::new()
        .route("/dashboard", get(system::dashboard))
        .merge(customers::router())
        .merge(inventory::router())
        .merge(account::router())
}
