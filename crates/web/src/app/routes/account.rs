//! Password change for accounts issued a temporary password.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{dto, errors, AppServices};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/change-password", get(change_password_form).post(change_password))
}

pub async fn change_password_form(
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "page": "change-password",
            "user_id": principal.user_id().to_string(),
            "min_length": crate::session::MIN_PASSWORD_LEN,
        })),
    )
        .into_response()
}

pub async fn change_password(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::ChangePasswordRequest>,
) -> axum::response::Response {
    match services
        .provider
        .complete_password_change(principal.user_id(), &body.new_password)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "password_changed" })),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(user_id = %principal.user_id(), error = %e, "password change rejected");
            errors::provider_error_to_response(e)
        }
    }
}
