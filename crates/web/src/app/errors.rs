use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use autoservice_core::DomainError;

use crate::session::ProviderError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::Unauthorized => {
            json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized")
        }
    }
}

pub fn provider_error_to_response(err: ProviderError) -> axum::response::Response {
    match &err {
        ProviderError::WeakPassword(_) => {
            json_error(StatusCode::BAD_REQUEST, "weak_password", err.to_string())
        }
        ProviderError::UnknownUser(_) => {
            json_error(StatusCode::NOT_FOUND, "unknown_user", err.to_string())
        }
        ProviderError::Unavailable(_) => {
            json_error(StatusCode::BAD_GATEWAY, "provider_unavailable", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
