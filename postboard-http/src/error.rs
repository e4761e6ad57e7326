//! Maps store errors onto HTTP responses
//!
//! Bodies are always `{ "message": ... }`. Storage failures are logged in
//! full and reported to clients as a bare "Server error".

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use postboard_store::{AuthFailure, StoreError};

/// Error returned from every handler
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            StoreError::Auth(AuthFailure::Missing) => StatusCode::UNAUTHORIZED,
            StoreError::Auth(_) => StatusCode::FORBIDDEN,
            StoreError::Forbidden(_) => StatusCode::FORBIDDEN,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Conflict(_) => StatusCode::CONFLICT,
            StoreError::CorruptData { .. }
            | StoreError::Io(_)
            | StoreError::Serialization(_)
            | StoreError::Config(_)
            | StoreError::ActorUnavailable(_)
            | StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            StoreError::Validation(msg) => msg.clone(),
            StoreError::InvalidCredentials => "Invalid credentials".into(),
            StoreError::Auth(AuthFailure::Missing) => "No token provided".into(),
            StoreError::Auth(_) => "Invalid token".into(),
            StoreError::Forbidden(_) => "Not authorized".into(),
            StoreError::NotFound(what) => format!("Not found: {what}"),
            StoreError::Conflict(msg) => msg.clone(),
            _ => "Server error".into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(StoreError::Validation(format!(
            "invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}
