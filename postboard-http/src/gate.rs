//! Request gate — bearer token extraction for protected routes
//!
//! Handlers that take an [`AuthUser`] never run for unauthenticated
//! requests: the extractor rejects them first with 401 (no token) or 403
//! (token present but invalid, expired, or forged).

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tracing::debug;

use postboard_store::{AuthFailure, StoreError};

use crate::error::ApiError;
use crate::AppState;

/// Id of the user a valid bearer token was issued to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let user_id = state.board.users.verify_token(token).map_err(|e| {
            debug!(error = %e, path = %parts.uri.path(), "Gate rejected request");
            ApiError::from(e)
        })?;
        Ok(AuthUser(user_id))
    }
}

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = match headers.get(AUTHORIZATION) {
        Some(value) => value,
        None => return Err(rejected(AuthFailure::Missing)),
    };
    let value = value
        .to_str()
        .map_err(|_| rejected(AuthFailure::Malformed))?
        .trim();
    if value.is_empty() || value.eq_ignore_ascii_case("bearer") {
        return Err(rejected(AuthFailure::Missing));
    }

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() {
                Err(rejected(AuthFailure::Missing))
            } else {
                Ok(token)
            }
        }
        _ => Err(rejected(AuthFailure::Malformed)),
    }
}

fn rejected(reason: AuthFailure) -> ApiError {
    ApiError(StoreError::Auth(reason))
}
