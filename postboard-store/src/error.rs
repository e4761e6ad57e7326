//! Error types for postboard-store — Railway Programming
//!
//! All operations return `Result<T, StoreError>`.
//! No panics, no unwraps in production code paths.

use std::fmt;

use thiserror::Error;

/// Why a session token was rejected
///
/// The HTTP gate folds these into 401/403, but the store keeps them apart so
/// callers and tests can tell an absent token from a forged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    Missing,
    Malformed,
    Expired,
    BadSignature,
}

impl AuthFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::Expired => "expired",
            Self::BadSignature => "bad signature",
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for all store operations
#[derive(Error, Debug)]
pub enum StoreError {
    // ─── Domain Errors ───

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // ─── Auth Errors ───

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token rejected: {0}")]
    Auth(AuthFailure),

    // ─── Storage Errors ───

    #[error("Corrupt data in collection {collection}: {detail}")]
    CorruptData { collection: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // ─── Infrastructure Errors ───

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Actor unavailable: {0}")]
    ActorUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// True for failures of the backing files rather than of the request
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::CorruptData { .. } | Self::Io(_) | Self::Serialization(_)
        )
    }
}

impl From<AuthFailure> for StoreError {
    fn from(reason: AuthFailure) -> Self {
        StoreError::Auth(reason)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Internal(format!("Blocking task failed: {err}"))
    }
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
