//! HTTP error mapping.
//!
//! # Invariants
//! - Caller errors keep their message; storage and internal failures are
//!   logged and answered with a generic body.
//! - Error bodies are always `{"error": "..."}`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};
use taskboard_core::db::DbError;
use taskboard_core::ServiceError;

/// Error returned by request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Use-case failure from a core service.
    Service(ServiceError),
    /// Per-request connection could not be opened.
    Db(DbError),
    /// Blocking storage task panicked or was cancelled.
    Join(String),
    /// Request body or path could not be decoded.
    Rejected(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Join(message) => write!(f, "storage task failed: {message}"),
            Self::Rejected(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Join(_) | Self::Rejected(_) => None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejected(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::Rejected(value.body_text())
    }
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Service(ServiceError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Service(ServiceError::BadRequest(_)) | Self::Rejected(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Service(ServiceError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Self::Service(ServiceError::PasswordHash(_) | ServiceError::Repo(_))
            | Self::Db(_)
            | Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!(
                "event=http_error module=server status=error code={} error={}",
                status.as_u16(),
                self
            );
            "internal server error".to_string()
        } else {
            warn!(
                "event=http_error module=server status=rejected code={} error={}",
                status.as_u16(),
                self
            );
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
