//! Request extractors whose rejections answer with the JSON error body.

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts};

/// JSON request body; malformed or mistyped input becomes `400`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Path parameters; a non-numeric id becomes `400`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);
