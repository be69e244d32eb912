//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into board/list/card/auth use-cases.
//! - Resolve parent references before writes and map misses to semantic
//!   errors.
//!
//! # Invariants
//! - Services hold no state across calls beyond their repositories.
//! - Every error reaching callers is one of the `ServiceError` kinds.

use crate::repo::{EntityKind, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod auth_service;
pub mod board_service;
pub mod card_service;
pub mod list_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing error for all use-case services.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced record does not exist.
    NotFound { kind: EntityKind, id: i64 },
    /// Write would duplicate a unique value.
    Conflict(String),
    /// Request is missing a required field or carries an invalid one.
    BadRequest(&'static str),
    /// Credentials did not match.
    Unauthorized,
    /// Password hashing backend failed.
    PasswordHash(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Conflict(message) => write!(f, "{message}"),
            Self::BadRequest(message) => write!(f, "{message}"),
            Self::Unauthorized => write!(f, "invalid username or password"),
            Self::PasswordHash(message) => write!(f, "password hashing failed: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            RepoError::UniqueViolation(column) => {
                Self::Conflict(format!("duplicate value for `{column}`"))
            }
            other => Self::Repo(other),
        }
    }
}
