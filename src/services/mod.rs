//! Workflows behind the storefront and admin pages.
//!
//! Each module drives one resource: it validates drafts, calls the
//! repository seam, applies optimistic edits with rollback, and queues the
//! exact Vietnamese notices the pages show. Admin list refreshes silently
//! skip when no token is stored; the server still enforces authentication
//! on every write.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

pub mod auth;
pub mod blog;
pub mod contact;
pub mod dashboard;
pub mod image;
pub mod order;
pub mod service;
pub mod site;
pub mod user;

#[derive(Debug, Error)]
/// Errors surfaced by the service layer.
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint error: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}
