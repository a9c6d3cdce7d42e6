use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Rejected credentials. Surfaces as a plain bad request, not a 401.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// The caller's identity no longer resolves to a user.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
