use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Token is missing")]
    TokenMissing,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Token is invalid")]
    TokenInvalid,
    #[error("Internal error: {0}")]
    Internal(String),
}
