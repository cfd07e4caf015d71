use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("email already registered")]
    DuplicateEmail,

    #[error("handle already taken")]
    DuplicateHandle,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("storage failure: {0}")]
    Storage(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}
