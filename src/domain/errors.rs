//! Error types shared by the domain and application layers.
//!
//! - [`RepositoryError`] is what persistence ports return.
//! - [`ShortenError`] is the taxonomy of link allocation and redirect resolution.
//! - [`AuthError`] covers account and session operations.
//!
//! HTTP mapping lives in [`crate::error::AppError`].

/// Why a custom short code was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCodeReason {
    #[error("bad characters")]
    BadCharacters,

    #[error("too short")]
    TooShort,

    #[error("too long")]
    TooLong,

    #[error("reserved")]
    Reserved,
}

/// Failures reported by persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write. Carries the constraint name.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    #[error("record not found")]
    NotFound,

    /// The store could not be reached or failed for infrastructure reasons.
    #[error("persistence unavailable: {0}")]
    Unavailable(String),
}

/// Errors produced while allocating short codes and resolving redirects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortenError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid short code: {0}")]
    InvalidCode(InvalidCodeReason),

    #[error("short code '{0}' is already taken")]
    CodeTaken(String),

    #[error("unable to allocate a short code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error("{0} not found")]
    NotFound(String),

    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

impl From<RepositoryError> for ShortenError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(constraint) => Self::CodeTaken(constraint),
            RepositoryError::NotFound => Self::NotFound("record".to_string()),
            RepositoryError::Unavailable(reason) => Self::PersistenceUnavailable(reason),
        }
    }
}

/// Errors produced by account and session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    EmailTaken,

    #[error("missing, expired or revoked session")]
    Unauthenticated,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => Self::EmailTaken,
            RepositoryError::NotFound => Self::Unauthenticated,
            RepositoryError::Unavailable(reason) => Self::PersistenceUnavailable(reason),
        }
    }
}
