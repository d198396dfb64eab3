//! Repository trait for signed-in sessions.

use crate::domain::entities::{NewSession, Session};
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Session storage keyed by the HMAC digest of the bearer token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, new_session: NewSession) -> Result<Session, RepositoryError>;

    /// Returns the session if it exists and has not expired at `now`.
    async fn find_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, RepositoryError>;

    /// Removes a session. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, token_hash: &str) -> Result<bool, RepositoryError>;

    /// Removes every session expired at `now` and returns how many were removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError>;
}
