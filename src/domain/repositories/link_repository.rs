//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::InMemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `click_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] if the short code already exists.
    /// This is the authoritative uniqueness check.
    async fn create(&self, new_link: NewLink) -> Result<Link, RepositoryError>;

    /// Finds a link by exact, case-sensitive short code.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, RepositoryError>;

    /// Lists links newest first, optionally restricted to one owner.
    async fn list(
        &self,
        owner: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Link>, RepositoryError>;

    /// Counts links, optionally restricted to one owner.
    async fn count(&self, owner: Option<i64>) -> Result<i64, RepositoryError>;

    /// Atomically adds one to the link's click counter.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if the link no longer exists.
    async fn increment_click_count(&self, id: i64) -> Result<(), RepositoryError>;

    /// Deletes a link and its clicks. Returns `Ok(false)` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}
