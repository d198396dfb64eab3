//! Repository trait for registered accounts.

use crate::domain::entities::{NewUser, User};
use crate::domain::errors::RepositoryError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] if the email is already registered.
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError>;

    /// Finds an account by email. Emails are stored lowercased.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;
}
