//! Account registration and session authentication.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::info;

use crate::domain::entities::{NewSession, NewUser, User};
use crate::domain::errors::AuthError;
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::session_token::{generate_token, hash_token};

/// A session handed to a client after login.
///
/// `token` is the only copy of the bearer secret; the store keeps its digest.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}

/// Service for accounts and bearer sessions.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    signing_secret: String,
    session_ttl: TimeDelta,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - account storage
    /// - `sessions` - session storage
    /// - `signing_secret` - HMAC key; must match the value used when sessions were created
    /// - `session_ttl` - lifetime of newly issued sessions
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        signing_secret: String,
        session_ttl: TimeDelta,
    ) -> Self {
        Self {
            users,
            sessions,
            signing_secret,
            session_ttl,
        }
    }

    /// Registers a new account.
    ///
    /// Emails are compared case-insensitively and stored lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] if the email is already registered.
    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let user = self
            .users
            .create(NewUser {
                email,
                name: name.trim().to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Verifies credentials and opens a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email or a wrong
    /// password; the two cases are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthError> {
        let email = normalize_email(email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password = password.to_string();
        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let token = generate_token().map_err(|e| AuthError::Hashing(e.to_string()))?;
        let expires_at = Utc::now() + self.session_ttl;

        self.sessions
            .create(NewSession {
                token_hash: hash_token(&self.signing_secret, &token),
                user_id: user.id,
                expires_at,
            })
            .await?;

        info!(user_id = user.id, "Session opened");

        Ok(IssuedSession {
            token,
            user,
            expires_at,
        })
    }

    /// Revokes the session identified by `token`. Unknown tokens are ignored.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let removed = self
            .sessions
            .delete(&hash_token(&self.signing_secret, token))
            .await?;

        if removed {
            info!("Session closed");
        }

        Ok(())
    }

    /// Returns the user owning an active session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] if the token is unknown, expired
    /// or belongs to a deleted account.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let session = self
            .sessions
            .find_active(&token_hash, Utc::now())
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        self.users
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }

    /// Deletes every expired session and returns how many were removed.
    pub async fn purge_expired_sessions(&self) -> Result<u64, AuthError> {
        Ok(self.sessions.delete_expired(Utc::now()).await?)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Session;
    use crate::domain::errors::RepositoryError;
    use crate::domain::repositories::{MockSessionRepository, MockUserRepository};

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn user(password: &str) -> User {
        User {
            id: 7,
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn service(users: MockUserRepository, sessions: MockSessionRepository) -> AuthService {
        AuthService::new(
            Arc::new(users),
            Arc::new(sessions),
            test_secret(),
            TimeDelta::hours(1),
        )
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_hashes_password() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(|_| Ok(None));
        users
            .expect_create()
            .withf(|new_user| {
                new_user.email == "ada@example.com"
                    && new_user.name == "Ada"
                    && new_user.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: 1,
                    email: new_user.email,
                    name: new_user.name,
                    password_hash: new_user.password_hash,
                    created_at: Utc::now(),
                })
            });

        let created = service(users, MockSessionRepository::new())
            .register("  Ada@Example.com ", " Ada ", "hunter22")
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert!(verify_password("hunter22", &created.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(user("whatever"))));
        users.expect_create().times(0);

        let result = service(users, MockSessionRepository::new())
            .register("ada@example.com", "Ada", "hunter22")
            .await;

        assert_eq!(result.unwrap_err(), AuthError::EmailTaken);
    }

    #[tokio::test]
    async fn test_register_conflict_on_insert_is_email_taken() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .returning(|_| Err(RepositoryError::Conflict("users_email_key".to_string())));

        let result = service(users, MockSessionRepository::new())
            .register("ada@example.com", "Ada", "hunter22")
            .await;

        assert_eq!(result.unwrap_err(), AuthError::EmailTaken);
    }

    #[tokio::test]
    async fn test_login_issues_session_storing_only_digest() {
        let stored = user("hunter22");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_create()
            .withf(|new_session| new_session.user_id == 7 && new_session.token_hash.len() == 64)
            .times(1)
            .returning(|new_session| {
                Ok(Session {
                    token_hash: new_session.token_hash,
                    user_id: new_session.user_id,
                    created_at: Utc::now(),
                    expires_at: new_session.expires_at,
                })
            });

        let issued = service(users, sessions)
            .login("ADA@example.com", "hunter22")
            .await
            .unwrap();

        assert_eq!(issued.user.id, 7);
        assert_ne!(issued.token, hash_token(&test_secret(), &issued.token));
        assert!(issued.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let stored = user("hunter22");
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let mut sessions = MockSessionRepository::new();
        sessions.expect_create().times(0);

        let result = service(users, sessions).login("ada@example.com", "nope").await;

        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let result = service(users, MockSessionRepository::new())
            .login("ghost@example.com", "hunter22")
            .await;

        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let token = "valid-token";
        let expected_hash = hash_token(&test_secret(), token);

        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_active()
            .withf(move |hash, _| hash == expected_hash)
            .times(1)
            .returning(|hash, now| {
                Ok(Some(Session {
                    token_hash: hash.to_string(),
                    user_id: 7,
                    created_at: now,
                    expires_at: now + TimeDelta::hours(1),
                }))
            });

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .withf(|id| *id == 7)
            .returning(|_| Ok(Some(user("x"))));

        let authenticated = service(users, sessions).authenticate(token).await.unwrap();

        assert_eq!(authenticated.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_authenticate_unknown_token() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_active()
            .times(1)
            .returning(|_, _| Ok(None));

        let result = service(MockUserRepository::new(), sessions)
            .authenticate("invalid-token")
            .await;

        assert_eq!(result.unwrap_err(), AuthError::Unauthenticated);
    }

    #[tokio::test]
    async fn test_authenticate_store_failure() {
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_find_active()
            .returning(|_, _| Err(RepositoryError::Unavailable("down".to_string())));

        let result = service(MockUserRepository::new(), sessions)
            .authenticate("token")
            .await;

        assert_eq!(
            result.unwrap_err(),
            AuthError::PersistenceUnavailable("down".to_string())
        );
    }

    #[tokio::test]
    async fn test_logout_deletes_digest() {
        let expected_hash = hash_token(&test_secret(), "tok");
        let mut sessions = MockSessionRepository::new();
        sessions
            .expect_delete()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(true));

        assert!(
            service(MockUserRepository::new(), sessions)
                .logout("tok")
                .await
                .is_ok()
        );
    }
}
