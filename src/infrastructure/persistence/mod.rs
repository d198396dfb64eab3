//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries over a shared connection pool. Schema lives in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and the click counter
//! - [`PgClickRepository`] - Click log and reporting queries
//! - [`PgUserRepository`] - Registered accounts
//! - [`PgSessionRepository`] - Session digests

pub mod db_error;
pub mod pg_click_repository;
pub mod pg_link_repository;
pub mod pg_session_repository;
pub mod pg_user_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_session_repository::PgSessionRepository;
pub use pg_user_repository::PgUserRepository;
