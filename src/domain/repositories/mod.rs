//! Repository trait definitions for the domain layer.
//!
//! These traits are the persistence ports of the service. Implementations live
//! in `crate::infrastructure`: PostgreSQL adapters for production and an
//! in-memory store for tests and local runs.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link CRUD and click counter
//! - [`ClickRepository`] - Append-only click log and reporting queries
//! - [`UserRepository`] - Registered accounts
//! - [`SessionRepository`] - Signed-in sessions
//!
//! Mock implementations are generated with `mockall` under `cfg(test)`.

pub mod click_repository;
pub mod link_repository;
pub mod session_repository;
pub mod user_repository;

pub use click_repository::{BreakdownEntry, ClickDimension, ClickRepository, DailyCount};
pub use link_repository::LinkRepository;
pub use session_repository::SessionRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
