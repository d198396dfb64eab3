//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services hold repository trait objects so the
//! same code runs against PostgreSQL or the in-memory store.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Code allocation and link management
//! - [`services::redirect_service::RedirectService`] - Code resolution and click recording
//! - [`services::stats_service::StatsService`] - Dashboard analytics
//! - [`services::auth_service::AuthService`] - Accounts and bearer sessions

pub mod services;
