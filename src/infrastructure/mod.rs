//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - In-process store implementing every repository

pub mod memory;
pub mod persistence;

use std::sync::Arc;

use sqlx::PgPool;

use crate::domain::repositories::{
    ClickRepository, LinkRepository, SessionRepository, UserRepository,
};
use memory::InMemoryStore;
use persistence::{PgClickRepository, PgLinkRepository, PgSessionRepository, PgUserRepository};

/// One implementation of each repository port.
#[derive(Clone)]
pub struct Repositories {
    pub links: Arc<dyn LinkRepository>,
    pub clicks: Arc<dyn ClickRepository>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Repositories {
    /// PostgreSQL repositories sharing one connection pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            links: Arc::new(PgLinkRepository::new(pool.clone())),
            clicks: Arc::new(PgClickRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(pool)),
        }
    }

    /// Every port backed by a single fresh [`InMemoryStore`].
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            links: store.clone(),
            clicks: store.clone(),
            users: store.clone(),
            sessions: store,
        }
    }
}
