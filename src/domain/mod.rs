//! Domain layer containing business entities and ports.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Persistence ports (traits)
//! - [`visitor`] - Visitor metadata and the geolocation port
//! - [`errors`] - Error taxonomy shared with the application layer
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Business flows live in [`crate::application::services`].

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod visitor;
