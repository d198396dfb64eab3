//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without behaviour beyond small helpers.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code mapped to a destination URL
//! - [`Click`] - A single recorded visit of a link
//! - [`User`] - A registered account that may own links
//! - [`Session`] - A signed-in session of a user
//!
//! Creation inputs use separate structs (`NewLink`, `NewClick`, `NewUser`,
//! `NewSession`) so that store-assigned fields never have to be invented.

pub mod click;
pub mod link;
pub mod user;

pub use click::{Click, NewClick};
pub use link::{Link, NewLink};
pub use user::{NewSession, NewUser, Session, User};
