//! Request and response bodies of the JSON API.
//!
//! Request bodies are checked with `validator` before they reach a service.

pub mod auth;
pub mod clicks;
pub mod health;
pub mod links;
pub mod pagination;
pub mod stats;
