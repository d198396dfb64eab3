//! JSON API and the redirect endpoint.
//!
//! # Modules
//!
//! - [`dto`] - Request and response bodies
//! - [`handlers`] - Endpoint handlers, including `GET /{code}`
//! - [`middleware`] - Bearer session layers and request tracing
//! - [`routes`] - Route groups mounted under `/api`

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
