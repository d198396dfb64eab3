//! Stateless helpers shared across layers.
//!
//! - [`code_generator`] - short code generation, validation and bounded search
//! - [`url_normalizer`] - destination URL validation
//! - [`user_agent`] - browser/device classification for analytics
//! - [`request_metadata`] - visitor metadata from request headers
//! - [`password`] - Argon2id password hashing
//! - [`session_token`] - bearer token generation and digests

pub mod code_generator;
pub mod password;
pub mod request_metadata;
pub mod session_token;
pub mod url_normalizer;
pub mod user_agent;
