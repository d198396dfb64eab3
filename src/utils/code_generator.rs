//! Short code generation and validation utilities.
//!
//! Provides uniform random code generation, validation of user-provided custom
//! codes, and the bounded search for an unused generated code.

use std::future::Future;
use std::sync::LazyLock;

use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;

use crate::domain::errors::InvalidCodeReason;

/// Length of generated codes. 62 symbols give roughly 5.7e10 combinations.
pub const GENERATED_CODE_LENGTH: usize = 6;

pub const MIN_CUSTOM_CODE_LENGTH: usize = 3;
pub const MAX_CUSTOM_CODE_LENGTH: usize = 20;

/// Number of generated candidates tried before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Codes that would shadow fixed routes.
pub const RESERVED_CODES: &[&str] = &["api", "health", "404", "static", "dashboard", "login", "admin"];

static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("custom code pattern is valid"));

/// Generates a random short code using the thread-local RNG.
///
/// Each of the [`GENERATED_CODE_LENGTH`] symbols is drawn uniformly from
/// `[A-Za-z0-9]`.
pub fn generate_code() -> String {
    generate_code_with(&mut rand::rng())
}

/// Generates a random short code from the given RNG.
pub fn generate_code_with<R: Rng>(rng: &mut R) -> String {
    (0..GENERATED_CODE_LENGTH)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Allowed characters: ASCII letters, digits, hyphens (checked first)
/// - Length: 3-20 characters
/// - Cannot be one of [`RESERVED_CODES`]
///
/// # Errors
///
/// Returns the specific [`InvalidCodeReason`] of the first rule violated.
pub fn validate_custom_code(code: &str) -> Result<(), InvalidCodeReason> {
    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(InvalidCodeReason::BadCharacters);
    }

    if code.len() < MIN_CUSTOM_CODE_LENGTH {
        return Err(InvalidCodeReason::TooShort);
    }

    if code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(InvalidCodeReason::TooLong);
    }

    if is_reserved_code(code) {
        return Err(InvalidCodeReason::Reserved);
    }

    Ok(())
}

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Returns true if `code` has a shape that some stored link could have.
///
/// Used by the redirect flow to skip lookups for paths that cannot match.
pub fn is_resolvable_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CUSTOM_CODE_LENGTH && CUSTOM_CODE_REGEX.is_match(code)
}

/// Result of searching for an unused generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Available(String),
    Exhausted { attempts: usize },
}

/// Draws candidates from `generate` until `is_available` accepts one.
///
/// Stops after `max_attempts` candidates and reports [`Probe::Exhausted`].
/// Errors from the availability check end the search immediately.
pub async fn first_available<G, F, Fut, E>(
    max_attempts: usize,
    mut generate: G,
    mut is_available: F,
) -> Result<Probe, E>
where
    G: FnMut() -> String,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    for attempt in 1..=max_attempts {
        let candidate = generate();

        if is_available(candidate.clone()).await? {
            return Ok(Probe::Available(candidate));
        }

        tracing::debug!(attempt, code = %candidate, "Generated short code collided");
        metrics::counter!("code_collisions_total").increment(1);
    }

    Ok(Probe::Exhausted {
        attempts: max_attempts,
    })
}
