//! Destination URL validation.
//!
//! Accepts user input with or without a scheme. Inputs without one are assumed
//! to be HTTPS. The stored value is the (possibly prefixed) input text rather
//! than a re-serialized URL so that `example.com` stays `https://example.com`.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Validates `input` as a redirect destination and returns the value to store.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Inner whitespace and control characters are rejected
/// 3. Input without a scheme gets `https://` prepended
/// 4. Explicit schemes other than `http`/`https` are rejected
/// 5. The result must parse as an absolute URL with a host
///
/// # Errors
///
/// Returns [`UrlNormalizationError`] describing the first rule violated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com/path").unwrap(), "https://example.com/path");
/// assert!(normalize_url("not a url").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    if trimmed
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(UrlNormalizationError::InvalidFormat(
            "contains whitespace or control characters".to_string(),
        ));
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    } else {
        format!("https://{trimmed}")
    };

    let url =
        Url::parse(&candidate).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    Ok(candidate)
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input
        .get(..8)
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| input.to_ascii_lowercase());
    lower.starts_with("http://") || lower.starts_with("https://")
}
