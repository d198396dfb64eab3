//! Visitor metadata and coarse geolocation.
//!
//! Country lookup is a port so that a real IP-based service can replace the
//! header/placeholder implementations without touching the redirect flow.

use async_trait::async_trait;

/// Request metadata captured for a single visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorMetadata {
    pub user_agent: Option<String>,
    /// Country code supplied by a fronting proxy, if any.
    pub country_hint: Option<String>,
}

/// Resolves a visitor to a coarse country label.
///
/// Implementations never fail: when no location is known they return their
/// configured placeholder.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitorLocator: Send + Sync {
    async fn locate(&self, visitor: &VisitorMetadata) -> String;
}

/// Always returns the same country label.
#[derive(Debug, Clone)]
pub struct FixedLocator {
    country: String,
}

impl FixedLocator {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
        }
    }
}

#[async_trait]
impl VisitorLocator for FixedLocator {
    async fn locate(&self, _visitor: &VisitorMetadata) -> String {
        self.country.clone()
    }
}

/// Trusts the country hint set by a reverse proxy (e.g. `CF-IPCountry`).
///
/// Hints must be two ASCII letters; anything else (including Cloudflare's
/// `XX` and `T1` markers) falls back to the placeholder.
#[derive(Debug, Clone)]
pub struct HeaderLocator {
    fallback: String,
}

impl HeaderLocator {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
        }
    }
}

#[async_trait]
impl VisitorLocator for HeaderLocator {
    async fn locate(&self, visitor: &VisitorMetadata) -> String {
        visitor
            .country_hint
            .as_deref()
            .filter(|hint| {
                hint.len() == 2
                    && hint.chars().all(|c| c.is_ascii_alphabetic())
                    && !hint.eq_ignore_ascii_case("XX")
            })
            .map(str::to_ascii_uppercase)
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(hint: Option<&str>) -> VisitorMetadata {
        VisitorMetadata {
            user_agent: None,
            country_hint: hint.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_fixed_locator_ignores_hint() {
        let locator = FixedLocator::new("Unknown");
        assert_eq!(locator.locate(&visitor(Some("DE"))).await, "Unknown");
    }

    #[tokio::test]
    async fn test_header_locator_uses_valid_hint() {
        let locator = HeaderLocator::new("Unknown");
        assert_eq!(locator.locate(&visitor(Some("et"))).await, "ET");
    }

    #[tokio::test]
    async fn test_header_locator_falls_back() {
        let locator = HeaderLocator::new("Unknown");
        assert_eq!(locator.locate(&visitor(None)).await, "Unknown");
        assert_eq!(locator.locate(&visitor(Some("XX"))).await, "Unknown");
        assert_eq!(locator.locate(&visitor(Some("T1"))).await, "Unknown");
        assert_eq!(locator.locate(&visitor(Some("Germany"))).await, "Unknown");
    }
}
