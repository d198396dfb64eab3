//! Visitor metadata extraction from HTTP request headers.

use axum::http::{HeaderMap, header};

use crate::domain::visitor::VisitorMetadata;

/// Builds [`VisitorMetadata`] from request headers.
///
/// - `User-Agent` is copied verbatim
/// - `country_header` (for example `cf-ipcountry`, set by a fronting proxy) is
///   read as a country hint when configured
///
/// Headers with invalid UTF-8 are treated as absent.
pub fn visitor_from_headers(headers: &HeaderMap, country_header: Option<&str>) -> VisitorMetadata {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let country_hint = country_header
        .and_then(|name| headers.get(name))
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    VisitorMetadata {
        user_agent,
        country_hint,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extracts_user_agent_and_country() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("TestBot/1.0"));
        headers.insert("cf-ipcountry", HeaderValue::from_static(" ET "));

        let visitor = visitor_from_headers(&headers, Some("cf-ipcountry"));

        assert_eq!(visitor.user_agent.as_deref(), Some("TestBot/1.0"));
        assert_eq!(visitor.country_hint.as_deref(), Some("ET"));
    }

    #[test]
    fn test_country_header_disabled() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-ipcountry", HeaderValue::from_static("DE"));

        let visitor = visitor_from_headers(&headers, None);

        assert!(visitor.country_hint.is_none());
        assert!(visitor.user_agent.is_none());
    }

    #[test]
    fn test_invalid_utf8_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_bytes(&[0xFF, 0xFE]).unwrap(),
        );

        let visitor = visitor_from_headers(&headers, Some("cf-ipcountry"));

        assert!(visitor.user_agent.is_none());
    }
}
