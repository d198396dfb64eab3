//! User-agent classification for click analytics.

use woothee::parser::Parser;

/// Browser and device buckets derived from a raw `User-Agent` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub browser: String,
    pub device: String,
}

const UNKNOWN: &str = "Unknown";

/// Classifies a user agent into a browser name and a device bucket.
///
/// Device buckets are `desktop`, `mobile`, `bot` and `other`. Missing or
/// unrecognised agents map to `Unknown` / `other`.
pub fn classify_user_agent(user_agent: Option<&str>) -> AgentProfile {
    let Some(ua) = user_agent.filter(|s| !s.trim().is_empty()) else {
        return unknown();
    };

    match Parser::new().parse(ua) {
        Some(result) => {
            let browser = if result.name.is_empty() || result.name == "UNKNOWN" {
                UNKNOWN.to_string()
            } else {
                result.name.to_string()
            };

            let device = match result.category {
                "pc" => "desktop",
                "smartphone" | "mobilephone" => "mobile",
                "crawler" => "bot",
                _ => "other",
            };

            AgentProfile {
                browser,
                device: device.to_string(),
            }
        }
        None => unknown(),
    }
}

fn unknown() -> AgentProfile {
    AgentProfile {
        browser: UNKNOWN.to_string(),
        device: "other".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_chrome() {
        let profile = classify_user_agent(Some(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        ));
        assert_eq!(profile.browser, "Chrome");
        assert_eq!(profile.device, "desktop");
    }

    #[test]
    fn test_iphone_is_mobile() {
        let profile = classify_user_agent(Some(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
        ));
        assert_eq!(profile.device, "mobile");
    }

    #[test]
    fn test_googlebot_is_bot() {
        let profile = classify_user_agent(Some(
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
        ));
        assert_eq!(profile.device, "bot");
    }

    #[test]
    fn test_missing_agent_is_unknown() {
        assert_eq!(classify_user_agent(None), unknown());
        assert_eq!(classify_user_agent(Some("  ")), unknown());
    }
}
