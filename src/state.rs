//! Shared application state injected into every handler.

use std::sync::Arc;

use chrono::TimeDelta;

use crate::application::services::{AuthService, LinkService, RedirectService, StatsService};
use crate::config::Config;
use crate::domain::visitor::{HeaderLocator, VisitorLocator};
use crate::infrastructure::Repositories;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub stats_service: Arc<StatsService>,
    pub auth_service: Arc<AuthService>,
    /// Where visitors go when a redirect lookup fails for infrastructure reasons.
    pub fallback_url: String,
    /// Request header carrying the visitor country, if trusted.
    pub country_header: Option<String>,
}

impl AppState {
    /// Wires services over the given repositories.
    pub fn new(config: &Config, repositories: Repositories) -> Self {
        let locator: Arc<dyn VisitorLocator> =
            Arc::new(HeaderLocator::new(config.geo_fallback_country.clone()));

        Self::with_locator(config, repositories, locator)
    }

    /// Like [`AppState::new`] with a custom geolocation strategy.
    pub fn with_locator(
        config: &Config,
        repositories: Repositories,
        locator: Arc<dyn VisitorLocator>,
    ) -> Self {
        let link_service = LinkService::new(
            repositories.links.clone(),
            config.base_url.clone(),
            config.attribute_links,
        );

        let redirect_service = RedirectService::new(
            repositories.links.clone(),
            repositories.clicks.clone(),
            locator,
        );

        let stats_service = StatsService::new(repositories.links, repositories.clicks);

        let auth_service = AuthService::new(
            repositories.users,
            repositories.sessions,
            config.session_signing_secret.clone(),
            TimeDelta::hours(config.session_ttl_hours),
        );

        Self {
            link_service: Arc::new(link_service),
            redirect_service: Arc::new(redirect_service),
            stats_service: Arc::new(stats_service),
            auth_service: Arc::new(auth_service),
            fallback_url: config.fallback_url.clone(),
            country_header: config.geo_country_header.clone(),
        }
    }
}
