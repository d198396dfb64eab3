//! Short code resolution and click recording.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{Link, NewClick};
use crate::domain::errors::ShortenError;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::domain::visitor::{VisitorLocator, VisitorMetadata};
use crate::utils::code_generator::is_resolvable_code;
use crate::utils::user_agent::classify_user_agent;

/// What a redirect request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Send the visitor to this destination.
    Redirect(String),
    /// No link has this code.
    NotFound,
}

/// Service resolving short codes to destinations.
///
/// A successful resolution records a click and bumps the link's counter. Both
/// side effects are best effort: their failures are logged and counted but
/// never change the outcome returned to the visitor.
pub struct RedirectService {
    link_repository: Arc<dyn LinkRepository>,
    click_repository: Arc<dyn ClickRepository>,
    locator: Arc<dyn VisitorLocator>,
}

impl RedirectService {
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
        locator: Arc<dyn VisitorLocator>,
    ) -> Self {
        Self {
            link_repository,
            click_repository,
            locator,
        }
    }

    /// Resolves `code` for a visitor.
    ///
    /// Codes that cannot belong to any link are answered with
    /// [`RedirectOutcome::NotFound`] without touching the store.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::PersistenceUnavailable`] if the lookup itself
    /// failed. Side-effect failures are never returned.
    pub async fn resolve(
        &self,
        code: &str,
        visitor: &VisitorMetadata,
    ) -> Result<RedirectOutcome, ShortenError> {
        if !is_resolvable_code(code) {
            debug!(code, "Unresolvable short code");
            metrics::counter!("redirects_total", "outcome" => "not_found").increment(1);
            return Ok(RedirectOutcome::NotFound);
        }

        let link = match self.link_repository.find_by_code(code).await {
            Ok(Some(link)) => link,
            Ok(None) => {
                metrics::counter!("redirects_total", "outcome" => "not_found").increment(1);
                return Ok(RedirectOutcome::NotFound);
            }
            Err(e) => {
                metrics::counter!("redirects_total", "outcome" => "error").increment(1);
                return Err(e.into());
            }
        };

        self.track_visit(&link, visitor).await;

        metrics::counter!("redirects_total", "outcome" => "found").increment(1);
        Ok(RedirectOutcome::Redirect(link.original_url))
    }

    /// Records the click and increments the counter independently.
    async fn track_visit(&self, link: &Link, visitor: &VisitorMetadata) {
        let country = self.locator.locate(visitor).await;
        let profile = classify_user_agent(visitor.user_agent.as_deref());

        let new_click = NewClick {
            link_id: link.id,
            country,
            user_agent: visitor.user_agent.clone(),
            browser: profile.browser,
            device: profile.device,
        };

        let (recorded, incremented) = tokio::join!(
            self.click_repository.record(new_click),
            self.link_repository.increment_click_count(link.id),
        );

        if let Err(e) = recorded {
            warn!(link_id = link.id, error = %e, "Failed to record click");
            metrics::counter!("click_side_effect_failures_total", "effect" => "record")
                .increment(1);
        }

        if let Err(e) = incremented {
            warn!(link_id = link.id, error = %e, "Failed to increment click count");
            metrics::counter!("click_side_effect_failures_total", "effect" => "increment")
                .increment(1);
        }
    }
}
