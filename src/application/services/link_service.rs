//! Link creation, allocation and management service.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{RepositoryError, ShortenError};
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{
    MAX_GENERATION_ATTEMPTS, Probe, first_available, generate_code, is_reserved_code,
    validate_custom_code,
};
use crate::utils::url_normalizer::normalize_url;

/// A short code believed to be free at check time, plus the validated destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub short_code: String,
    pub original_url: String,
}

/// Service for allocating short codes and managing links.
///
/// Allocation checks availability before insert as an optimisation only. The
/// store's unique constraint on `short_code` is what guarantees uniqueness, and
/// a conflict at insert time surfaces as [`ShortenError::CodeTaken`].
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    base_url: String,
    attribute_links: bool,
    code_generator: fn() -> String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `link_repository` - link storage
    /// - `base_url` - public origin used to build short URLs
    /// - `attribute_links` - store the creating user on new links
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        base_url: impl Into<String>,
        attribute_links: bool,
    ) -> Self {
        Self {
            link_repository,
            base_url: base_url.into(),
            attribute_links,
            code_generator: generate_code,
        }
    }

    /// Replaces the random code generator.
    pub fn with_code_generator(mut self, generator: fn() -> String) -> Self {
        self.code_generator = generator;
        self
    }

    /// Validates the destination and produces a free short code.
    ///
    /// - With `custom_code`, the code is validated and checked once; a taken
    ///   code is terminal.
    /// - Without it, random codes are tried up to [`MAX_GENERATION_ATTEMPTS`] times.
    ///
    /// Nothing is inserted.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::InvalidUrl`] / [`ShortenError::InvalidCode`] before any store call
    /// - [`ShortenError::CodeTaken`] if the custom code exists
    /// - [`ShortenError::AllocationExhausted`] if every random candidate collided
    /// - [`ShortenError::PersistenceUnavailable`] if the availability check failed
    pub async fn allocate(
        &self,
        desired_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Reservation, ShortenError> {
        let original_url =
            normalize_url(desired_url).map_err(|e| ShortenError::InvalidUrl(e.to_string()))?;

        let short_code = match custom_code {
            Some(code) => {
                validate_custom_code(code).map_err(ShortenError::InvalidCode)?;

                if !self.is_code_available(code).await? {
                    return Err(ShortenError::CodeTaken(code.to_string()));
                }

                code.to_string()
            }
            None => {
                let probe = first_available(MAX_GENERATION_ATTEMPTS, self.code_generator, |code| {
                    async move {
                        if is_reserved_code(&code) {
                            return Ok(false);
                        }
                        self.is_code_available(&code).await
                    }
                })
                .await?;

                match probe {
                    Probe::Available(code) => code,
                    Probe::Exhausted { attempts } => {
                        return Err(ShortenError::AllocationExhausted { attempts });
                    }
                }
            }
        };

        debug!(%short_code, "Short code allocated");

        Ok(Reservation {
            short_code,
            original_url,
        })
    }

    /// Allocates a code and inserts the link.
    ///
    /// `owner` is only stored when attribution is enabled.
    ///
    /// # Errors
    ///
    /// See [`Self::allocate`]. A unique violation at insert time (a concurrent
    /// allocation won the race) is reported as [`ShortenError::CodeTaken`].
    pub async fn create_link(
        &self,
        desired_url: &str,
        custom_code: Option<&str>,
        owner: Option<i64>,
    ) -> Result<Link, ShortenError> {
        let reservation = self.allocate(desired_url, custom_code).await?;
        let short_code = reservation.short_code.clone();

        let new_link = NewLink {
            short_code: reservation.short_code,
            original_url: reservation.original_url,
            owner: owner.filter(|_| self.attribute_links),
        };

        let link = self
            .link_repository
            .create(new_link)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => ShortenError::CodeTaken(short_code),
                other => other.into(),
            })?;

        metrics::counter!("links_created_total").increment(1);
        info!(link_id = link.id, short_code = %link.short_code, "Link created");

        Ok(link)
    }

    /// Lists links newest first.
    ///
    /// With attribution enabled and a `viewer`, only that user's links are returned.
    pub async fn list_links(
        &self,
        viewer: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Link>, i64), ShortenError> {
        let owner = viewer.filter(|_| self.attribute_links);
        let links = self.link_repository.list(owner, offset, limit).await?;
        let total = self.link_repository.count(owner).await?;
        Ok((links, total))
    }

    /// Counts all links. Also used as the storage health probe.
    pub async fn count_links(&self) -> Result<i64, ShortenError> {
        Ok(self.link_repository.count(None).await?)
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<Link, ShortenError> {
        self.link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ShortenError::NotFound(format!("link {id}")))
    }

    /// Retrieves a link on behalf of `viewer`.
    ///
    /// Links owned by someone else are reported as not found.
    pub async fn get_link_for(&self, id: i64, viewer: i64) -> Result<Link, ShortenError> {
        let link = self.get_link(id).await?;

        if !link.is_accessible_by(viewer) {
            return Err(ShortenError::NotFound(format!("link {id}")));
        }

        Ok(link)
    }

    /// Deletes a link on behalf of `requester`.
    ///
    /// Links owned by someone else are reported as not found.
    pub async fn delete_link(&self, id: i64, requester: i64) -> Result<(), ShortenError> {
        self.get_link_for(id, requester).await?;

        if !self.link_repository.delete(id).await? {
            return Err(ShortenError::NotFound(format!("link {id}")));
        }

        info!(link_id = id, requester, "Link deleted");
        Ok(())
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), short_code)
    }

    async fn is_code_available(&self, code: &str) -> Result<bool, ShortenError> {
        Ok(self.link_repository.find_by_code(code).await?.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::InvalidCodeReason;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn link(id: i64, code: &str, url: &str, owner: Option<i64>) -> Link {
        Link {
            id,
            short_code: code.to_string(),
            original_url: url.to_string(),
            click_count: 0,
            owner,
            created_at: Utc::now(),
        }
    }

    fn service(repo: MockLinkRepository) -> LinkService {
        LinkService::new(Arc::new(repo), "https://sn.ap/", true)
    }

    fn fixed_code() -> String {
        "Fixed1".to_string()
    }

    #[tokio::test]
    async fn test_allocate_random_code_first_attempt_on_empty_store() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let reservation = service(repo).allocate("example.com", None).await.unwrap();

        assert_eq!(reservation.short_code.len(), 6);
        assert!(reservation.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(reservation.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_allocate_never_returns_taken_code() {
        let mut repo = MockLinkRepository::new();
        let mut calls = 0;
        repo.expect_find_by_code().times(3).returning(move |code| {
            calls += 1;
            if calls < 3 {
                Ok(Some(link(1, code, "https://taken.example", None)))
            } else {
                Ok(None)
            }
        });

        let reservation = service(repo).allocate("https://example.com", None).await.unwrap();

        assert_eq!(reservation.short_code.len(), 6);
    }

    #[tokio::test]
    async fn test_allocate_exhausted_after_ten_collisions() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|code| Ok(Some(link(1, code, "https://taken.example", None))));

        let result = service(repo)
            .with_code_generator(fixed_code)
            .allocate("https://example.com", None)
            .await;

        assert_eq!(
            result,
            Err(ShortenError::AllocationExhausted {
                attempts: MAX_GENERATION_ATTEMPTS
            })
        );
    }

    #[tokio::test]
    async fn test_allocate_custom_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .withf(|code| code == "my-link")
            .times(1)
            .returning(|_| Ok(None));

        let reservation = service(repo)
            .allocate("example.com", Some("my-link"))
            .await
            .unwrap();

        assert_eq!(reservation.short_code, "my-link");
    }

    #[tokio::test]
    async fn test_allocate_custom_code_taken() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| Ok(Some(link(5, code, "https://other.example", None))));

        let result = service(repo).allocate("example.com", Some("taken")).await;

        assert_eq!(result, Err(ShortenError::CodeTaken("taken".to_string())));
    }

    #[tokio::test]
    async fn test_allocate_invalid_code_makes_no_store_call() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().times(0);

        let result = service(repo).allocate("example.com", Some("ab")).await;

        assert_eq!(
            result,
            Err(ShortenError::InvalidCode(InvalidCodeReason::TooShort))
        );
    }

    #[tokio::test]
    async fn test_allocate_invalid_url_makes_no_store_call() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().times(0);

        let result = service(repo).allocate("not a url", None).await;

        assert!(matches!(result, Err(ShortenError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_allocate_surfaces_store_failure() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Err(RepositoryError::Unavailable("connection refused".to_string())));

        let result = service(repo).allocate("example.com", None).await;

        assert_eq!(
            result,
            Err(ShortenError::PersistenceUnavailable(
                "connection refused".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_create_link_inserts_reserved_code_with_owner() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_link| {
                new_link.short_code == "my-link"
                    && new_link.original_url == "https://example.com"
                    && new_link.owner == Some(3)
            })
            .times(1)
            .returning(|new_link| {
                Ok(link(
                    10,
                    &new_link.short_code,
                    &new_link.original_url,
                    new_link.owner,
                ))
            });

        let created = service(repo)
            .create_link("example.com", Some("my-link"), Some(3))
            .await
            .unwrap();

        assert_eq!(created.short_code, "my-link");
        assert_eq!(created.click_count, 0);
    }

    #[tokio::test]
    async fn test_create_link_without_attribution_drops_owner() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_link| new_link.owner.is_none())
            .times(1)
            .returning(|new_link| Ok(link(10, &new_link.short_code, &new_link.original_url, None)));

        let service = LinkService::new(Arc::new(repo), "https://sn.ap", false);

        assert!(service.create_link("example.com", None, Some(3)).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_taken_custom_code_does_not_insert() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .returning(|code| Ok(Some(link(5, code, "https://other.example", None))));
        repo.expect_create().times(0);

        let result = service(repo)
            .create_link("example.com", Some("taken"), None)
            .await;

        assert_eq!(result, Err(ShortenError::CodeTaken("taken".to_string())));
    }

    #[tokio::test]
    async fn test_create_link_insert_conflict_is_code_taken() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|_| Err(RepositoryError::Conflict("links_short_code_key".to_string())));

        let result = service(repo)
            .with_code_generator(fixed_code)
            .create_link("example.com", None, None)
            .await;

        assert_eq!(result, Err(ShortenError::CodeTaken("Fixed1".to_string())));
    }

    #[tokio::test]
    async fn test_delete_link_by_other_user_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(link(id, "mine", "https://example.com", Some(1)))));
        repo.expect_delete().times(0);

        let result = service(repo).delete_link(4, 2).await;

        assert!(matches!(result, Err(ShortenError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_link_for_other_user_is_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(link(id, "mine", "https://example.com", Some(1)))));

        let svc = service(repo);

        assert!(matches!(
            svc.get_link_for(4, 2).await,
            Err(ShortenError::NotFound(_))
        ));
        assert_eq!(svc.get_link_for(4, 1).await.unwrap().short_code, "mine");
    }

    #[tokio::test]
    async fn test_get_link_for_unowned_link_is_visible() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(link(id, "anon", "https://example.com", None))));

        assert!(service(repo).get_link_for(4, 2).await.is_ok());
    }

    #[tokio::test]
    async fn test_allocate_skips_reserved_candidates() {
        fn reserved_code() -> String {
            "health".to_string()
        }

        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().times(0);

        let result = service(repo)
            .with_code_generator(reserved_code)
            .allocate("https://example.com", None)
            .await;

        assert_eq!(
            result,
            Err(ShortenError::AllocationExhausted {
                attempts: MAX_GENERATION_ATTEMPTS
            })
        );
    }

    #[tokio::test]
    async fn test_delete_link_by_owner() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(link(id, "mine", "https://example.com", Some(1)))));
        repo.expect_delete().times(1).returning(|_| Ok(true));

        assert!(service(repo).delete_link(4, 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_links_scoped_to_viewer() {
        let mut repo = MockLinkRepository::new();
        repo.expect_list()
            .withf(|owner, offset, limit| *owner == Some(9) && *offset == 0 && *limit == 25)
            .times(1)
            .returning(|_, _, _| Ok(vec![]));
        repo.expect_count()
            .withf(|owner| *owner == Some(9))
            .times(1)
            .returning(|_| Ok(0));

        let (links, total) = service(repo).list_links(Some(9), 0, 25).await.unwrap();

        assert!(links.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let service = service(MockLinkRepository::new());
        assert_eq!(service.short_url("abc123"), "https://sn.ap/abc123");
    }
}
