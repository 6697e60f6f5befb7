//! Shared public site settings.

use tokio::sync::OnceCell;

use crate::domain::site::SiteEnv;
use crate::repository::SiteReader;

/// Lazily fetched `/config/env` payload, shared across pages.
///
/// The first successful fetch is cached for the lifetime of the cache; a
/// failed fetch serves the built-in defaults for that call only, so the
/// next caller retries.
#[derive(Debug, Default)]
pub struct SiteEnvCache {
    env: OnceCell<SiteEnv>,
}

impl SiteEnvCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The site settings, fetched on first use.
    pub async fn get<R>(&self, repo: &R) -> SiteEnv
    where
        R: SiteReader + ?Sized,
    {
        match self.env.get_or_try_init(|| repo.get_site_env()).await {
            Ok(env) => env.clone(),
            Err(err) => {
                log::warn!("Failed to fetch site settings: {err}");
                SiteEnv::default()
            }
        }
    }

    /// Whatever is cached right now, without fetching.
    #[must_use]
    pub fn cached(&self) -> Option<&SiteEnv> {
        self.env.get()
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;

    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn custom_env() -> SiteEnv {
        SiteEnv {
            site_name: "Phú Long Express".to_string(),
            contact_email: "lienhe@phulong.vn".to_string(),
            ..SiteEnv::default()
        }
    }

    #[tokio::test]
    async fn settings_are_fetched_once() {
        let mut repo = MockRepository::new();
        repo.expect_get_site_env()
            .times(1)
            .returning(|| Ok(custom_env()));

        let cache = SiteEnvCache::new();
        assert_eq!(cache.get(&repo).await.site_name, "Phú Long Express");
        assert_eq!(cache.get(&repo).await.site_name, "Phú Long Express");
        assert!(cache.cached().is_some());
    }

    #[tokio::test]
    async fn failure_serves_defaults_and_retries_later() {
        let mut seq = mockall::Sequence::new();
        let mut repo = MockRepository::new();
        repo.expect_get_site_env()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(RepositoryError::Unexpected("mất mạng".to_string())));
        repo.expect_get_site_env()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(custom_env()));

        let cache = SiteEnvCache::new();
        let fallback = cache.get(&repo).await;
        assert_eq!(fallback.site_name, "Phú Long In Ấn");
        assert!(cache.cached().is_none());

        assert_eq!(cache.get(&repo).await.site_name, "Phú Long Express");
    }
}
