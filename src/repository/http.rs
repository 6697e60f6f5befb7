//! HTTP backend shared by every repository trait implementation.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::dto::envelope::{ErrorBody, ListEnvelope};
use crate::pagination::TotalCount;
use crate::repository::Pagination;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Remote API client holding the connection pool and the session token.
///
/// Cheap to share behind a reference; all interior state is the token slot.
pub struct HttpRepository {
    client: Client,
    base_url: String,
    context_path: String,
    token: RwLock<Option<String>>,
}

impl HttpRepository {
    pub fn new(config: &ClientConfig) -> RepositoryResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            context_path: config.context_path.clone(),
            token: RwLock::new(None),
        })
    }

    /// Origin the server lives at, without the API prefix.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        if self.context_path.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!(
                "{}/{}{}",
                self.base_url,
                self.context_path.trim_matches('/'),
                path
            )
        }
    }

    pub(crate) fn store_token(&self, token: Option<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }

    pub(crate) fn current_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub(crate) fn bearer(&self) -> RepositoryResult<String> {
        self.current_token().ok_or(RepositoryError::AuthMissing)
    }

    /// Request without credentials, for the public endpoints.
    pub(crate) fn public(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{method} {url}");
        self.client.request(method, url)
    }

    /// Request carrying the bearer token; fails fast when no one is signed in.
    pub(crate) fn authed(&self, method: Method, path: &str) -> RepositoryResult<RequestBuilder> {
        let token = self.bearer()?;
        Ok(self.public(method, path).bearer_auth(token))
    }

    /// Maps non-2xx responses to [`RepositoryError::Remote`], keeping the
    /// server's `detail` message when it is a plain string.
    async fn check(response: Response) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail_string());
        Err(RepositoryError::Remote {
            status: status.as_u16(),
            detail,
        })
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        builder: RequestBuilder,
    ) -> RepositoryResult<T> {
        let response = Self::check(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn send_empty(builder: RequestBuilder) -> RepositoryResult<()> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    pub(crate) async fn send_bytes(builder: RequestBuilder) -> RepositoryResult<Vec<u8>> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Treats a 404 as an absent row rather than a failure.
pub(crate) fn none_on_404<T>(result: RepositoryResult<T>) -> RepositoryResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Appends `skip`/`limit` pairs; the API paginates by row offset.
pub(crate) fn push_pagination(params: &mut Vec<(String, String)>, pagination: &Option<Pagination>) {
    if let Some(pagination) = pagination {
        params.push(("skip".to_string(), pagination.skip().to_string()));
        params.push(("limit".to_string(), pagination.limit().to_string()));
    }
}

/// Unpacks a list payload into rows plus the total the caller can claim.
///
/// Without pagination the response is the whole collection, so its length is
/// exact; with pagination the envelope decides what can be inferred.
pub(crate) fn split_list<T>(
    envelope: ListEnvelope<T>,
    pagination: &Option<Pagination>,
) -> (TotalCount, Vec<T>) {
    match pagination {
        Some(pagination) => {
            let (rows, total) = envelope.into_parts(pagination.page, pagination.per_page);
            (total, rows)
        }
        None => match envelope {
            ListEnvelope::Counted { items, total } => (TotalCount::Exact(total), items),
            ListEnvelope::Tagged { data, total } => {
                let total = total.unwrap_or(data.len());
                (TotalCount::Exact(total), data)
            }
            ListEnvelope::Bare(items) => (TotalCount::Exact(items.len()), items),
        },
    }
}
