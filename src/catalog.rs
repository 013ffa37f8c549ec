//! Client for the Google Books volumes API.
//!
//! Two operations, each a single uncached GET with no retries: keyword
//! search (`volumes.list`) and fetch-by-id (`volumes.get`). Failures are
//! normalized into [`CatalogError`]; the Display strings of that enum are a
//! compatibility contract (callers historically classified errors by
//! substring), so reword them only together with [`CatalogError::kind`].

use std::fmt;
use std::time::Duration;

use crate::config::CatalogConfig;
use crate::volume::{SearchResponse, Volume};

/// Result count used when the caller does not ask for a specific page size.
pub const DEFAULT_MAX_RESULTS: u32 = 20;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Which endpoint an upstream failure came from; determines the wording of
/// the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Books,
    BookDetails,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Books => f.write_str("books"),
            Self::BookDetails => f.write_str("book details"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No API key was configured. Raised before any network call.
    #[error("missing API key")]
    MissingApiKey,
    /// The caller passed a blank volume id. Raised before any network call.
    #[error("invalid volume id")]
    InvalidVolumeId,
    /// The catalog answered with a non-success status. `message` is the
    /// `error.message` field of the response body when one could be parsed,
    /// otherwise a fallback.
    #[error("failed to fetch {resource}: {message}")]
    Upstream {
        resource: Resource,
        status: u16,
        message: String,
    },
    /// The request never produced a usable response: connection failure,
    /// timeout, or a success body that did not parse.
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Stable classification of a [`CatalogError`], so callers branch on a tag
/// instead of re-matching message substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    InvalidArgument,
    /// Upstream error whose message mentions `not found` (any case). The
    /// catalog reports missing volumes this way rather than with a distinct
    /// error shape.
    NotFound,
    Upstream,
    Transport,
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingApiKey => ErrorKind::Configuration,
            Self::InvalidVolumeId => ErrorKind::InvalidArgument,
            Self::Upstream { message, .. } => {
                if message.to_lowercase().contains("not found") {
                    ErrorKind::NotFound
                } else {
                    ErrorKind::Upstream
                }
            }
            Self::Transport(_) => ErrorKind::Transport,
        }
    }
}

/// Stateless catalog accessor. Cheap to clone; the underlying HTTP client
/// pools connections, and the configuration is read-only after construction.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> anyhow::Result<Self> {
        use anyhow::Context as _;

        let base = url::Url::parse(&config.base_url)
            .with_context(|| format!("parse catalog base url: {}", config.base_url))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!("catalog base url must be http/https: {}", config.base_url);
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build catalog http client")?;
        Ok(Self { http, config })
    }

    fn api_key(&self) -> Result<&str, CatalogError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(CatalogError::MissingApiKey)
    }

    /// Search the catalog by keyword. An empty `query` returns an empty page
    /// without a network call, since the upstream rejects blank queries with
    /// a 400.
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<SearchResponse, CatalogError> {
        let key = self.api_key()?;
        if query.is_empty() {
            return Ok(SearchResponse::empty());
        }
        let max_results = max_results.max(1);

        let endpoint = format!("{}/volumes", self.config.base_url);
        tracing::debug!(%endpoint, query, max_results, "searching catalog");

        let max_results = max_results.to_string();
        let response = self
            .http
            .get(&endpoint)
            .query(&[("q", query), ("maxResults", &max_results), ("key", key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message =
                parse_error_message(&raw).unwrap_or_else(|| "Unknown error".to_string());
            tracing::warn!(status = status.as_u16(), %message, "catalog search failed");
            return Err(CatalogError::Upstream {
                resource: Resource::Books,
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<SearchResponse>().await?)
    }

    /// Fetch the full record for one volume by its catalog id.
    pub async fn volume(&self, id: &str) -> Result<Volume, CatalogError> {
        let key = self.api_key()?;
        if id.trim().is_empty() {
            return Err(CatalogError::InvalidVolumeId);
        }

        let endpoint = format!("{}/volumes/{id}", self.config.base_url);
        tracing::debug!(%endpoint, "fetching volume");

        let response = self.http.get(&endpoint).query(&[("key", key)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = parse_error_message(&raw)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
            tracing::warn!(status = status.as_u16(), %message, id, "volume fetch failed");
            return Err(CatalogError::Upstream {
                resource: Resource::BookDetails,
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Volume>().await?)
    }
}

/// Pull `error.message` out of an upstream error body, if it is the usual
/// `{"error": {"message": ...}}` shape.
fn parse_error_message(raw_json: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw_json).ok()?;
    let message = value.get("error")?.get("message")?.as_str()?.to_owned();
    Some(message)
}
