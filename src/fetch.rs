//! Artifact fetching over HTTP with retry and progress reporting
//!
//! The [`Fetch`] trait is the collaborator seam between the normalization
//! engine and the network: the engine only ever asks for "the bytes behind
//! this URL". The production implementation, [`HttpFetcher`], streams the
//! response body in chunks, reports byte progress through a caller-supplied
//! observer, and retries transient failures with exponential backoff
//! (see [`crate::retry`]). Test doubles implement the trait directly.

use crate::config::Config;
use crate::error::FetchError;
use crate::retry::fetch_with_retry;
use async_trait::async_trait;
use bytes::Bytes;

/// Progress observer, invoked as fetched bytes arrive with
/// (bytes transferred so far, total if the server sent a Content-Length)
pub type ProgressFn = dyn Fn(u64, Option<u64>) + Send + Sync;

/// Collaborator contract for retrieving artifact bytes
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch the resource behind `url`, reporting progress along the way
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] for absent resources and
    /// [`FetchError::Status`]/[`FetchError::Network`] for everything else,
    /// after the implementation's retry policy is exhausted.
    async fn fetch(&self, url: &str, progress: &ProgressFn) -> Result<Bytes, FetchError>;
}

/// Production HTTP fetcher backed by [`reqwest`]
pub struct HttpFetcher {
    client: reqwest::Client,
    retry: crate::config::RetryConfig,
}

impl HttpFetcher {
    /// Build a fetcher from the engine configuration
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the HTTP client cannot be
    /// constructed (e.g. TLS backend initialization failure).
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch.timeout)
            .user_agent(config.fetch.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            retry: config.retry.clone(),
        })
    }

    /// One fetch attempt: request, status check, chunked body read
    async fn fetch_once(&self, url: &str, progress: &ProgressFn) -> Result<Bytes, FetchError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let total = response.content_length();
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            progress(body.len() as u64, total);
        }

        tracing::debug!(url = url, bytes = body.len(), "Fetched artifact");
        Ok(Bytes::from(body))
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, progress: &ProgressFn) -> Result<Bytes, FetchError> {
        fetch_with_retry(&self.retry, || self.fetch_once(url, progress)).await
    }
}
