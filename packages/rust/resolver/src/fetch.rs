//! The fetch capability used for both the existence check and the content fetch.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tfdoc_shared::{HttpConfig, Result, TfDocError};
use tracing::debug;
use url::Url;

/// Status code and raw body of a fetched page.
///
/// The fetcher reports the status as-is; callers decide what counts as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Only an exact `200 OK` counts; other 2xx codes are treated as failures.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Anything that can GET a URL.
///
/// Implementations must not cache: every call is a separate round-trip.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, returning [`TfDocError::Transport`] only when no response was received.
    async fn fetch(&self, url: &Url) -> Result<FetchResponse>;
}

/// [`Fetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TfDocError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
        debug!(%url, "GET");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TfDocError::transport(url.as_str(), None, e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            TfDocError::transport(url.as_str(), Some(status), format!("body read failed: {e}"))
        })?;

        debug!(%url, status, len = body.len(), "response received");

        Ok(FetchResponse {
            status,
            body: body.to_vec(),
        })
    }
}
