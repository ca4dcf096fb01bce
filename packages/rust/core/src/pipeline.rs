//! End-to-end scrape pipeline: request → resolve → fetch → extract → record.

use std::time::{Duration, Instant};

use tracing::{info, instrument};
use url::Url;

use tfdoc_extractor::Extractor;
use tfdoc_resolver::{Fetcher, resolve};
use tfdoc_shared::{AppConfig, DocRecord, DocRequest, Result, TfDocError};

/// Configuration for the [`scrape`] pipeline.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Documentation base URL (`[registry] base_url`).
    pub base_url: String,
    /// Extractor compiled from `[layout]`.
    pub extractor: Extractor,
}

impl ScrapeConfig {
    /// Build from the loaded application config.
    pub fn from_app(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.registry.base_url.clone(),
            extractor: Extractor::new(&config.layout)?,
        })
    }
}

/// Result of the [`scrape`] pipeline.
#[derive(Debug)]
pub struct ScrapeResult {
    /// The documentation page the record was extracted from.
    pub url: Url,
    /// The extracted record.
    pub record: DocRecord,
    /// Total elapsed time, both round-trips included.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, result: &ScrapeResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &ScrapeResult) {}
}

/// Run the full scrape pipeline.
///
/// 1. Resolve: build the URL and check it exists (first round-trip)
/// 2. Fetch the page content (second round-trip)
/// 3. Extract the record for `request.kind`
///
/// Nothing is retried; the first failure ends the call.
#[instrument(skip_all, fields(kind = %request.kind, name = %request.name))]
pub async fn scrape(
    fetcher: &dyn Fetcher,
    config: &ScrapeConfig,
    request: &DocRequest,
    progress: &dyn ProgressReporter,
) -> Result<ScrapeResult> {
    let start = Instant::now();

    progress.phase(&format!("Resolving {} {}", request.kind, request.name));
    let resolved = resolve(fetcher, &config.base_url, request).await?;

    progress.phase(&format!("Fetching {}", resolved.url));
    let response = fetcher.fetch(&resolved.url).await?;
    if !response.is_ok() {
        return Err(TfDocError::transport(
            resolved.url.as_str(),
            Some(response.status),
            "unexpected status",
        ));
    }

    progress.phase("Extracting");
    let record = config.extractor.extract(request, &response.body)?;

    let result = ScrapeResult {
        url: resolved.url,
        record,
        elapsed: start.elapsed(),
    };

    info!(
        url = %result.url,
        elapsed_ms = result.elapsed.as_millis(),
        "scrape completed"
    );

    progress.done(&result);
    Ok(result)
}
