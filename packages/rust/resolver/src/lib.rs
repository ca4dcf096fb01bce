//! Documentation URL resolution for Terraform providers and resources.
//!
//! A [`DocRequest`] maps deterministically onto a page under the documentation
//! base URL:
//! - provider `aws` → `<base>/providers/aws/index.html`
//! - resource `aws_lambda_function` → `<base>/providers/aws/r/lambda_function.html`
//!
//! [`resolve`] then checks that the page exists before handing the URL out.

mod fetch;

use tfdoc_shared::{DocKind, DocRequest, Result, TfDocError};
use tracing::{debug, info, instrument};
use url::Url;

pub use fetch::{FetchResponse, Fetcher, HttpFetcher};

/// A documentation URL that answered the existence check with `200 OK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub url: Url,
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Build the documentation URL for `request` and verify it exists.
///
/// The existence check is its own round-trip through `fetcher`; the content is
/// fetched again later by the caller. Any non-200 answer or transport failure
/// becomes [`TfDocError::NotFound`].
#[instrument(skip_all, fields(kind = %request.kind, name = %request.name))]
pub async fn resolve(
    fetcher: &dyn Fetcher,
    base_url: &str,
    request: &DocRequest,
) -> Result<ResolvedUrl> {
    let url = doc_url(base_url, request)?;

    debug!(%url, "checking documentation page exists");

    match fetcher.fetch(&url).await {
        Ok(response) if response.is_ok() => {
            info!(%url, "documentation page resolved");
            Ok(ResolvedUrl { url })
        }
        Ok(response) => Err(TfDocError::not_found(
            request.kind,
            &request.name,
            url.as_str(),
            Some(response.status),
        )),
        Err(e) => {
            debug!(error = %e, "existence check failed");
            Err(TfDocError::not_found(
                request.kind,
                &request.name,
                url.as_str(),
                None,
            ))
        }
    }
}

/// Compute the canonical documentation URL without touching the network.
pub fn doc_url(base_url: &str, request: &DocRequest) -> Result<Url> {
    let base = base_url.trim_end_matches('/');

    let raw = match request.kind {
        DocKind::Provider => {
            check_segment(request, &request.name)?;
            format!("{base}/providers/{}/index.html", request.name)
        }
        DocKind::Resource => {
            let (provider, rest) = request.split_resource_name()?;
            check_segment(request, provider)?;
            check_segment(request, rest)?;
            format!("{base}/providers/{provider}/r/{rest}.html")
        }
    };

    Url::parse(&raw).map_err(|e| {
        TfDocError::config(format!("invalid documentation base URL '{base_url}': {e}"))
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject name parts that are empty or would escape their path segment.
///
/// `.` and `..` are dot-segments: URL parsing collapses them, which would
/// move the page out from under `providers/<name>/`.
fn check_segment(request: &DocRequest, segment: &str) -> Result<()> {
    let invalid = |reason: String| TfDocError::invalid_name(request.kind, &request.name, reason);

    if segment.is_empty() {
        return Err(invalid("empty name component".into()));
    }
    if segment == "." || segment == ".." {
        return Err(invalid(format!("'{segment}' is not a valid name component")));
    }
    if let Some(c) = segment.chars().find(|c| matches!(c, '/' | '?' | '#' | '\\')) {
        return Err(invalid(format!("character '{c}' is not allowed")));
    }
    Ok(())
}
