//! Structured extraction from legacy Terraform documentation pages.
//!
//! This crate provides:
//! - [`PageLayout`]: the compiled page-layout rules (content region, lists, sidebar)
//! - [`Extractor`]: turns a fetched page into a [`DocRecord`]
//!
//! Pages missing the expected regions produce empty records; only bodies that
//! are not markup at all are rejected.

mod layout;
mod provider;
mod resource;

use scraper::Html;
use tfdoc_shared::{
    DocKind, DocRecord, DocRequest, LayoutConfig, ProviderRecord, ResourceRecord, Result,
    TfDocError,
};
use tracing::{info, instrument};

pub use layout::PageLayout;

/// Extracts records from documentation pages using one [`PageLayout`].
///
/// Holds no per-page state; one extractor can serve any number of pages.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    layout: PageLayout,
}

impl Extractor {
    /// Build an extractor from `[layout]` configuration.
    pub fn new(config: &LayoutConfig) -> Result<Self> {
        Ok(Self {
            layout: PageLayout::from_config(config)?,
        })
    }

    /// Extract the record matching `request.kind` from a fetched body.
    #[instrument(skip_all, fields(kind = %request.kind, name = %request.name, len = body.len()))]
    pub fn extract(&self, request: &DocRequest, body: &[u8]) -> Result<DocRecord> {
        let record = match request.kind {
            DocKind::Resource => DocRecord::Resource(self.extract_resource(&request.name, body)?),
            DocKind::Provider => DocRecord::Provider(self.extract_provider(&request.name, body)?),
        };

        match &record {
            DocRecord::Resource(r) => info!(
                args = r.args.len(),
                nested = r.args.iter().filter(|a| !a.nested_fields.is_empty()).count(),
                "resource extracted"
            ),
            DocRecord::Provider(p) => {
                info!(resources = p.resource_names.len(), "provider extracted")
            }
        }

        Ok(record)
    }

    /// Extract a resource page's description and arguments.
    pub fn extract_resource(&self, name: &str, body: &[u8]) -> Result<ResourceRecord> {
        let doc = parse_markup(body)?;
        Ok(resource::extract_resource(&doc, &self.layout, name))
    }

    /// Extract the resource names listed on a provider page.
    pub fn extract_provider(&self, name: &str, body: &[u8]) -> Result<ProviderRecord> {
        let doc = parse_markup(body)?;
        Ok(provider::extract_provider(&doc, &self.layout, name))
    }
}

/// Parse a body as an HTML document.
///
/// The HTML parser recovers from any malformed structure, so only bodies that
/// are not text (invalid UTF-8, NUL bytes) are rejected.
fn parse_markup(body: &[u8]) -> Result<Html> {
    let text = std::str::from_utf8(body)
        .map_err(|e| TfDocError::markup(format!("body is not valid UTF-8: {e}")))?;

    if let Some(pos) = text.find('\0') {
        return Err(TfDocError::markup(format!(
            "body contains a NUL byte at offset {pos}"
        )));
    }

    Ok(Html::parse_document(text.trim_start_matches('\u{feff}')))
}
