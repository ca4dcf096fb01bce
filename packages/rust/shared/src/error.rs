//! Error types for tfdoc.
//!
//! Library crates use [`TfDocError`] via `thiserror`.
//! The CLI app wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::DocKind;

/// Top-level error type for all tfdoc operations.
///
/// Every variant is terminal for the call that produced it; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum TfDocError {
    /// The document kind is neither `provider` nor `resource`.
    #[error("invalid document kind \"{kind}\": must be provider or resource")]
    InvalidKind { kind: String },

    /// The name cannot be turned into a documentation URL.
    #[error("{kind} \"{name}\" is invalid: {reason}")]
    InvalidName {
        kind: DocKind,
        name: String,
        reason: String,
    },

    /// The existence check failed (non-200 status or transport failure).
    #[error("{kind} \"{name}\" is not found at {url}{}", status_suffix(.status))]
    NotFound {
        kind: DocKind,
        name: String,
        url: String,
        status: Option<u16>,
    },

    /// Fetching the documentation content failed or returned non-200.
    #[error("transport error for {url}{}: {message}", status_suffix(.status))]
    Transport {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// The fetched body could not be parsed as markup at all.
    #[error("markup parse error: {message}")]
    MarkupParse { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TfDocError>;

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl TfDocError {
    /// Create an invalid-name error.
    pub fn invalid_name(
        kind: DocKind,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidName {
            kind,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-found error for a failed existence check.
    pub fn not_found(
        kind: DocKind,
        name: impl Into<String>,
        url: impl Into<String>,
        status: Option<u16>,
    ) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
            url: url.into(),
            status,
        }
    }

    /// Create a transport error, optionally carrying the HTTP status.
    pub fn transport(url: impl Into<String>, status: Option<u16>, msg: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            status,
            message: msg.into(),
        }
    }

    /// Create a markup parse error from any displayable message.
    pub fn markup(msg: impl Into<String>) -> Self {
        Self::MarkupParse {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = TfDocError::config("missing base_url");
        assert_eq!(err.to_string(), "config error: missing base_url");

        let err = TfDocError::invalid_name(DocKind::Resource, "instance", "missing '_' separator");
        assert_eq!(
            err.to_string(),
            "resource \"instance\" is invalid: missing '_' separator"
        );

        let err = TfDocError::invalid_name(DocKind::Provider, "a/b", "character '/' is not allowed");
        assert_eq!(
            err.to_string(),
            "provider \"a/b\" is invalid: character '/' is not allowed"
        );
    }

    #[test]
    fn not_found_carries_status() {
        let err = TfDocError::not_found(
            DocKind::Resource,
            "aws_nope",
            "https://example.com/providers/aws/r/nope.html",
            Some(404),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("resource \"aws_nope\" is not found"));
        assert!(msg.ends_with("(HTTP 404)"));

        let err = TfDocError::not_found(DocKind::Provider, "aws", "https://x/", None);
        assert!(!err.to_string().contains("HTTP"));
    }

    #[test]
    fn transport_message_includes_url() {
        let err = TfDocError::transport("https://x/y.html", Some(500), "unexpected status");
        assert_eq!(
            err.to_string(),
            "transport error for https://x/y.html (HTTP 500): unexpected status"
        );
    }
}
