//! Core domain types for tfdoc requests and extracted records.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TfDocError};

/// Separator between the provider prefix and the resource part of a resource name.
pub const NAME_SEPARATOR: char = '_';

// ---------------------------------------------------------------------------
// DocKind / DocRequest
// ---------------------------------------------------------------------------

/// Which kind of documentation page a request refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Provider,
    Resource,
}

impl DocKind {
    /// Lowercase name as used on the command line and in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Provider => "provider",
            Self::Resource => "resource",
        }
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocKind {
    type Err = TfDocError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "provider" => Ok(Self::Provider),
            "resource" => Ok(Self::Resource),
            other => Err(TfDocError::InvalidKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// A request for one provider or resource documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRequest {
    pub kind: DocKind,
    pub name: String,
}

impl DocRequest {
    /// Build a request from an untyped kind string.
    ///
    /// Fails with [`TfDocError::InvalidKind`] for anything other than
    /// `provider` or `resource`.
    pub fn parse(kind: &str, name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            kind: kind.parse()?,
            name: name.into(),
        })
    }

    pub fn provider(name: impl Into<String>) -> Self {
        Self {
            kind: DocKind::Provider,
            name: name.into(),
        }
    }

    pub fn resource(name: impl Into<String>) -> Self {
        Self {
            kind: DocKind::Resource,
            name: name.into(),
        }
    }

    /// Split a resource name into `(provider, rest)` at the first separator.
    ///
    /// `aws_lambda_function` yields `("aws", "lambda_function")`; provider
    /// names therefore cannot contain the separator themselves.
    pub fn split_resource_name(&self) -> Result<(&str, &str)> {
        self.name.split_once(NAME_SEPARATOR).ok_or_else(|| {
            TfDocError::invalid_name(
                self.kind,
                &self.name,
                format!("expected <provider>{NAME_SEPARATOR}<resource>"),
            )
        })
    }
}

// ---------------------------------------------------------------------------
// Extracted records
// ---------------------------------------------------------------------------

/// One documented argument of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentRecord {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Arguments of the block this argument heads, in document order.
    /// Empty unless a later list on the page was associated with this argument.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_fields: Vec<ArgumentRecord>,
}

/// A resource page: description plus its top-level arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub name: String,
    pub description: String,
    /// Top-level arguments only; nested ones live under `nested_fields`.
    pub args: Vec<ArgumentRecord>,
}

impl ResourceRecord {
    /// Look up a top-level argument by name.
    pub fn arg(&self, name: &str) -> Option<&ArgumentRecord> {
        self.args.iter().find(|a| a.name == name)
    }
}

/// A provider page: the resource names listed in its sidebar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub name: String,
    pub resource_names: Vec<String>,
}

/// Result of extracting any documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DocRecord {
    Provider(ProviderRecord),
    Resource(ResourceRecord),
}

impl DocRecord {
    pub fn kind(&self) -> DocKind {
        match self {
            Self::Provider(_) => DocKind::Provider,
            Self::Resource(_) => DocKind::Resource,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Provider(p) => &p.name,
            Self::Resource(r) => &r.name,
        }
    }
}
