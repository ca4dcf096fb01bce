//! Shared types, error model, and configuration for tfdoc.
//!
//! This crate is the foundation depended on by all other tfdoc crates.
//! It provides:
//! - [`TfDocError`]: the unified error type
//! - Domain types ([`DocRequest`], [`ArgumentRecord`], [`ResourceRecord`], [`ProviderRecord`])
//! - Configuration ([`AppConfig`], [`LayoutConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_BASE_URL, HttpConfig, LayoutConfig, RegistryConfig, config_dir,
    config_file_path, init_config, init_config_at, load_config, load_config_from,
};
pub use error::{Result, TfDocError};
pub use types::{
    ArgumentRecord, DocKind, DocRecord, DocRequest, NAME_SEPARATOR, ProviderRecord,
    ResourceRecord,
};
