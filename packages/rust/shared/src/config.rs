//! Application configuration for tfdoc.
//!
//! User config lives at `~/.tfdoc/tfdoc.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TfDocError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "tfdoc.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".tfdoc";

/// Root of the legacy Terraform documentation site.
pub const DEFAULT_BASE_URL: &str = "https://www.terraform.io/docs";

// ---------------------------------------------------------------------------
// Config structs (matching tfdoc.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where documentation pages live.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Page layout rules used by the extractor.
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// `[registry]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL that `/providers/...` paths are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

/// `[http]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of redirects to follow.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_max_redirects() -> usize {
    5
}
fn default_user_agent() -> String {
    concat!("tfdoc/", env!("CARGO_PKG_VERSION")).into()
}

/// `[layout]` section: CSS selectors describing the legacy documentation page.
///
/// Resource pages keep the description and argument lists as direct children
/// of `content_region`; provider pages list resources under `sidebar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Main documentation body on a resource page.
    #[serde(default = "default_content_region")]
    pub content_region: String,

    /// Paragraph whose first match is the resource description.
    #[serde(default = "default_description")]
    pub description: String,

    /// Bullet lists holding arguments.
    #[serde(default = "default_argument_list")]
    pub argument_list: String,

    /// Items of an argument list.
    #[serde(default = "default_list_item")]
    pub list_item: String,

    /// Emphasized or code-styled inline text (argument names, block owners).
    #[serde(default = "default_emphasis")]
    pub emphasis: String,

    /// Navigation sidebar on a provider page.
    #[serde(default = "default_sidebar")]
    pub sidebar: String,

    /// Visible items of a sidebar section's nested navigation list.
    #[serde(default = "default_sidebar_item")]
    pub sidebar_item: String,

    /// Sidebar sections containing any of these markers are skipped.
    #[serde(default = "default_excluded_sections")]
    pub excluded_sections: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            content_region: default_content_region(),
            description: default_description(),
            argument_list: default_argument_list(),
            list_item: default_list_item(),
            emphasis: default_emphasis(),
            sidebar: default_sidebar(),
            sidebar_item: default_sidebar_item(),
            excluded_sections: default_excluded_sections(),
        }
    }
}

fn default_content_region() -> String {
    "#inner".into()
}
fn default_description() -> String {
    "p".into()
}
fn default_argument_list() -> String {
    "ul".into()
}
fn default_list_item() -> String {
    "li".into()
}
fn default_emphasis() -> String {
    "code, strong".into()
}
fn default_sidebar() -> String {
    ".docs-sidenav".into()
}
fn default_sidebar_item() -> String {
    ".nav-visible > li".into()
}
fn default_excluded_sections() -> Vec<String> {
    vec!["Guides".into(), "Data Sources".into(), "Provider".into()]
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.tfdoc/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TfDocError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.tfdoc/tfdoc.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TfDocError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| TfDocError::config(format!("failed to parse {}: {e}", path.display())))?;

    config.validate()?;
    Ok(config)
}

impl AppConfig {
    /// Check values that serde alone cannot reject.
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.registry.base_url).map_err(|e| {
            TfDocError::config(format!(
                "registry.base_url '{}' is not a valid URL: {e}",
                self.registry.base_url
            ))
        })?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(TfDocError::config(format!(
                "registry.base_url must be http or https, got '{}'",
                base.scheme()
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(TfDocError::config("http.timeout_secs must be greater than 0"));
        }
        Ok(())
    }
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_file_path()?;
    init_config_at(&path)?;
    Ok(path)
}

/// Write a default config file at `path`, replacing whatever is there.
///
/// Never reads the existing file.
pub fn init_config_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| TfDocError::io(dir, e))?;
    }

    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| TfDocError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| TfDocError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("base_url"));
        assert!(toml_str.contains("#inner"));
        assert!(toml_str.contains(".docs-sidenav"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed, config);
        assert_eq!(parsed.registry.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[registry]
base_url = "http://localhost:8080/docs"

[layout]
content_region = "main"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.registry.base_url, "http://localhost:8080/docs");
        assert_eq!(config.layout.content_region, "main");
        assert_eq!(config.layout.argument_list, "ul");
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(
            config.layout.excluded_sections,
            vec!["Guides", "Data Sources", "Provider"]
        );
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = AppConfig::default();
        config.registry.base_url = "not a url".into();
        assert!(config.validate().is_err());

        config.registry.base_url = "ftp://example.com/docs".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join(format!("tfdoc-config-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[http]\ntimeout_secs = 5\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.registry.base_url, DEFAULT_BASE_URL);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn init_replaces_broken_file() {
        let dir = std::env::temp_dir().join(format!("tfdoc-init-test-{}", std::process::id()));
        let path = dir.join("nested").join(CONFIG_FILE_NAME);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[registry\nbase_url = ").unwrap();
        assert!(load_config_from(&path).is_err());

        init_config_at(&path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), AppConfig::default());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_config_from(Path::new("/definitely/not/here/tfdoc.toml")).unwrap_err();
        assert!(matches!(err, TfDocError::Io { .. }));
    }
}
