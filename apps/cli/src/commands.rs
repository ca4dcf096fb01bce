//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tfdoc_core::pipeline::{ProgressReporter, ScrapeConfig, ScrapeResult, scrape};
use tfdoc_core::render::{RenderOptions, render};
use tfdoc_resolver::{HttpFetcher, resolve};
use tfdoc_shared::{
    AppConfig, DocRequest, init_config, init_config_at, load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// tfdoc: Terraform documentation at the command line.
#[derive(Parser)]
#[command(
    name = "tfdoc",
    version,
    about = "Extract arguments and resource lists from Terraform documentation pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.tfdoc/tfdoc.toml.
    #[arg(long, global = true, env = "TFDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Documentation base URL (overrides `[registry] base_url`).
    #[arg(long, global = true, env = "TFDOC_BASE_URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Record output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Configuration skeleton for resources, one name per line for providers.
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Show the documented arguments of a resource (e.g. aws_instance).
    Resource {
        /// Resource name, `<provider>_<resource>`.
        name: String,

        /// Output format.
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only include required arguments.
        #[arg(long)]
        required_only: bool,

        /// Local name for the generated resource block.
        #[arg(long, default_value = "this")]
        label: String,
    },

    /// List the resources documented for a provider (e.g. aws).
    Provider {
        /// Provider name.
        name: String,

        /// Output format.
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Resolve and print the documentation URL without extracting.
    Url {
        /// Document kind: provider or resource.
        kind: String,

        /// Provider or resource name.
        name: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Crates covered by the verbosity filter.
const LOG_TARGETS: [&str; 5] = [
    "tfdoc",
    "tfdoc_core",
    "tfdoc_resolver",
    "tfdoc_extractor",
    "tfdoc_shared",
];

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout is output only.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    // Init must not load the existing file.
    if let Command::Config {
        action: ConfigAction::Init,
    } = cli.command
    {
        return cmd_config_init(cli.config.as_deref()).await;
    }

    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Resource {
            name,
            format,
            required_only,
            label,
        } => {
            let options = RenderOptions {
                required_only,
                label,
            };
            cmd_scrape(&config, DocRequest::resource(name), format, &options).await
        }
        Command::Provider { name, format } => {
            cmd_scrape(
                &config,
                DocRequest::provider(name),
                format,
                &RenderOptions::default(),
            )
            .await
        }
        Command::Url { kind, name } => cmd_url(&config, &kind, &name).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(cli.config.as_deref()).await,
            ConfigAction::Show => cmd_config_show(&config).await,
        },
    }
}

/// Load the config file and apply CLI overrides.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    if let Some(base_url) = &cli.base_url {
        config.registry.base_url = base_url.clone();
        config.validate()?;
    }

    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_scrape(
    config: &AppConfig,
    request: DocRequest,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<()> {
    let fetcher = HttpFetcher::new(&config.http)?;
    let scrape_config = ScrapeConfig::from_app(config)?;

    info!(kind = %request.kind, name = %request.name, "scraping documentation");

    let reporter = CliProgress::new();
    let result = scrape(&fetcher, &scrape_config, &request, &reporter).await;
    reporter.clear();
    let result = result?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result.record)?);
        }
        OutputFormat::Text => {
            for line in render(&result.record, options) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

async fn cmd_url(config: &AppConfig, kind: &str, name: &str) -> Result<()> {
    let request = DocRequest::parse(kind, name)?;
    let fetcher = HttpFetcher::new(&config.http)?;
    let resolved = resolve(&fetcher, &config.registry.base_url, &request).await?;
    println!("{}", resolved.url);
    Ok(())
}

async fn cmd_config_init(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => {
            init_config_at(path)?;
            path.to_path_buf()
        }
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn clear(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn done(&self, result: &ScrapeResult) {
        self.spinner.set_message(format!(
            "Done in {:.1}s: {}",
            result.elapsed.as_secs_f64(),
            result.url
        ));
    }
}
