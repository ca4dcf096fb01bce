//! tfdoc CLI: look up Terraform provider and resource documentation.
//!
//! Resolves a provider or resource name to its documentation page and prints
//! the extracted arguments or resource list.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
