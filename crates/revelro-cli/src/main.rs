//! Revelro CLI - Command-line tool for the registration lookup gateway

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use revelro_client::RevelroClient;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::output::{OutputContext, OutputFormat};

/// Connect timeout paired with a configured request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "revelro-cli")]
#[command(author, version, about = "Vehicle registration lookup CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Gateway URL [default: http://localhost:3001]
    #[arg(short, long, env = "REVELRO_SERVER")]
    server: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "REVELRO_CONFIG")]
    config: Option<PathBuf>,

    /// Output format [default: table]
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway health
    Health,

    /// Look up a vehicle registration number
    Lookup {
        /// Registration number (e.g., KL03Y1954)
        registration: String,
    },

    /// Check the gateway's provider credentials
    TestCredentials {
        /// Print the provider's raw response
        #[arg(long)]
        show_response: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let settings = config.resolve(cli.server.as_deref(), cli.output, cli.no_color);
    tracing::debug!(?settings, "Resolved configuration");

    let ctx = OutputContext::new(settings.output, settings.no_color, cli.quiet);
    let client = create_client(&settings.server, settings.timeout)?;

    match &cli.command {
        Commands::Health => commands::health(&client, &ctx).await?,
        Commands::Lookup { registration } => commands::lookup(&client, registration, &ctx).await?,
        Commands::TestCredentials { show_response } => {
            commands::test_credentials(&client, *show_response, &ctx).await?
        }
    }

    Ok(())
}

/// Create a gateway client for the given server URL
fn create_client(server: &str, timeout: Option<Duration>) -> Result<RevelroClient> {
    match timeout {
        Some(timeout) => RevelroClient::with_config(server, timeout, CONNECT_TIMEOUT),
        None => RevelroClient::new(server),
    }
    .context("Failed to create gateway client")
}
