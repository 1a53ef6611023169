//! revelrod - Revelro Server Daemon
//!
//! REST gateway in front of the RegCheck SOAP registration lookup service.
//!
//! Usage:
//!   revelrod [OPTIONS] [config.toml]
//!
//! Provider settings come from the `[regcheck]` table and `REGCHECK_*`
//! environment variables. `REGCHECK_USERNAME` is required.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use revelro_api::{create_router, AppState};
use revelro_soap::config::TransportConfig;
use revelro_soap::transport::{create_transport, SoapTransport};
use revelro_soap::{RegCheckBackend, VehicleLookup};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DaemonConfig;

/// Parsed command-line arguments
struct Args {
    /// Server config file (TOML)
    config_path: Option<PathBuf>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut result = Args { config_path: None };

    for arg in &args {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(PathBuf::from(arg));
            }
            _ => {
                tracing::warn!("Unknown argument: {}", arg);
            }
        }
    }

    result
}

fn print_help() {
    eprintln!(
        r#"revelrod - Revelro Server Daemon

Usage: revelrod [OPTIONS] [config.toml]

Options:
  -h, --help    Print this help message

Environment:
  REGCHECK_USERNAME               RegCheck account (required)
  REGCHECK_API_URL                SOAP endpoint
  REGCHECK_OPERATION              SOAP operation (default: CheckIndia)
  REGCHECK_NAMESPACE              SOAP 1.2 operation namespace
  REGCHECK_SOAP11_NAMESPACE       SOAP 1.1 namespace / SOAPAction prefix
  REGCHECK_TIMEOUT_SECS           Request timeout (default: 20)
  REGCHECK_CONNECT_TIMEOUT_SECS   Connect timeout (default: 10)
  REGCHECK_TRANSPORT              http | mock (default: http)
  REVELRO_BIND                    Listen address (default: 0.0.0.0)
  REVELRO_PORT                    Listen port (default: 3001)
  REVELRO_LOG_FORMAT              text | json (default: text)
  RUST_LOG                        Log filter

Examples:
  # Run against the live provider
  REGCHECK_USERNAME=my-account revelrod

  # Run with a config file
  revelrod revelrod.toml

  # Demo mode, no network
  REGCHECK_USERNAME=demo REGCHECK_TRANSPORT=mock revelrod
"#
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "revelrod=info,revelro_api=info,revelro_soap=info,tower_http=info".into()
    });
    let json = std::env::var("REVELRO_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting revelrod (Revelro Server Daemon)");

    let args = parse_args();

    if let Some(ref path) = args.config_path {
        tracing::info!("Loading config from: {}", path.display());
    }
    let config = DaemonConfig::load(args.config_path.as_deref())?;
    let addr = config.socket_addr()?;

    if matches!(config.regcheck.transport, TransportConfig::Mock(_)) {
        tracing::warn!("Using mock transport, lookups return canned data");
    }

    let transport =
        create_transport(&config.regcheck).context("Failed to create provider transport")?;
    tracing::info!(
        endpoint = %transport.endpoint(),
        operation = %config.regcheck.operation,
        username = %config.regcheck.masked_username(),
        "Provider configured"
    );

    let backend = RegCheckBackend::new(config.regcheck, transport);
    tracing::info!("Lookup provider: {}", backend.provider_name());

    let state = AppState::new(Arc::new(backend));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Vehicle history endpoint: http://{}/api/vehicle-history", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
