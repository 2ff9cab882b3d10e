//! ivr-gateway: Voice responder main binary
//!
//! Serves the microphone test call flow to the telephony provider.
//!
//! Usage:
//!   ivr-gateway                   - Start the webhook server
//!   ivr-gateway --config <path>   - Start with a TOML config file
//!   ivr-gateway --help            - Show help

use std::path::PathBuf;

use ivr_core::Config;
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Webhook server, optionally with an explicit config file
    Server { config_path: Option<PathBuf> },
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = match parse_args(std::env::args().skip(1))? {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("ivr-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server { config_path } => config_path,
    };

    // Load .env before reading configuration
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let config = Config::load(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    // RUST_LOG wins over the configured filter
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.log_filter())?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if !dotenv_loaded {
        tracing::info!("No .env file found, using environment variables");
    }

    tracing::info!("Starting ivr-gateway...");
    tracing::info!(
        "Environment: {:?}, bind address: {}:{}",
        config.app_env,
        config.server.host,
        config.server.port
    );

    ivr_api::start_server(config, shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))
}

/// Parse command line arguments (without the program name)
fn parse_args<I>(args: I) -> anyhow::Result<RunMode>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(RunMode::Help),
            "--version" | "-v" => return Ok(RunMode::Version),
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("Unknown argument: {}. Use --help for usage.", other),
        }
    }

    Ok(RunMode::Server { config_path })
}

/// Print help message
fn print_help() {
    println!("ivr-gateway - Microphone test voice responder");
    println!();
    println!("Usage:");
    println!("  ivr-gateway                   Start the webhook server");
    println!("  ivr-gateway --config <path>   Load settings from a TOML file");
    println!("  ivr-gateway --help            Show this help message");
    println!("  ivr-gateway --version         Show version");
    println!();
    println!("Webhooks (POST):");
    println!("  /voice          Inbound call, long greeting");
    println!("  /voice/repeat   Short greeting");
    println!("  /record         Recording complete (RecordingUrl)");
    println!("  /playback       Choice after playback (Digits)");
    println!();
    println!("Environment Variables:");
    println!("  HOST        Bind address (default: 0.0.0.0)");
    println!("  PORT        Bind port (default: 8080)");
    println!("  APP_ENV     development or production (default: development)");
    println!("  LOG_LEVEL   Log filter (default: debug, info in production)");
    println!("  RUST_LOG    Overrides LOG_LEVEL");
}

/// Resolve on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_is_server() {
        assert_eq!(
            parse_args(args(&[])).unwrap(),
            RunMode::Server { config_path: None }
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(args(&["--help"])).unwrap(), RunMode::Help);
        assert_eq!(parse_args(args(&["-v"])).unwrap(), RunMode::Version);
    }

    #[test]
    fn test_config_path() {
        assert_eq!(
            parse_args(args(&["--config", "prod.toml"])).unwrap(),
            RunMode::Server {
                config_path: Some(PathBuf::from("prod.toml"))
            }
        );
    }

    #[test]
    fn test_config_without_path_fails() {
        assert!(parse_args(args(&["-c"])).is_err());
    }

    #[test]
    fn test_unknown_argument_fails() {
        assert!(parse_args(args(&["--cli"])).is_err());
    }
}
