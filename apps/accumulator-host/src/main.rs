//! Accumulator host.
//!
//! Builds the accumulator service from layered configuration and serves the line
//! protocol in `commands` over stdin/stdout until end of input or Ctrl-C.

mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use accumulator::{AccessPolicyConfig, Service};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::AppConfig;

/// Accumulator host - shared signed counter behind open/read/write sessions
#[derive(Parser)]
#[command(name = "accumulator-host")]
#[command(about = "Accumulator host - shared signed counter behind open/read/write sessions")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve commands from stdin
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init_logging(&config.logging, cli.verbose)?;

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_host(&config).await,
        Commands::Check => {
            check_config(&config);
            Ok(())
        }
    }
}

fn check_config(config: &AppConfig) {
    tracing::info!("Checking configuration...");
    let policy = config.accumulator.access.build();
    tracing::info!(?policy, "access policy resolved");
    match config.accumulator.access {
        AccessPolicyConfig::AllowAll => tracing::info!("any caller may open sessions"),
        AccessPolicyConfig::OwnerOnly { owner } if owner.is_root() => {
            tracing::info!("only root may open sessions");
        }
        AccessPolicyConfig::OwnerOnly { owner } => {
            tracing::info!(%owner, "only the configured owner may open sessions");
        }
    }
    println!("Configuration is valid");
}

async fn run_host(config: &AppConfig) -> Result<()> {
    let service = Service::init(&config.accumulator);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("end of input");
                    break;
                };
                if let Some(reply) = commands::dispatch(&service, &line) {
                    stdout.write_all(reply.as_bytes()).await?;
                    stdout.flush().await?;
                }
            }
            res = tokio::signal::ctrl_c() => {
                if let Err(e) = res {
                    tracing::warn!(error = %e, "failed to listen for Ctrl-C");
                }
                tracing::info!("shutdown: interrupt received");
                break;
            }
        }
    }

    let value = service.shutdown();
    tracing::info!(value, "accumulator host stopped");
    Ok(())
}
