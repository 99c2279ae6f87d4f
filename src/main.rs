// Shipex - ShipStation shipment export ETL Tool
// Copyright (c) 2025 Shipex Contributors
// Licensed under the MIT License

use shipex::cli::{Cli, Commands};
use shipex::config::{load_config, LoggingConfig};
use shipex::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the config when one loads; otherwise console only
    let loaded = match &cli.command {
        Commands::Init(_) => None,
        _ => load_config(&cli.config).ok(),
    };
    let (config_level, logging_config) = match loaded {
        Some(config) => (config.application.log_level, config.logging),
        None => (
            "info".to_string(),
            LoggingConfig {
                local_enabled: false,
                ..Default::default()
            },
        ),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_level);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Shipex - ShipStation shipment export ETL Tool"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors; flush the file appender first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::PostProcess(args) => args.execute(&cli.config).await,
        Commands::UpdateZones(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
