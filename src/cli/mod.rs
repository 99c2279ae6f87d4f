//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Shipex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Shipex - ShipStation shipment export ETL Tool
#[derive(Parser, Debug)]
#[command(name = "shipex")]
#[command(version, about, long_about = None)]
#[command(author = "Shipex Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "shipex.toml", env = "SHIPEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHIPEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export shipments for a ship-date range to CSV
    Export(commands::export::ExportArgs),

    /// Run post-processing over an existing export CSV
    PostProcess(commands::post_process::PostProcessArgs),

    /// Reclassify international zones in a CSV
    UpdateZones(commands::update_zones::UpdateZonesArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
