//! Post-process command implementation
//!
//! Runs the configured joins, carrier normalization and zone gap fill over
//! an export CSV that already exists on disk.

use crate::config::load_config;
use crate::core::export::PostProcessor;
use clap::Args;

/// Arguments for the post-process command
#[derive(Args, Debug)]
pub struct PostProcessArgs {
    /// Export CSV to process
    #[arg(short, long)]
    pub input: String,

    /// Output path, overrides post_processing.output_path
    #[arg(short, long)]
    pub output: Option<String>,
}

impl PostProcessArgs {
    /// Execute the post-process command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Starting post-process command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };
        if let Some(output) = &self.output {
            config.post_processing.output_path = output.clone();
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let output = config.post_processing.output_path.clone();
        let processor = match PostProcessor::from_config(config.post_processing) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load zone table");
                eprintln!("Failed to load zone table: {e}");
                return Ok(2);
            }
        };

        match processor.process_file(&self.input, &output) {
            Ok(file) => {
                println!("✅ Post-processing complete");
                println!("  Input: {}", self.input);
                println!("  Output: {} ({} rows)", file.path.display(), file.rows);
                println!("  SHA-256: {}", file.checksum);
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Post-processing failed");
                eprintln!("Post-processing failed: {e}");
                Ok(5)
            }
        }
    }
}
