//! R-Droid Resources CLI
//!
//! Scans Android `res/` directories and reports how each resource is
//! provided across configurations.

use std::path::PathBuf;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use r_droid_res::commands::{ScanCommand, VariantsCommand};
use r_droid_res::core::{ResourceConfig, APP_NAME, VERSION};
use r_droid_res::progress::TerminalProgress;

#[derive(Parser)]
#[command(
    name = "rdroid-res",
    version,
    about = "Android resource variant index"
)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every resource with its variant count and editability
    Scan {
        /// Resource directories (`res/`)
        #[arg(required = true)]
        res_dirs: Vec<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the variants of one resource in configuration order
    Variants {
        /// Resource type, e.g. `string` or `drawable`
        resource_type: String,
        /// Resource name
        name: String,
        /// Resource directories (`res/`)
        #[arg(required = true)]
        res_dirs: Vec<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ResourceConfig::load_from(path).await?,
        None => ResourceConfig::load().await?,
    };

    // Initialize logging
    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("{} v{} starting...", APP_NAME, VERSION);
    debug!("Using config {:?}", config);

    match cli.command {
        Command::Scan { res_dirs, json } => {
            let progress = TerminalProgress::new(config.confirm_default, json);
            progress.cancel_on_ctrl_c();

            let report = ScanCommand { res_dirs }
                .execute(&config, &progress)
                .await;
            progress.finish();
            let report = report?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_text());
            }
        }
        Command::Variants {
            resource_type,
            name,
            res_dirs,
            json,
        } => {
            let progress = TerminalProgress::new(config.confirm_default, json);
            progress.cancel_on_ctrl_c();

            let report = VariantsCommand {
                resource_type,
                name,
                res_dirs,
            }
            .execute(&config, &progress)
            .await;
            progress.finish();
            let report = report?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render_text());
            }
        }
    }

    Ok(())
}
