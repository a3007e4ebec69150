//! index-target - Sector-driven index price target CLI
//!
//! Projects an equity index price target from sector-level growth and
//! valuation assumptions.
//!
//! # Commands
//!
//! - `index-target baseline` - Show the sector registry and index anchors
//! - `index-target scenario --growth 0.08` - Evaluate one scenario
//! - `index-target sweep --sector "Energy"` - Sweep one sector's target multiple
//! - `index-target check` - Validate configuration and baseline
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires `index_core` (L1) and
//! `index_scenarios` (L2) to a command-line interface.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::AssumptionArgs;
use config::{CliConfig, LogLevel};
use output::OutputFormat;

pub use error::{CliError, Result};

/// Sector-driven index price target CLI
#[derive(Parser)]
#[command(name = "index-target")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./index_target.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sector registry and index anchors
    Baseline,

    /// Evaluate a scenario and print the price target
    Scenario {
        #[command(flatten)]
        assumptions: AssumptionArgs,
    },

    /// Sweep one sector's target multiple across a range
    Sweep {
        /// Sector to sweep
        #[arg(short, long)]
        sector: String,

        /// First multiple (inclusive)
        #[arg(long)]
        from: Option<u32>,

        /// Last multiple (exclusive)
        #[arg(long)]
        to: Option<u32>,

        #[command(flatten)]
        assumptions: AssumptionArgs,
    },

    /// Check configuration and baseline
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?.with_env_override()?;
    config.validate()?;

    init_tracing(config.log_level, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let format = OutputFormat::from_str(&cli.format)?;

    match cli.command {
        Commands::Baseline => commands::baseline::run(&config, format),
        Commands::Scenario { assumptions } => {
            commands::scenario::run(&config, &assumptions, format)
        }
        Commands::Sweep {
            sector,
            from,
            to,
            assumptions,
        } => commands::sweep::run(&config, &assumptions, &sector, from, to, format),
        Commands::Check => commands::check::run(&config),
    }
}

/// Initialise tracing on stderr; `RUST_LOG` overrides the configured level.
fn init_tracing(level: LogLevel, verbose: bool) {
    let default_level = if verbose {
        LogLevel::Debug
    } else {
        level
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
