//! CLI commands and argument parsing

use crate::config::ConfigOverrides;
use crate::decode::DecoderFormat;
use crate::output::ReportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Solidafy Ledger CLI
#[derive(Parser, Debug)]
#[command(name = "solidafy-ledger")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Job configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Report artifact format (overrides the job file)
    #[arg(short, long, global = true)]
    pub format: Option<ReportFormat>,

    /// Pretty-print status messages
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load products, apply the change log, and write reports
    Run {
        #[command(flatten)]
        job: JobArgs,

        /// Product source format (default: by file extension)
        #[arg(long)]
        product_format: Option<DecoderFormat>,

        /// Clamp quantity_add results at zero
        #[arg(long)]
        clamp_quantity_add: bool,

        /// Stop at the first record that fails
        #[arg(long)]
        fail_fast: bool,
    },

    /// Parse a change log and print each record with its status (no store)
    Parse {
        /// Change log file (default: `changes` from the job file)
        file: Option<PathBuf>,
    },

    /// Write reports from an existing database file
    Report {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Validate the job configuration
    Validate,
}

/// Paths and report settings shared by `run` and `report`
#[derive(Args, Debug, Clone, Default)]
pub struct JobArgs {
    /// Product source file
    #[arg(long)]
    pub products: Option<PathBuf>,

    /// Change log file
    #[arg(long)]
    pub changes: Option<PathBuf>,

    /// Output directory for report artifacts
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// DuckDB database file (default: in-memory)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Rows in the top products report
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Price filter threshold (exclusive)
    #[arg(long)]
    pub threshold: Option<f64>,
}

impl JobArgs {
    /// Convert to config overrides
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            products: self.products.clone(),
            changes: self.changes.clone(),
            output_dir: self.output_dir.clone(),
            database: self.database.clone(),
            top_n: self.top_n,
            price_threshold: self.threshold,
            ..ConfigOverrides::default()
        }
    }
}
