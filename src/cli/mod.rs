//! CLI module
//!
//! Command-line interface for running update jobs.
//!
//! # Commands
//!
//! - `run` - Load products, apply the change log, write reports
//! - `parse` - Dry-run the change log parser
//! - `report` - Write reports from an existing database file
//! - `validate` - Check the job configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, JobArgs};
pub use runner::Runner;
