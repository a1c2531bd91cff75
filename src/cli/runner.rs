//! CLI runner - executes commands

use crate::changelog::{parse_change_log, read_change_log};
use crate::cli::commands::{Cli, Commands, JobArgs};
use crate::config::{ConfigOverrides, JobConfig};
use crate::decode::DecoderFormat;
use crate::error::Result;
use crate::job::Job;
use serde_json::{json, Value};
use std::path::Path;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run {
                job,
                product_format,
                clamp_quantity_add,
                fail_fast,
            } => self.run_job(job, *product_format, *clamp_quantity_add, *fail_fast),
            Commands::Parse { file } => self.parse(file.as_deref()),
            Commands::Report { job } => self.report(job),
            Commands::Validate => self.validate(),
        }
    }

    /// Load the job file and apply CLI overrides
    fn load_config(&self, overrides: ConfigOverrides) -> Result<JobConfig> {
        let overrides = ConfigOverrides {
            report_format: self.cli.format,
            ..overrides
        };
        Ok(JobConfig::load(self.cli.config.as_deref())?.with_overrides(&overrides))
    }

    /// Run a full job
    fn run_job(
        &self,
        args: &JobArgs,
        product_format: Option<DecoderFormat>,
        clamp_quantity_add: bool,
        fail_fast: bool,
    ) -> Result<()> {
        let config = self.load_config(ConfigOverrides {
            product_format,
            clamp_quantity_add,
            fail_fast,
            ..args.overrides()
        })?;

        let summary = Job::new(config).run()?;

        self.output_message(&json!({
            "type": "SUMMARY",
            "summary": summary
        }));
        Ok(())
    }

    /// Parse a change log and print one line per record
    fn parse(&self, file: Option<&Path>) -> Result<()> {
        let path = match file {
            Some(path) => path.to_path_buf(),
            None => self.load_config(ConfigOverrides::default())?.changes,
        };
        let text = read_change_log(&path)?;

        let mut total = 0usize;
        let mut invalid = 0usize;
        for record in parse_change_log(&text) {
            total += 1;
            let status = match record.validate() {
                Ok(change) if change.method.is_known() => "valid".to_string(),
                Ok(_) => "unknown_method".to_string(),
                Err(reason) => {
                    invalid += 1;
                    format!("invalid: {reason}")
                }
            };
            self.output_message(&json!({
                "type": "RECORD",
                "record": record,
                "status": status
            }));
        }

        tracing::info!(records = total, invalid, path = %path.display(), "change log parsed");
        Ok(())
    }

    /// Write reports from an existing database
    fn report(&self, args: &JobArgs) -> Result<()> {
        let config = self.load_config(args.overrides())?;
        let paths = Job::new(config).report()?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!("Wrote {} report artifacts", paths.len())
            },
            "artifacts": paths
        }));
        Ok(())
    }

    /// Validate the job configuration
    fn validate(&self) -> Result<()> {
        let config = self.load_config(ConfigOverrides::default())?;
        config.validate()?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Job config is valid: products '{}', changes '{}', output '{}'",
                    config.products.display(),
                    config.changes.display(),
                    config.output_dir.display()
                )
            }
        }));
        Ok(())
    }

    fn output_message(&self, msg: &Value) {
        let line = if self.cli.pretty {
            serde_json::to_string_pretty(msg)
        } else {
            serde_json::to_string(msg)
        };
        println!("{}", line.unwrap_or_default());
    }
}
