pub mod commands;
pub mod job;
pub mod progress;
pub mod verify;

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::config::{self, ResolvedSettings, SettingOverrides};
use crate::errors::CredisourceError;
use crate::models::VerificationResult;
use crate::reporting::{format_result, VerificationReport};

pub use commands::{Cli, Commands};
use commands::OutputArgs;

const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub quiet: bool,
    pub config: Option<String>,
    pub api_url: Option<String>,
}

impl From<&Cli> for GlobalArgs {
    fn from(cli: &Cli) -> Self {
        Self {
            quiet: cli.quiet,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
        }
    }
}

/// Merge config file, environment and flags into the settings for one run.
pub async fn load_settings(
    globals: &GlobalArgs,
    output: &OutputArgs,
) -> Result<ResolvedSettings, CredisourceError> {
    let file_config = match &globals.config {
        Some(path) => Some(config::parse_config(Path::new(path)).await?),
        None => None,
    };

    let overrides = SettingOverrides {
        base_url: globals.api_url.clone(),
        interval_ms: output.interval_ms,
        max_attempts: output.max_attempts,
    };
    let settings = ResolvedSettings::resolve(file_config.as_ref(), &overrides);

    config::validate_base_url(&settings.base_url)?;
    if settings.poll_interval < MIN_INTERVAL {
        return Err(CredisourceError::Config(format!(
            "Poll interval must be at least {}ms",
            MIN_INTERVAL.as_millis()
        )));
    }
    if settings.max_attempts == 0 {
        return Err(CredisourceError::Config("Max attempts must be at least 1".into()));
    }

    debug!(
        base_url = %settings.base_url,
        interval_ms = settings.poll_interval.as_millis() as u64,
        max_attempts = settings.max_attempts,
        "Resolved settings"
    );
    Ok(settings)
}

/// Print a finished verification to stdout.
pub fn print_report(report: &VerificationReport, json: bool) -> Result<(), CredisourceError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", render_human(&report.job_id, &report.result));
    }
    Ok(())
}

fn render_human(job_id: &str, result: &VerificationResult) -> String {
    format!("{}\n  {}", format_result(result), console::style(format!("Job {}", job_id)).dim())
}
