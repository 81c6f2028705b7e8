use tracing::info;

use super::commands::JobArgs;
use super::progress::VerifyProgress;
use super::{load_settings, print_report, GlobalArgs};
use crate::client::HttpVerificationClient;
use crate::errors::CredisourceError;
use crate::pipeline::{JobPoller, VerificationOrchestrator};
use crate::reporting::VerificationReport;

pub async fn handle_job(args: JobArgs, globals: &GlobalArgs) -> Result<(), CredisourceError> {
    let job_id = args.job_id.trim();
    if job_id.is_empty() {
        return Err(CredisourceError::Validation("Job ID must not be empty".into()));
    }

    let settings = load_settings(globals, &args.output).await?;
    info!(job_id, base_url = %settings.base_url, "Following verification job");

    let client = HttpVerificationClient::from_settings(&settings)?;
    let orchestrator = VerificationOrchestrator::new(&client, JobPoller::from_settings(&settings));
    let progress = VerifyProgress::new(globals.quiet || args.output.json);

    match orchestrator.follow(job_id, |status| progress.set_status(status)).await {
        Ok(outcome) => {
            progress.finish_success();
            print_report(&VerificationReport::new(outcome.job_id, outcome.result), args.output.json)
        }
        Err(e) => {
            progress.abandon();
            Err(e)
        }
    }
}
