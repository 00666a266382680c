//! `status` command: print the current state of a job.

use anyhow::Result;
use gostcheck_core::{Catalog, JobStatus, JobsClient};

pub async fn run_status(jobs: &JobsClient, catalog: &Catalog, job_id: &str) -> Result<()> {
    let details = jobs.get_job(job_id).await?;

    println!("{}: {}", catalog.text("job.status"), details.status.as_str());
    println!("{}: {}%", catalog.text("job.progress"), details.progress);

    if let Some(error_message) = &details.error_message {
        println!("{}: {error_message}", catalog.text("job.error"));
    }

    if details.status == JobStatus::Done {
        let key = if details.result_file.is_some() {
            "result.ready"
        } else {
            "result.not_ready"
        };
        println!("{}", catalog.text(key));
    }

    Ok(())
}
