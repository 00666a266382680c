//! `check` command: submit, poll until the job finishes, download the result.

use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use gostcheck_core::{AiMode, Catalog, JobDetails, JobStatus, JobsClient, Provider};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

pub async fn run_check(
    jobs: &JobsClient,
    catalog: &Catalog,
    file: &Path,
    mode: AiMode,
    provider: Provider,
    output_dir: &Path,
    poll_interval: Duration,
    use_progress_bar: bool,
) -> Result<()> {
    super::ensure_docx(file)?;

    let created = jobs.create_job_from_file(file, mode, provider).await?;
    println!("{}: {}", catalog.text("job.submitted"), created.job_id);

    let details =
        wait_for_terminal_status(jobs, catalog, &created.job_id, poll_interval, use_progress_bar)
            .await?;

    if details.status == JobStatus::Failed {
        let reason = details
            .error_message
            .as_deref()
            .unwrap_or("no error message reported");
        bail!("{}: {reason}", catalog.text("job.failed"));
    }

    println!("{}", catalog.text("job.done"));

    let result = jobs.download_job(&created.job_id, output_dir).await?;
    println!(
        "{} {}",
        catalog.text("download.saved"),
        result.path.display()
    );
    Ok(())
}

/// Polls the status endpoint until the job reaches a terminal state.
///
/// The bar position tracks the server-reported progress percentage. Each
/// poll is an independent request; there is no overall deadline, so a hung
/// server is interrupted with Ctrl-C rather than a client timeout.
async fn wait_for_terminal_status(
    jobs: &JobsClient,
    catalog: &Catalog,
    job_id: &str,
    poll_interval: Duration,
    use_progress_bar: bool,
) -> Result<JobDetails> {
    let bar = if use_progress_bar {
        ProgressBar::new(100)
    } else {
        ProgressBar::hidden()
    };
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message(catalog.text("check.waiting").to_string());

    loop {
        let details = match jobs.get_job(job_id).await {
            Ok(details) => details,
            Err(error) => {
                bar.abandon();
                return Err(error.into());
            }
        };

        bar.set_position(u64::from(details.progress.min(100)));
        debug!(
            status = details.status.as_str(),
            progress = details.progress,
            "polled job"
        );

        if details.status.is_terminal() {
            bar.finish_and_clear();
            return Ok(details);
        }

        tokio::time::sleep(poll_interval).await;
    }
}
