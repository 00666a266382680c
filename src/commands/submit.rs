//! `submit` command: upload a document and print the job id.

use std::path::Path;

use anyhow::Result;
use gostcheck_core::{AiMode, Catalog, JobsClient, Provider};

pub async fn run_submit(
    jobs: &JobsClient,
    catalog: &Catalog,
    file: &Path,
    mode: AiMode,
    provider: Provider,
) -> Result<()> {
    super::ensure_docx(file)?;

    let created = jobs.create_job_from_file(file, mode, provider).await?;

    println!("{}: {}", catalog.text("job.submitted"), created.job_id);
    println!(
        "{}: {} ({}%)",
        catalog.text("job.status"),
        created.status.as_str(),
        created.progress
    );
    Ok(())
}
