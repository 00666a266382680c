//! `download` command: save the result file of a finished job.

use std::path::Path;

use anyhow::Result;
use gostcheck_core::{Catalog, JobsClient};

pub async fn run_download(
    jobs: &JobsClient,
    catalog: &Catalog,
    job_id: &str,
    output_dir: &Path,
) -> Result<()> {
    let result = jobs.download_job(job_id, output_dir).await?;
    println!(
        "{} {}",
        catalog.text("download.saved"),
        result.path.display()
    );
    Ok(())
}
