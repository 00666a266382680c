//! Typed job operations on top of the API client.
//!
//! Encodes the three job operations - create, fetch status, download result -
//! as HTTP calls with the shapes the checking service expects. Each operation
//! is a single independent request; there is no client-side job state.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use crate::api::{ApiClient, ApiError, Payload};

use super::error::JobError;
use super::filename::{fallback_result_filename, filename_from_disposition, sanitize_filename};
use super::types::{AiMode, JobCreated, JobDetails, Provider};

/// Result of a completed job download.
#[derive(Debug, Clone)]
pub struct DownloadedResult {
    /// Path the result file was saved to.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes_written: u64,
}

/// Client for the checking service's job endpoints.
///
/// # Example
///
/// ```no_run
/// use gostcheck_core::api::ApiClient;
/// use gostcheck_core::jobs::{AiMode, JobsClient, Provider};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let jobs = JobsClient::new(ApiClient::new("http://127.0.0.1:8000/api")?);
/// let created = jobs
///     .create_job_from_file(Path::new("report.docx"), AiMode::None, Provider::None)
///     .await?;
/// let details = jobs.get_job(&created.job_id).await?;
/// println!("{}: {}%", details.status.as_str(), details.progress);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JobsClient {
    api: ApiClient,
}

impl JobsClient {
    /// Creates a jobs client over an existing API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Returns the underlying API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Submits a document for checking.
    ///
    /// Builds a multipart form with exactly the fields the service expects -
    /// `uploaded_file` (binary part carrying `file_name`), `ai_mode`,
    /// `provider` - and posts it to the jobs collection. No client-side
    /// validation of the document is performed; the server's verdict is
    /// surfaced as-is.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Api`] on transport or protocol failure, or
    /// [`JobError::UnexpectedResponse`]/[`JobError::EmptyResponse`] when the
    /// creation response cannot be decoded.
    #[instrument(level = "debug", skip(self, content), fields(file_name = %file_name))]
    pub async fn create_job(
        &self,
        file_name: &str,
        content: Vec<u8>,
        mode: AiMode,
        provider: Provider,
    ) -> Result<JobCreated, JobError> {
        let part = Part::bytes(content).file_name(file_name.to_string());
        let form = Form::new()
            .part("uploaded_file", part)
            .text("ai_mode", mode.as_str())
            .text("provider", provider.as_str());

        let body = self.api.post_json("/jobs", Payload::Multipart(form)).await?;
        let created: JobCreated = decode("job creation", body)?;
        info!(job_id = %created.job_id, "job created");
        Ok(created)
    }

    /// Reads a document from disk and submits it via [`create_job`](Self::create_job).
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Io`] when the file cannot be read, plus the errors
    /// of [`create_job`](Self::create_job).
    pub async fn create_job_from_file(
        &self,
        path: &Path,
        mode: AiMode,
        provider: Provider,
    ) -> Result<JobCreated, JobError> {
        let file_name = path
            .file_name()
            .map_or_else(|| "upload.docx".to_string(), |n| n.to_string_lossy().into_owned());
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| JobError::io(path, e))?;
        self.create_job(&file_name, content, mode, provider).await
    }

    /// Fetches the status/result object for a job.
    ///
    /// The id is not validated client-side; an empty or malformed id simply
    /// becomes part of the URL and the server's response is surfaced.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Api`] on transport or protocol failure, or
    /// [`JobError::UnexpectedResponse`]/[`JobError::EmptyResponse`] when the
    /// status response cannot be decoded.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_job(&self, job_id: &str) -> Result<JobDetails, JobError> {
        let body = self.api.get_json(&format!("/jobs/{job_id}")).await?;
        decode("job status", body)
    }

    /// Downloads a job's result file into `output_dir`.
    ///
    /// The filename is determined by:
    /// 1. `Content-Disposition` header (if present)
    /// 2. `{job_id}.docx` fallback
    ///
    /// The body is streamed to disk; on a stream error the partial file is
    /// removed. The download path is assumed binary on all statuses, so a
    /// non-2xx response fails with only the numeric status (the body is not
    /// inspected for an error message).
    ///
    /// # Errors
    ///
    /// Returns [`JobError::Download`] on a non-2xx status, [`JobError::Api`]
    /// on transport failure, or [`JobError::Io`] when writing fails.
    #[must_use = "download result contains the path to the saved file"]
    #[instrument(skip(self, output_dir), fields(job_id = %job_id))]
    pub async fn download_job(
        &self,
        job_id: &str,
        output_dir: &Path,
    ) -> Result<DownloadedResult, JobError> {
        let url = self.api.resolve_url(&format!("/jobs/{job_id}/download"));

        let response = self
            .api
            .http()
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ApiError::transport(&url, e))?;

        if !response.status().is_success() {
            return Err(JobError::download(job_id, response.status().as_u16()));
        }

        let name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .map(|n| sanitize_filename(&n))
            .filter(|n| !n.trim_matches('_').is_empty())
            .unwrap_or_else(|| sanitize_filename(&fallback_result_filename(job_id)));
        let file_path = output_dir.join(&name);
        debug!(path = %file_path.display(), "resolved output path");

        let mut file = File::create(&file_path)
            .await
            .map_err(|e| JobError::io(file_path.clone(), e))?;

        let stream_result = stream_to_file(&mut file, response, &url, &file_path).await;

        if stream_result.is_err() {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&file_path).await;
        }

        let bytes_written = stream_result?;

        info!(
            path = %file_path.display(),
            bytes = bytes_written,
            "result downloaded"
        );

        Ok(DownloadedResult {
            path: file_path,
            bytes_written,
        })
    }
}

/// Streams the response body to a file, returning bytes written.
///
/// Extracted so the caller can clean up the partial file on error.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, JobError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| ApiError::transport(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| JobError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| JobError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}

/// Decodes a typed response from the lenient JSON envelope.
fn decode<T: DeserializeOwned>(
    context: &'static str,
    body: Option<serde_json::Value>,
) -> Result<T, JobError> {
    let value = body.ok_or(JobError::EmptyResponse { context })?;
    serde_json::from_value(value)
        .map_err(|source| JobError::UnexpectedResponse { context, source })
}
