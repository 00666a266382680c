//! Error types for job operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur during job operations.
#[derive(Debug, Error)]
pub enum JobError {
    /// HTTP-level failure on the create or status endpoints.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Non-2xx status on the download endpoint.
    ///
    /// The download path is assumed binary on all statuses, so the body is
    /// never inspected; only the numeric status is carried.
    #[error("download failed with HTTP {status} for job {job_id}")]
    Download {
        /// The job whose download failed.
        job_id: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while reading the upload or writing the result.
    #[error("IO error for {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A 2xx response whose body could not be decoded into the expected shape.
    #[error("unexpected {context} response: {source}")]
    UnexpectedResponse {
        /// Which operation produced the response.
        context: &'static str,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A 2xx response with an empty body where one was required.
    #[error("empty {context} response")]
    EmptyResponse {
        /// Which operation produced the response.
        context: &'static str,
    },
}

impl JobError {
    /// Creates a download failure error.
    pub fn download(job_id: impl Into<String>, status: u16) -> Self {
        Self::Download {
            job_id: job_id.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
