//! Job operations for the checking service.
//!
//! This module encodes the service's three job operations as typed calls on
//! top of the [`crate::api`] layer:
//!
//! - submit a document for checking (multipart upload)
//! - fetch a job's status/result object
//! - download the annotated result file (streaming, with filename taken
//!   from the `Content-Disposition` header or a per-job fallback)
//!
//! There is no client-side job state machine: each operation is one
//! independent request/response, and the server owns all job state.

mod client;
mod error;
mod filename;
mod types;

pub use client::{DownloadedResult, JobsClient};
pub use error::JobError;
pub use types::{AiMode, JobCreated, JobDetails, JobStatus, Provider};
