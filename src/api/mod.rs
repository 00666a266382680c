//! HTTP client wrapper for the checking service.
//!
//! This module owns the transport layer: resolving request paths against a
//! configured base URL, executing requests, and normalizing responses into
//! parsed JSON or a structured [`ApiError`].
//!
//! # Example
//!
//! ```no_run
//! use gostcheck_core::api::ApiClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("http://127.0.0.1:8000/api")?;
//! let status = client.get_json("/jobs/3f2b").await?;
//! println!("{status:?}");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;

pub use client::{ApiClient, CONNECT_TIMEOUT_SECS, Payload, READ_TIMEOUT_SECS};
pub use error::ApiError;
