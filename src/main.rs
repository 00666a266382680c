//! CLI entry point for the gostcheck tool.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gostcheck_core::api::{ApiClient, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use gostcheck_core::{Catalog, JobsClient, Locale};
use tracing::debug;

mod app_config;
mod cli;
mod commands;

use app_config::DEFAULT_BASE_URL;
use cli::{Args, Command};

/// Default status poll interval for `check` (2 seconds).
const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let loaded = app_config::load_default_file_config()?;
    if let Some(config) = &loaded.config {
        config.validate().with_context(|| {
            format!(
                "Invalid config file '{}'",
                loaded
                    .path
                    .as_deref()
                    .map_or_else(String::new, |p| p.display().to_string())
            )
        })?;
        debug!(?config, "loaded config file");
    }
    let file_config = loaded.config.unwrap_or_default();

    let base_url = args
        .base_url
        .clone()
        .or_else(|| file_config.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let locale_tag = args
        .locale
        .clone()
        .or_else(|| file_config.locale.clone())
        .unwrap_or_else(|| "en".to_string());
    let locale = Locale::from_str(&locale_tag)?;
    let catalog = Catalog::new(locale);

    let api = ApiClient::with_timeouts(
        &base_url,
        file_config.connect_timeout_secs.unwrap_or(CONNECT_TIMEOUT_SECS),
        file_config.read_timeout_secs.unwrap_or(READ_TIMEOUT_SECS),
    )?;
    let jobs = JobsClient::new(api);

    match args.command {
        Command::Submit {
            ref file,
            mode,
            provider,
        } => commands::run_submit(&jobs, &catalog, file, mode, provider).await,
        Command::Status { ref job_id } => commands::run_status(&jobs, &catalog, job_id).await,
        Command::Download {
            ref job_id,
            ref output_dir,
        } => commands::run_download(&jobs, &catalog, job_id, output_dir).await,
        Command::Check {
            ref file,
            mode,
            provider,
            ref output_dir,
            poll_interval,
        } => {
            let poll_interval = Duration::from_millis(
                poll_interval
                    .or(file_config.poll_interval_ms)
                    .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            );
            commands::run_check(
                &jobs,
                &catalog,
                file,
                mode,
                provider,
                output_dir,
                poll_interval,
                !args.quiet,
            )
            .await
        }
    }
}
