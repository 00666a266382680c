//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use gostcheck_core::{AiMode, Provider};

/// Check documents for GOST formatting compliance.
///
/// Gostcheck uploads a .docx document to the checking service, follows the
/// job until it finishes, and downloads the annotated result.
#[derive(Parser, Debug)]
#[command(name = "gostcheck")]
#[command(author, version, about)]
pub struct Args {
    /// Base URL of the checking service API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output locale (en, ru, zh)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a document and print the job id
    Submit {
        /// Path to the .docx document
        file: PathBuf,

        /// AI processing mode
        #[arg(long, value_enum, default_value = "none")]
        mode: AiMode,

        /// LLM provider for the AI modes
        #[arg(long, value_enum, default_value = "none")]
        provider: Provider,
    },

    /// Print the status of a job
    Status {
        /// Job identifier returned by submit
        job_id: String,
    },

    /// Download the result file of a finished job
    Download {
        /// Job identifier returned by submit
        job_id: String,

        /// Directory to save the result file to
        #[arg(short = 'o', long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Upload a document, wait for the check, and download the result
    Check {
        /// Path to the .docx document
        file: PathBuf,

        /// AI processing mode
        #[arg(long, value_enum, default_value = "none")]
        mode: AiMode,

        /// LLM provider for the AI modes
        #[arg(long, value_enum, default_value = "none")]
        provider: Provider,

        /// Directory to save the result file to
        #[arg(short = 'o', long, default_value = ".")]
        output_dir: PathBuf,

        /// Status poll interval in milliseconds (100-60000)
        #[arg(long, value_parser = clap::value_parser!(u64).range(100..=60000))]
        poll_interval: Option<u64>,
    },
}
