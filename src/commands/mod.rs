//! Command handlers for the gostcheck CLI.

mod check;
mod download;
mod status;
mod submit;

pub use check::run_check;
pub use download::run_download;
pub use status::run_status;
pub use submit::run_submit;

use std::path::Path;

use anyhow::{Result, bail};

/// Rejects non-.docx inputs before any network traffic.
///
/// The server enforces the same rule; checking here fails fast instead of
/// paying for the upload. The library API stays validation-free.
pub(crate) fn ensure_docx(file: &Path) -> Result<()> {
    let is_docx = file
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
    if !is_docx {
        bail!("Only .docx files are supported: {}", file.display());
    }
    Ok(())
}
