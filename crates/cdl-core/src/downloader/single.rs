//! Single-stream HTTP GET downloader (non-Range fallback).
//!
//! Writes the response body straight into the Output File; no Part Artifacts.

use std::path::Path;

use crate::error::DownloadError;
use crate::storage;
use crate::transfer::{self, TransferOptions};

/// Downloads `url` with one GET (no Range) into `output`. Returns the number of bytes written.
pub fn download_single(
    url: &str,
    output: &Path,
    opts: &TransferOptions,
) -> Result<u64, DownloadError> {
    let file = storage::create_truncate(output)?;
    let mut easy = transfer::easy_handle(url, opts)?;
    let written = transfer::stream_to_file(&mut easy, file, output)?;
    transfer::check_status(&mut easy, "GET", url)?;
    tracing::debug!("single GET {} wrote {} bytes", url, written);
    Ok(written)
}
