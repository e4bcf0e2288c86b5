//! Ordered reassembly of Part Artifacts into the output file.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::create_truncate;
use crate::error::DownloadError;

/// Writes `output` as the concatenation of `parts`, in slice order, leaving the
/// artifacts in place. A missing artifact contributes zero bytes. Returns the
/// output size.
pub fn concatenate_parts(output: &Path, parts: &[PathBuf]) -> Result<u64, DownloadError> {
    let mut destination = create_truncate(output)?;
    let mut total = 0u64;

    for part in parts {
        let mut source = match File::open(part) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("{} missing, treated as empty", part.display());
                continue;
            }
            Err(e) => return Err(DownloadError::io(part, e)),
        };
        // Read errors and write errors are both reported against the artifact;
        // io::copy does not say which side failed.
        let n = io::copy(&mut source, &mut destination).map_err(|e| DownloadError::io(part, e))?;
        tracing::debug!("merged {} ({} bytes)", part.display(), n);
        total += n;
    }

    destination
        .sync_all()
        .map_err(|e| DownloadError::io(output, e))?;
    Ok(total)
}

/// Concatenates `parts` into `output`, then deletes every artifact.
pub fn merge_parts(output: &Path, parts: &[PathBuf]) -> Result<u64, DownloadError> {
    let total = concatenate_parts(output, parts)?;
    for part in parts {
        match std::fs::remove_file(part) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(DownloadError::io(part, e)),
        }
    }
    Ok(total)
}
