//! Segment fetcher: one ranged GET streamed into its own Part Artifact.

use std::path::Path;

use crate::error::DownloadError;
use crate::segmenter::ByteRange;
use crate::storage;
use crate::transfer::{self, TransferOptions};

/// Downloads `range` of `url` into `part_path`, returning the bytes written.
///
/// The artifact is always created (empty for a degenerate range, which issues
/// no request). The server may return more or fewer bytes than asked for; the
/// body is written as received and a mismatch is only logged.
pub fn fetch_segment(
    url: &str,
    range: &ByteRange,
    part_path: &Path,
    opts: &TransferOptions,
) -> Result<u64, DownloadError> {
    let file = storage::create_truncate(part_path)?;

    let span = match range.curl_range() {
        Some(span) => span,
        None => {
            tracing::debug!("part {} is empty, skipping request", range.index);
            return Ok(0);
        }
    };

    tracing::info!(
        "downloading part {} from byte {} to {}",
        range.index,
        range.start,
        range.end - 1
    );

    let mut easy = transfer::easy_handle(url, opts)?;
    easy.range(&span)?;
    let written = transfer::stream_to_file(&mut easy, file, part_path)?;
    let status = transfer::check_status(&mut easy, "GET", url)?;

    if status != 206 {
        tracing::warn!(
            "part {}: expected 206 Partial Content, got HTTP {}",
            range.index,
            status
        );
    }
    if written != range.len() {
        tracing::warn!(
            "part {}: requested {} bytes, server sent {}",
            range.index,
            range.len(),
            written
        );
    }
    tracing::debug!("part {} done ({} bytes)", range.index, written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_range_writes_empty_artifact_without_request() {
        let dir = tempfile::tempdir().unwrap();
        let part = dir.path().join("out.bin.part7");
        std::fs::write(&part, b"stale").unwrap();
        let range = ByteRange { index: 7, start: 5, end: 5 };

        // Unroutable URL: any request attempt would fail.
        let n = fetch_segment(
            "http://invalid.invalid/out.bin",
            &range,
            &part,
            &TransferOptions::default(),
        )
        .unwrap();

        assert_eq!(n, 0);
        assert_eq!(std::fs::metadata(&part).unwrap().len(), 0);
    }

    #[test]
    fn unwritable_artifact_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let part = dir.path().join("no-such-dir").join("x.part1");
        let range = ByteRange { index: 1, start: 0, end: 10 };
        let err = fetch_segment("http://127.0.0.1:9/x", &range, &part, &TransferOptions::default())
            .unwrap_err();
        assert!(matches!(err, DownloadError::Io { .. }));
    }
}
