//! Capability probe: one HTTP HEAD request deciding between the ranged and
//! single-stream download paths.
//!
//! Uses the curl crate (libcurl) to fetch response headers and read
//! `Content-Length` and `Accept-Ranges`.

mod parse;

use std::str;

use crate::error::DownloadError;
use crate::transfer::{self, TransferOptions};

use parse::parse_headers;

/// What the probe learned about the remote resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub url: String,
    /// Total size in bytes; `0` when unknown and ranges are not supported.
    pub total_size: u64,
    /// True only for a 2xx HEAD response carrying `Accept-Ranges: bytes`.
    pub supports_ranges: bool,
}

/// Performs a HEAD request against `url` and builds a `ResourceDescriptor`.
///
/// Follows redirects; only the headers of the final response are considered.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn probe(url: &str, opts: &TransferOptions) -> Result<ResourceDescriptor, DownloadError> {
    let mut lines: Vec<String> = Vec::new();

    let mut easy = transfer::easy_handle(url, opts)?;
    easy.nobody(true)?; // HEAD request

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    tracing::debug!("HEAD {} -> HTTP {}", url, status);
    parse_headers(&lines).into_descriptor(url, status)
}
