//! Parse HTTP response header lines into a ResourceDescriptor.

use super::ResourceDescriptor;
use crate::error::DownloadError;

/// Raw values of the headers the probe cares about.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ProbeHeaders {
    pub content_length: Option<String>,
    pub accept_ranges: bool,
}

impl ProbeHeaders {
    /// Applies the range-support rule and parses the size where it matters.
    pub(crate) fn into_descriptor(
        self,
        url: &str,
        status: u32,
    ) -> Result<ResourceDescriptor, DownloadError> {
        let supports_ranges = (200..300).contains(&status) && self.accept_ranges;
        let parsed = self
            .content_length
            .as_deref()
            .and_then(|v| v.parse::<u64>().ok());

        let total_size = match (supports_ranges, parsed) {
            (_, Some(n)) => n,
            (false, None) => 0,
            (true, None) => {
                return Err(DownloadError::InvalidContentLength {
                    url: url.to_string(),
                    value: self.content_length,
                })
            }
        };

        Ok(ResourceDescriptor {
            url: url.to_string(),
            total_size,
            supports_ranges,
        })
    }
}

/// Parse collected header lines. A status line (`HTTP/...`) resets what was
/// seen so far, so after redirects only the final response counts.
pub(crate) fn parse_headers(lines: &[String]) -> ProbeHeaders {
    let mut out = ProbeHeaders::default();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            out = ProbeHeaders::default();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                out.content_length = Some(value.to_string());
            }
            if name.eq_ignore_ascii_case("accept-ranges") {
                out.accept_ranges = value.eq_ignore_ascii_case("bytes");
            }
        }
    }

    out
}
