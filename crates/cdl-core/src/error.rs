//! Error type shared by the probe, fetch and merge stages.
//!
//! Every variant is fatal for the download that produced it; callers decide
//! whether to abort (the CLI does) or to fall back (the orchestrator does for
//! probe transport failures).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// libcurl reported a failure (DNS, connection refused, TLS, reset body stream).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),

    /// The server answered with a non-2xx status.
    #[error("{method} {url} returned HTTP {status}")]
    HttpStatus {
        method: &'static str,
        url: String,
        status: u32,
    },

    /// Range support was advertised but the size header is missing or malformed.
    #[error("invalid Content-Length {value:?} for {url}")]
    InvalidContentLength { url: String, value: Option<String> },

    /// Creating, writing, reading or removing a local file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A segment worker went away without reporting a result.
    #[error("{missing} of {expected} segment workers exited without reporting")]
    SegmentLost { missing: usize, expected: usize },
}

impl DownloadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DownloadError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors the orchestrator may answer with a single-stream fallback
    /// when they happen during the probe. A non-2xx HEAD is not an error there;
    /// it only means "no range support".
    pub fn is_probe_fallback(&self) -> bool {
        matches!(self, DownloadError::Transport(_))
    }
}
