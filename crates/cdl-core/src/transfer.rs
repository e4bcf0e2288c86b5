//! libcurl handle setup and body streaming shared by every request.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::config::CdlConfig;
use crate::error::DownloadError;

/// Per-request curl options derived from `CdlConfig`.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub buffer_size: usize,
    pub connect_timeout: Duration,
    pub max_redirections: u32,
    pub user_agent: Option<String>,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self::from_config(&CdlConfig::default())
    }
}

impl TransferOptions {
    pub fn from_config(cfg: &CdlConfig) -> Self {
        Self {
            buffer_size: cfg.copy_buffer_bytes,
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            max_redirections: cfg.max_redirections,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// Builds an easy handle for `url` with redirects, timeouts and buffer size applied.
pub(crate) fn easy_handle(
    url: &str,
    opts: &TransferOptions,
) -> Result<curl::easy::Easy, DownloadError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(opts.max_redirections)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.buffer_size(opts.buffer_size)?;
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }
    Ok(easy)
}

/// Performs the transfer, appending every body chunk to `file`. Returns bytes written.
///
/// A write failure aborts the transfer and is reported as `DownloadError::Io`
/// rather than the generic curl write error.
pub(crate) fn stream_to_file(
    easy: &mut curl::easy::Easy,
    mut file: File,
    path: &Path,
) -> Result<u64, DownloadError> {
    let mut written = 0u64;
    let mut write_error: Option<std::io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match file.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Err(e) = performed {
        if let Some(io_err) = write_error.take() {
            return Err(DownloadError::io(path, io_err));
        }
        return Err(DownloadError::Transport(e));
    }

    file.flush().map_err(|e| DownloadError::io(path, e))?;
    Ok(written)
}

/// Fails with `HttpStatus` unless the last response was 2xx.
pub(crate) fn check_status(
    easy: &mut curl::easy::Easy,
    method: &'static str,
    url: &str,
) -> Result<u32, DownloadError> {
    let status = easy.response_code()?;
    if !(200..300).contains(&status) {
        return Err(DownloadError::HttpStatus {
            method,
            url: url.to_string(),
            status,
        });
    }
    Ok(status)
}
