//! Download orchestrator.
//!
//! Probes the URL once, then either partitions the resource and fetches every
//! range on its own thread (joined by a completion barrier before the merge),
//! or falls back to a single full-body GET. Any error after the route is
//! chosen aborts the whole download; nothing is retried.

mod barrier;
mod segment;
mod single;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::CdlConfig;
use crate::error::DownloadError;
use crate::probe::{self, ResourceDescriptor};
use crate::segmenter::partition;
use crate::storage;
use crate::transfer::TransferOptions;
use crate::url_model;

pub use barrier::{CompletionBarrier, CompletionSignal};
pub use segment::fetch_segment;
pub use single::download_single;

/// How a finished download was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMode {
    /// Range-partitioned into `segments` concurrent requests.
    Parallel { segments: usize },
    /// One unpartitioned GET.
    Single,
}

impl fmt::Display for DownloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadMode::Parallel { segments } => write!(f, "{} parallel segments", segments),
            DownloadMode::Single => write!(f, "single stream"),
        }
    }
}

/// Outcome of a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub output_path: PathBuf,
    pub bytes_written: u64,
    pub mode: DownloadMode,
}

/// Path taken after the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Parallel(ResourceDescriptor),
    Single,
}

/// Decides the route from the probe outcome.
///
/// Range support goes parallel. No range support (including a non-2xx HEAD),
/// or a probe that failed in transport, goes single-stream. Range support without a
/// usable size is fatal.
pub fn choose_route(
    url: &str,
    probed: Result<ResourceDescriptor, DownloadError>,
) -> Result<Route, DownloadError> {
    match probed {
        Ok(resource) if resource.supports_ranges => Ok(Route::Parallel(resource)),
        Ok(_) => {
            tracing::info!("{} does not accept byte ranges, using a single stream", url);
            Ok(Route::Single)
        }
        Err(e) if e.is_probe_fallback() => {
            tracing::warn!("probe of {} failed ({}), using a single stream", url, e);
            Ok(Route::Single)
        }
        Err(e) => Err(e),
    }
}

/// Runs downloads with a fixed fan-out and transfer options.
#[derive(Debug, Clone)]
pub struct Downloader {
    opts: TransferOptions,
    segments: usize,
}

impl Downloader {
    pub fn new(cfg: &CdlConfig) -> Self {
        Self::with_options(TransferOptions::from_config(cfg), cfg.segments)
    }

    pub fn with_options(opts: TransferOptions, segments: usize) -> Self {
        Self { opts, segments }
    }

    /// HEAD probe only.
    pub fn probe(&self, url: &str) -> Result<ResourceDescriptor, DownloadError> {
        probe::probe(url, &self.opts)
    }

    /// Downloads `url` into `output_dir`, naming the file after the URL path.
    pub fn download(&self, url: &str, output_dir: &Path) -> Result<DownloadReport, DownloadError> {
        let output_path = output_dir.join(url_model::output_filename(url));
        self.download_to(url, &output_path)
    }

    /// Downloads `url` into `output_path`.
    /// Blocking; call from `spawn_blocking` if used from async code.
    pub fn download_to(
        &self,
        url: &str,
        output_path: &Path,
    ) -> Result<DownloadReport, DownloadError> {
        tracing::info!("probing {}", url);
        let route = choose_route(url, self.probe(url))?;

        let (bytes_written, mode) = match route {
            Route::Parallel(resource) => {
                let n = self.download_parallel(&resource, output_path)?;
                (n, DownloadMode::Parallel { segments: self.segments })
            }
            Route::Single => {
                tracing::info!("single GET {} -> {}", url, output_path.display());
                let n = download_single(url, output_path, &self.opts)?;
                (n, DownloadMode::Single)
            }
        };

        tracing::info!(
            "done: {} ({} bytes, {})",
            output_path.display(),
            bytes_written,
            mode
        );
        Ok(DownloadReport {
            output_path: output_path.to_path_buf(),
            bytes_written,
            mode,
        })
    }

    /// Partition, fetch every range concurrently, wait for all, merge in index order.
    pub fn download_parallel(
        &self,
        resource: &ResourceDescriptor,
        output_path: &Path,
    ) -> Result<u64, DownloadError> {
        let ranges = partition(resource.total_size, self.segments);
        let parts = storage::part_paths(output_path, ranges.len());
        tracing::info!(
            "{} bytes in {} parts -> {}",
            resource.total_size,
            ranges.len(),
            output_path.display()
        );

        let url = resource.url.as_str();
        let opts = &self.opts;
        let barrier = CompletionBarrier::new(ranges.len());

        let results = std::thread::scope(|s| {
            let handles: Vec<_> = barrier
                .signals()
                .into_iter()
                .zip(ranges.iter().zip(&parts))
                .map(|(signal, (range, part))| {
                    s.spawn(move || signal.complete(fetch_segment(url, range, part, opts)))
                })
                .collect();

            let results = barrier.wait();
            for handle in handles {
                if handle.join().is_err() {
                    tracing::error!("segment worker panicked");
                }
            }
            results
        })?;

        for (range, result) in ranges.iter().zip(results) {
            if let Err(e) = result {
                tracing::error!("part {} failed: {}", range.index, e);
                return Err(e);
            }
        }

        tracing::info!("merging {} parts into {}", parts.len(), output_path.display());
        let merged = storage::merge_parts(output_path, &parts)?;
        if merged != resource.total_size {
            tracing::warn!(
                "merged {} bytes, server announced {}",
                merged,
                resource.total_size
            );
        }
        Ok(merged)
    }
}
