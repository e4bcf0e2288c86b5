//! Core of `cdl`: capability probe, range partitioning, concurrent segment
//! fetch and ordered merge.

pub mod config;
pub mod downloader;
pub mod error;
pub mod logging;
pub mod probe;
pub mod segmenter;
pub mod storage;
pub mod transfer;
pub mod url_model;

pub use downloader::{DownloadMode, DownloadReport, Downloader};
pub use error::DownloadError;
