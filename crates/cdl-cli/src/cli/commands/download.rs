//! `cdl download <url>` – probe, then parallel or single-stream download.

use anyhow::{Context, Result};
use cdl_core::config::CdlConfig;
use cdl_core::{DownloadReport, Downloader};
use std::path::Path;

pub(crate) fn summary(report: &DownloadReport) -> String {
    format!(
        "Saved {} ({} bytes, {})",
        report.output_path.display(),
        report.bytes_written,
        report.mode
    )
}

pub async fn run_download(cfg: &CdlConfig, url: &str, output_dir: &Path) -> Result<()> {
    let downloader = Downloader::new(cfg);
    let report = tokio::task::spawn_blocking({
        let url = url.to_string();
        let output_dir = output_dir.to_path_buf();
        move || downloader.download(&url, &output_dir)
    })
    .await
    .context("download task join")?
    .with_context(|| format!("download {}", url))?;
    println!("{}", summary(&report));
    Ok(())
}
