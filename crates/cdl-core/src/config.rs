use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Smallest receive buffer libcurl accepts.
pub const MIN_COPY_BUFFER: usize = 1024;
/// Largest receive buffer libcurl accepts (CURL_MAX_READ_SIZE).
pub const MAX_COPY_BUFFER: usize = 10 * 1024 * 1024;

/// Global configuration loaded from `~/.config/cdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdlConfig {
    /// Fan-out: number of byte ranges fetched concurrently for a range-capable server.
    pub segments: usize,
    /// Receive buffer size in bytes handed to libcurl for every transfer.
    pub copy_buffer_bytes: usize,
    /// Connect timeout per request, in seconds.
    pub connect_timeout_secs: u64,
    /// Maximum number of redirects followed per request.
    pub max_redirections: u32,
    /// Optional User-Agent header; libcurl sends none when unset.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for CdlConfig {
    fn default() -> Self {
        Self {
            segments: 16,
            copy_buffer_bytes: 1024,
            connect_timeout_secs: 30,
            max_redirections: 10,
            user_agent: None,
        }
    }
}

impl CdlConfig {
    /// Rejects values the downloader cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.segments == 0 {
            anyhow::bail!("segments must be at least 1");
        }
        if !(MIN_COPY_BUFFER..=MAX_COPY_BUFFER).contains(&self.copy_buffer_bytes) {
            anyhow::bail!(
                "copy_buffer_bytes must be between {} and {}, got {}",
                MIN_COPY_BUFFER,
                MAX_COPY_BUFFER,
                self.copy_buffer_bytes
            );
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: CdlConfig = toml::from_str(&data)?;
    cfg.validate()?;
    Ok(cfg)
}
