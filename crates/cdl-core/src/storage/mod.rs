//! Disk side of a download: Part Artifact naming, output/artifact creation
//! and ordered reassembly.

mod merge;

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::DownloadError;

pub use merge::{concatenate_parts, merge_parts};

/// Part Artifact suffix; the partition index follows it.
pub const PART_SUFFIX: &str = ".part";

/// Path for the artifact of partition `index`: `file.iso` → `file.iso.part3`.
pub fn part_path(final_path: &Path, index: usize) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(format!("{}{}", PART_SUFFIX, index));
    PathBuf::from(o)
}

/// Artifact paths for partitions `1..=count`, in merge order.
pub fn part_paths(final_path: &Path, count: usize) -> Vec<PathBuf> {
    (1..=count).map(|i| part_path(final_path, i)).collect()
}

/// Opens `path` for writing with truncate-or-create semantics and owner read/write permissions.
pub fn create_truncate(path: &Path) -> Result<File, DownloadError> {
    let mut opts = File::options();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    opts.open(path).map_err(|e| DownloadError::io(path, e))
}
