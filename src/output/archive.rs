//! Archive path layout.
//!
//! miniSEED files follow the SeisComP Data Structure used by observatory
//! archives:
//!
//! ```text
//! <root>/<year>/<NET>/<STA>/<CHA>.D/<NET>.<STA>..<CHA>.D.<year>.<julday>
//! ```
//!
//! Parquet files sit next to the channel directories of their station.
//! Station and network codes become path components, so both must be short
//! alphanumeric codes before any path is built.

use crate::constants::ARCHIVE_DATA_QUALITY;
use crate::constants::mseed::{NETWORK_WIDTH, STATION_WIDTH};
use crate::error::{ImfError, Result};
use crate::models::{ChannelSeries, HeaderMetadata};
use chrono::Datelike;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    root: PathBuf,
    network: String,
}

impl ArchiveLayout {
    pub fn new(root: impl Into<PathBuf>, network: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            network: network.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    fn station_dir(&self, metadata: &HeaderMetadata) -> Result<PathBuf> {
        let network = checked_code("network", &self.network, NETWORK_WIDTH)?;
        let station = checked_code("station", &metadata.station_code, STATION_WIDTH)?;
        Ok(self
            .root
            .join(metadata.start_time.year().to_string())
            .join(network)
            .join(station))
    }

    /// Directory holding all day files of one channel
    pub fn channel_dir(&self, series: &ChannelSeries) -> Result<PathBuf> {
        Ok(self
            .station_dir(series.metadata())?
            .join(format!("{}.{}", series.label(), ARCHIVE_DATA_QUALITY)))
    }

    /// Full path of the miniSEED day file for a series
    pub fn mseed_path(&self, series: &ChannelSeries) -> Result<PathBuf> {
        let start = series.start_time();
        let file_name = format!(
            "{net}.{sta}..{cha}.{q}.{year}.{julday:03}",
            net = self.network,
            sta = series.station_code(),
            cha = series.label(),
            q = ARCHIVE_DATA_QUALITY,
            year = start.year(),
            julday = start.ordinal(),
        );
        Ok(self.channel_dir(series)?.join(file_name))
    }

    /// Full path of the Parquet file for one parsed file
    pub fn parquet_path(&self, metadata: &HeaderMetadata) -> Result<PathBuf> {
        let start = metadata.start_time;
        let file_name = format!(
            "{}.{}.{}.{:03}.parquet",
            self.network,
            metadata.station_code,
            start.year(),
            start.ordinal()
        );
        Ok(self.station_dir(metadata)?.join(file_name))
    }
}

/// Accept `value` only as 1 to `width` ASCII alphanumeric characters
fn checked_code<'a>(field: &str, value: &'a str, width: usize) -> Result<&'a str> {
    if value.is_empty() || value.len() > width || !value.bytes().all(|b| b.is_ascii_alphanumeric())
    {
        return Err(ImfError::encoding(format!(
            "{} code '{}' must be 1-{} alphanumeric characters",
            field, value, width
        )));
    }
    Ok(value)
}

/// Remove a file left behind by a failed write
pub fn discard_partial(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Failed to remove partial file {}: {}", path.display(), e);
    }
}

/// Create the parent directory of `path` if needed
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
