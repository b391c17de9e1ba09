//! Serialization of parsed observations.
//!
//! The parser hands its output to a [`SeriesSink`]; each sink decides the
//! file format and where the files go. Sinks are built per file by
//! [`build_sinks`] so conversions running in parallel share nothing.

pub mod archive;
pub mod mseed;
pub mod parquet;

pub use archive::ArchiveLayout;
pub use mseed::{MiniSeedEncoder, MiniSeedSink};
pub use parquet::ParquetSink;

use crate::config::ImfConfig;
use crate::error::Result;
use crate::models::{ChannelSeries, ParsedObservation};
use std::path::{Path, PathBuf};

/// Destination for parsed channel series
pub trait SeriesSink: Send {
    /// Write one series, returning the file written if any
    fn write_series(&mut self, series: &ChannelSeries) -> Result<Option<PathBuf>>;

    /// Write all four series of an observation
    fn write_observation(&mut self, observation: &ParsedObservation) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for series in observation {
            if let Some(path) = self.write_series(series)? {
                written.push(path);
            }
        }
        Ok(written)
    }
}

/// Sinks for every output format enabled in `config`
pub fn build_sinks(config: &ImfConfig, archive_root: &Path) -> Result<Vec<Box<dyn SeriesSink>>> {
    let layout = ArchiveLayout::new(archive_root, config.archive_network.clone());
    let mut sinks: Vec<Box<dyn SeriesSink>> = Vec::new();

    if config.output_format.writes_mseed() {
        sinks.push(Box::new(MiniSeedSink::new(layout.clone(), config.record_length)?));
    }
    if config.output_format.writes_parquet() {
        sinks.push(Box::new(ParquetSink::new(layout, config.compression_algorithm)));
    }

    Ok(sinks)
}
