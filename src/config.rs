//! Configuration management and validation.
//!
//! Provides the settings for a conversion run: which files to pick up, where
//! and in which formats to write them, and how many to convert at once.

use crate::constants::{
    DEFAULT_ARCHIVE_NETWORK, DEFAULT_STATION_PATTERN, default_max_concurrent_files, mseed,
};
use crate::error::{ImfError, Result};
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Output formats produced for each parsed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// One miniSEED file per channel in an SDS-style archive
    MiniSeed,
    /// One Parquet file per input file with all four channels
    Parquet,
    /// Both of the above
    Both,
}

impl OutputFormat {
    pub fn writes_mseed(&self) -> bool {
        matches!(self, OutputFormat::MiniSeed | OutputFormat::Both)
    }

    pub fn writes_parquet(&self) -> bool {
        matches!(self, OutputFormat::Parquet | OutputFormat::Both)
    }
}

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }

    /// Parse a command-line name (`snappy`, `zstd`, `lz4`, `none`)
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "snappy" => Ok(CompressionAlgorithm::Snappy),
            "zstd" => Ok(CompressionAlgorithm::Zstd),
            "lz4" => Ok(CompressionAlgorithm::Lz4),
            "none" | "uncompressed" => Ok(CompressionAlgorithm::Uncompressed),
            other => Err(ImfError::configuration(format!(
                "unknown compression '{}', expected snappy, zstd, lz4 or none",
                other
            ))),
        }
    }
}

/// Global configuration for IMF processing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImfConfig {
    /// Network code written into archive paths and record headers
    pub archive_network: String,

    /// Station selector used when discovering input files (glob syntax)
    pub station_pattern: String,

    /// Formats written for every parsed file
    pub output_format: OutputFormat,

    /// miniSEED record length in bytes (power of two)
    pub record_length: usize,

    /// Compression for Parquet output
    pub compression_algorithm: CompressionAlgorithm,

    /// Maximum concurrent file processing
    pub max_concurrent_files: usize,
}

impl Default for ImfConfig {
    fn default() -> Self {
        Self {
            archive_network: DEFAULT_ARCHIVE_NETWORK.to_string(),
            station_pattern: DEFAULT_STATION_PATTERN.to_string(),
            output_format: OutputFormat::MiniSeed,
            record_length: mseed::DEFAULT_RECORD_LENGTH,
            compression_algorithm: CompressionAlgorithm::Snappy,
            max_concurrent_files: default_max_concurrent_files(),
        }
    }
}

impl ImfConfig {
    /// Set the archive network code
    pub fn with_archive_network(mut self, network: impl Into<String>) -> Self {
        self.archive_network = network.into();
        self
    }

    /// Restrict discovery to matching stations
    pub fn with_station_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.station_pattern = pattern.into();
        self
    }

    /// Select output formats
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set miniSEED record length
    pub fn with_record_length(mut self, record_length: usize) -> Self {
        self.record_length = record_length;
        self
    }

    /// Set Parquet compression
    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression_algorithm = compression;
        self
    }

    /// Set maximum concurrent files
    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    /// Check that the settings can produce valid output
    pub fn validate(&self) -> Result<()> {
        let network_len = self.archive_network.len();
        if network_len == 0
            || network_len > mseed::NETWORK_WIDTH
            || !self.archive_network.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ImfError::configuration(format!(
                "network code '{}' must be 1-{} alphanumeric characters",
                self.archive_network,
                mseed::NETWORK_WIDTH
            )));
        }

        if !self.record_length.is_power_of_two()
            || !(mseed::MIN_RECORD_LENGTH..=mseed::MAX_RECORD_LENGTH)
                .contains(&self.record_length)
        {
            return Err(ImfError::configuration(format!(
                "record length {} must be a power of two between {} and {}",
                self.record_length,
                mseed::MIN_RECORD_LENGTH,
                mseed::MAX_RECORD_LENGTH
            )));
        }

        if self.max_concurrent_files == 0 {
            return Err(ImfError::configuration(
                "max concurrent files must be at least 1",
            ));
        }

        if self.station_pattern.trim().is_empty() {
            return Err(ImfError::configuration("station pattern must not be empty"));
        }

        debug!("Validated configuration: {:?}", self);
        Ok(())
    }
}
