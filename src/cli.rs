//! Command-line interface components.

use crate::config::{CompressionAlgorithm, ImfConfig, OutputFormat};
use crate::constants::{DEFAULT_ARCHIVE_NETWORK, DEFAULT_STATION_PATTERN, mseed};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Mseed,
    Parquet,
    Both,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Mseed => OutputFormat::MiniSeed,
            FormatArg::Parquet => OutputFormat::Parquet,
            FormatArg::Both => OutputFormat::Both,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "imf")]
#[command(about = "Convert IMF v1.22 geomagnetic observatory files to miniSEED and Parquet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Directory holding IMF files as <year>/<station>/<file>
    #[arg(value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// Archive root for converted files (defaults to a `miniseed` directory next to the input)
    #[arg(short, long)]
    pub archive_path: Option<PathBuf>,

    /// Station to convert (glob syntax)
    #[arg(short, long, default_value = DEFAULT_STATION_PATTERN)]
    pub station: String,

    /// Network code used in archive paths and record headers
    #[arg(short, long, default_value = DEFAULT_ARCHIVE_NETWORK)]
    pub network: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Mseed)]
    pub format: FormatArg,

    /// miniSEED record length in bytes
    #[arg(long, default_value_t = mseed::DEFAULT_RECORD_LENGTH)]
    pub record_length: usize,

    /// Parquet compression algorithm (snappy, zstd, lz4, none)
    #[arg(long, default_value = "snappy")]
    pub compression: String,

    /// Maximum number of files converted at once (defaults to CPU count)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Build the processing configuration from the arguments
    pub fn to_config(&self) -> Result<ImfConfig> {
        let mut config = ImfConfig::default()
            .with_station_pattern(self.station.clone())
            .with_archive_network(self.network.clone())
            .with_output_format(self.format.into())
            .with_record_length(self.record_length)
            .with_compression(CompressionAlgorithm::from_name(&self.compression)?);

        if let Some(jobs) = self.jobs {
            config = config.with_max_concurrent_files(jobs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Log level for the tracing filter
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
