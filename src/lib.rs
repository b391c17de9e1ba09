//! IMF Processor Library
//!
//! A Rust library for converting INTERMAGNET IMF v1.22 geomagnetic
//! observatory files into per-channel time series, and from there into
//! miniSEED archives and Parquet tables.
//!
//! This library provides tools for:
//! - Parsing IMF v1.22 files into four aligned channel series (N, E, Z, T)
//! - Encoding channel series as miniSEED v2 records in an SDS-style archive
//! - Writing observations to Parquet for analysis
//! - Converting whole archives concurrently with per-file error isolation
//!
//! ```no_run
//! use imf_processor::imf::read_imf;
//! use std::path::Path;
//!
//! let observation = read_imf(Path::new("2024/ABK/2024-01-01.abk"))?;
//! for series in &observation {
//!     println!("{} {} samples", series.label(), series.sample_count());
//! }
//! # Ok::<(), imf_processor::ImfError>(())
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod imf;
pub mod models;
pub mod output;
pub mod processor;

// Re-export commonly used types
pub use config::ImfConfig;
pub use error::{ImfError, Result};
pub use models::{Channel, ChannelSeries, HeaderMetadata, ParsedObservation, ProcessingStats};
pub use processor::ImfProcessor;
