//! IMF v1.22 parser.
//!
//! Converts an INTERMAGNET IMF v1.22 minute-data file into four aligned
//! channel series (N, E, Z, T) in a single forward pass:
//!
//! - [`classifier`] tells marker lines from data lines by column 30
//! - [`blocks`] groups the lines between markers into data blocks
//! - [`header`] reads station and start time from the first line
//! - [`assembler`] drives the others and transposes the samples
//!
//! Any malformed line aborts the whole file; no partial result is returned.

pub mod assembler;
pub mod blocks;
pub mod classifier;
pub mod header;

#[cfg(test)]
mod tests;

pub use assembler::{SampleMatrix, parse_lines, parse_str, read_imf};
pub use blocks::{BlockExtractor, DataBlock, RawLine};
pub use classifier::{LineKind, classify};
pub use header::parse_header_line;
