//! Record assembly: from IMF text to four channel series.
//!
//! Each data line holds two consecutive samples of all four components:
//!
//! ```text
//! N0 E0 Z0 T0  N1 E1 Z1 T1
//! ```
//!
//! Lines are split into two four-value rows and collected in a
//! [`SampleMatrix`], which is transposed by index into channel-major
//! sequences once the whole file has been read.

use super::blocks::{BlockExtractor, RawLine};
use super::header::{HEADER_LINE_NUMBER, parse_header_line};
use crate::constants::{CHANNEL_COUNT, VALUES_PER_LINE};
use crate::error::{ImfError, Result};
use crate::models::ParsedObservation;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Row-major buffer of samples, one four-value row per sample
#[derive(Debug, Default)]
pub struct SampleMatrix {
    rows: Vec<[i32; CHANNEL_COUNT]>,
}

impl SampleMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the two samples carried by one data line
    pub fn push_line(&mut self, values: [i32; VALUES_PER_LINE]) {
        for chunk in values.chunks_exact(CHANNEL_COUNT) {
            let mut row = [0; CHANNEL_COUNT];
            row.copy_from_slice(chunk);
            self.rows.push(row);
        }
    }

    /// Number of samples accumulated so far
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Transpose into one sequence per channel, ordered N, E, Z, T.
    ///
    /// Every returned sequence has exactly `self.len()` values.
    pub fn into_channels(self) -> [Vec<i32>; CHANNEL_COUNT] {
        let samples = self.rows.len();
        let mut channels: [Vec<i32>; CHANNEL_COUNT] =
            std::array::from_fn(|_| Vec::with_capacity(samples));

        for row in &self.rows {
            for (channel, value) in channels.iter_mut().zip(row) {
                channel.push(*value);
            }
        }

        debug_assert!(channels.iter().all(|c| c.len() == samples));
        channels
    }
}

/// Split a data line into its eight integer values
pub fn parse_data_line(line: &RawLine) -> Result<[i32; VALUES_PER_LINE]> {
    let tokens: Vec<&str> = line.text.split_whitespace().collect();
    if tokens.len() != VALUES_PER_LINE {
        return Err(ImfError::data_token(
            line.number,
            format!(
                "expected {} values, found {}",
                VALUES_PER_LINE,
                tokens.len()
            ),
        ));
    }

    let mut values = [0; VALUES_PER_LINE];
    for (slot, token) in values.iter_mut().zip(&tokens) {
        *slot = token.parse().map_err(|_| {
            ImfError::data_token(line.number, format!("'{}' is not an integer", token))
        })?;
    }

    Ok(values)
}

/// Parse an IMF file from a single-pass source of lines
pub fn parse_lines<I>(lines: I) -> Result<ParsedObservation>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut lines = lines.into_iter();

    let header = lines
        .next()
        .ok_or_else(|| ImfError::header_format(HEADER_LINE_NUMBER, "file is empty"))??;
    let metadata = parse_header_line(&header)?;

    let mut matrix = SampleMatrix::new();
    let mut block_count = 0;
    for block in BlockExtractor::new(lines, HEADER_LINE_NUMBER + 1) {
        for line in block? {
            matrix.push_line(parse_data_line(&line)?);
        }
        block_count += 1;
    }

    debug!(
        "Assembled {} samples per channel from {} blocks for station {}",
        matrix.len(),
        block_count,
        metadata.station_code
    );

    Ok(ParsedObservation::new(metadata, matrix.into_channels()))
}

/// Parse IMF text held in memory
pub fn parse_str(text: &str) -> Result<ParsedObservation> {
    parse_lines(text.lines().map(|line| Ok(line.to_string())))
}

/// Open and parse an IMF file
pub fn read_imf(path: &Path) -> Result<ParsedObservation> {
    let file = File::open(path)?;
    debug!("Parsing IMF file {}", path.display());
    parse_lines(BufReader::new(file).lines())
}
