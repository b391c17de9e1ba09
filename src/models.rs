//! Core data structures and types for IMF processing.
//!
//! Defines the channel set, the metadata shared by every series of a file,
//! the per-channel series themselves and processing statistics.

use crate::constants::{CHANNEL_COUNT, CHANNEL_LABELS, MISSING_VALUE};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Magnetic field components recorded in an IMF file, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    North,
    East,
    Vertical,
    TotalField,
}

impl Channel {
    /// All channels in the order their values appear on a data line
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::North,
        Channel::East,
        Channel::Vertical,
        Channel::TotalField,
    ];

    /// Position of this channel within a four-value row
    pub fn index(&self) -> usize {
        match self {
            Channel::North => 0,
            Channel::East => 1,
            Channel::Vertical => 2,
            Channel::TotalField => 3,
        }
    }

    /// SEED channel code, e.g. `UFN`
    pub fn label(&self) -> &'static str {
        CHANNEL_LABELS[self.index()]
    }

    /// Single-letter component code
    pub fn component(&self) -> char {
        match self {
            Channel::North => 'N',
            Channel::East => 'E',
            Channel::Vertical => 'Z',
            Channel::TotalField => 'T',
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metadata derived from the header line of an IMF file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMetadata {
    pub station_code: String,
    pub network_code: String,
    pub sample_interval_seconds: u32,
    pub start_time: DateTime<Utc>,
}

impl HeaderMetadata {
    /// Time of the sample at `index`
    pub fn sample_time(&self, index: usize) -> DateTime<Utc> {
        self.start_time + Duration::seconds(index as i64 * i64::from(self.sample_interval_seconds))
    }
}

/// One component's samples together with the file's shared metadata
#[derive(Debug, Clone)]
pub struct ChannelSeries {
    channel: Channel,
    values: Vec<i32>,
    metadata: Arc<HeaderMetadata>,
}

impl ChannelSeries {
    pub fn new(channel: Channel, values: Vec<i32>, metadata: Arc<HeaderMetadata>) -> Self {
        Self {
            channel,
            values,
            metadata,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn label(&self) -> &'static str {
        self.channel.label()
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn sample_count(&self) -> usize {
        self.values.len()
    }

    pub fn metadata(&self) -> &Arc<HeaderMetadata> {
        &self.metadata
    }

    pub fn station_code(&self) -> &str {
        &self.metadata.station_code
    }

    pub fn network_code(&self) -> &str {
        &self.metadata.network_code
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.metadata.start_time
    }

    pub fn sample_interval_seconds(&self) -> u32 {
        self.metadata.sample_interval_seconds
    }

    /// Time of the last sample, `None` for an empty series
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.sample_count()
            .checked_sub(1)
            .map(|last| self.metadata.sample_time(last))
    }

    /// Count of samples holding the missing-value sentinel
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|&&v| v == MISSING_VALUE).count()
    }
}

/// The four channel series parsed from one IMF file, ordered N, E, Z, T
#[derive(Debug, Clone)]
pub struct ParsedObservation {
    metadata: Arc<HeaderMetadata>,
    channels: [ChannelSeries; CHANNEL_COUNT],
}

impl ParsedObservation {
    /// Build an observation from channel-major value sequences.
    ///
    /// All sequences must have the same length; the assembler guarantees this
    /// by construction.
    pub fn new(metadata: HeaderMetadata, values: [Vec<i32>; CHANNEL_COUNT]) -> Self {
        debug_assert!(
            values.iter().all(|v| v.len() == values[0].len()),
            "channel lengths diverged"
        );

        let metadata = Arc::new(metadata);
        let [north, east, vertical, total] = values;
        let channels = [
            ChannelSeries::new(Channel::North, north, Arc::clone(&metadata)),
            ChannelSeries::new(Channel::East, east, Arc::clone(&metadata)),
            ChannelSeries::new(Channel::Vertical, vertical, Arc::clone(&metadata)),
            ChannelSeries::new(Channel::TotalField, total, Arc::clone(&metadata)),
        ];

        Self { metadata, channels }
    }

    pub fn metadata(&self) -> &HeaderMetadata {
        &self.metadata
    }

    pub fn channels(&self) -> &[ChannelSeries; CHANNEL_COUNT] {
        &self.channels
    }

    pub fn channel(&self, channel: Channel) -> &ChannelSeries {
        &self.channels[channel.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelSeries> {
        self.channels.iter()
    }

    /// Samples per channel
    pub fn sample_count(&self) -> usize {
        self.channels[0].sample_count()
    }

    pub fn into_channels(self) -> [ChannelSeries; CHANNEL_COUNT] {
        self.channels
    }
}

impl<'a> IntoIterator for &'a ParsedObservation {
    type Item = &'a ChannelSeries;
    type IntoIter = std::slice::Iter<'a, ChannelSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}

/// A file that could not be converted, with the reason
#[derive(Debug, Clone)]
pub struct FailedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_discovered: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_samples: usize,
    pub missing_samples: usize,
    pub series_written: usize,
    pub failed_files: Vec<FailedFile>,
    pub archive_path: PathBuf,
    pub processing_time_ms: u128,
}
