//! Application constants for the IMF processor
//!
//! Fixed properties of the IMF v1.22 layout, archive naming templates and
//! miniSEED record parameters used throughout the crate.

// =============================================================================
// IMF v1.22 Layout
// =============================================================================

/// Zero-based column whose character separates marker lines from data lines
pub const MARKER_COLUMN: usize = 29;

/// Shortest line that can be classified
pub const MIN_LINE_LENGTH: usize = MARKER_COLUMN + 1;

/// Whitespace-separated integer fields on every data line
pub const VALUES_PER_LINE: usize = 8;

/// Number of magnetic field components per sample
pub const CHANNEL_COUNT: usize = 4;

/// Nominal sample spacing of minute-mean IMF data
pub const SAMPLE_INTERVAL_SECONDS: u32 = 60;

/// Minimum number of whitespace tokens on the header line
pub const HEADER_MIN_TOKENS: usize = 4;

/// Network code carried in parsed metadata; IMF files do not name a network
pub const IMF_NETWORK_CODE: &str = "";

/// Value written by observatories for a missing sample
pub const MISSING_VALUE: i32 = 999_999;

// =============================================================================
// Channel Codes
// =============================================================================

/// SEED channel codes in output order: ultra-long period (U) magnetometer (F)
/// followed by the component
pub const CHANNEL_LABELS: [&str; CHANNEL_COUNT] = ["UFN", "UFE", "UFZ", "UFT"];

// =============================================================================
// Archive Layout
// =============================================================================

/// Network code used for archive directories and record headers
pub const DEFAULT_ARCHIVE_NETWORK: &str = "IM";

/// Name of the archive directory created next to the input directory
pub const DEFAULT_ARCHIVE_DIR_NAME: &str = "miniseed";

/// Quality suffix of SDS-style channel directories and files
pub const ARCHIVE_DATA_QUALITY: char = 'D';

/// Default station selector for file discovery
pub const DEFAULT_STATION_PATTERN: &str = "*";

// =============================================================================
// miniSEED v2
// =============================================================================

pub mod mseed {
    /// Length of the fixed section of the data header
    pub const FIXED_HEADER_SIZE: usize = 48;

    /// Offset of the first sample
    pub const DATA_OFFSET: usize = 64;

    /// Default record length in bytes
    pub const DEFAULT_RECORD_LENGTH: usize = 512;

    /// Smallest accepted record length
    pub const MIN_RECORD_LENGTH: usize = 256;

    /// Largest accepted record length
    pub const MAX_RECORD_LENGTH: usize = 4096;

    /// Blockette type for the data-only SEED blockette
    pub const BLOCKETTE_1000: u16 = 1000;

    /// Data encoding: 32-bit integers
    pub const ENCODING_INT32: u8 = 3;

    /// Word order: big endian
    pub const WORD_ORDER_BIG_ENDIAN: u8 = 1;

    /// Bytes per INT32 sample
    pub const SAMPLE_SIZE: usize = 4;

    /// Data quality indicator for unreviewed data
    pub const QUALITY_INDICATOR: u8 = b'D';

    /// Sequence numbers are six ASCII digits
    pub const MAX_SEQUENCE_NUMBER: u32 = 999_999;

    pub const STATION_WIDTH: usize = 5;
    pub const LOCATION_WIDTH: usize = 2;
    pub const CHANNEL_WIDTH: usize = 3;
    pub const NETWORK_WIDTH: usize = 2;
}

// =============================================================================
// Processing
// =============================================================================

/// Conversions running at once unless configured otherwise
pub fn default_max_concurrent_files() -> usize {
    num_cpus::get().max(1)
}
