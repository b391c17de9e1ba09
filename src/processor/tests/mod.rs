//! Integration tests for the processor module
//!
//! Tests the complete conversion pipeline using temporary IMF archives.

pub mod basic_processing;
pub mod error_handling;

use std::fs;
use std::path::{Path, PathBuf};

/// Two hourly blocks of one day for `station`, four samples per channel
pub fn imf_day(station: &str) -> String {
    format!(
        "{sta} JAN0124 001 00 HDZF R GIN 06840198 000000 RRRRRRRRRRRR\n\
         0183420 -002313 0467890 0506000  0183421 -002312 0467891 0506001\n\
         {sta} JAN0124 001 01 HDZF R GIN 06840198 000000 RRRRRRRRRRRR\n\
         0183422 -002311 0467892 0506002  0183423 -002310 0467893 0999999\n",
        sta = station
    )
}

/// Write `content` below `root` at `relative`, creating directories
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}
