//! Marker line detection.

use crate::constants::{MARKER_COLUMN, MIN_LINE_LENGTH};
use crate::error::{ImfError, Result};

/// Structural role of a line below the file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Marker,
    Data,
}

/// Classify a line by the character in its marker column.
///
/// `line_number` is only used to report a line that is too short.
pub fn classify(line: &str, line_number: usize) -> Result<LineKind> {
    if line.len() < MIN_LINE_LENGTH {
        return Err(ImfError::ShortLine {
            line: line_number,
            length: line.len(),
        });
    }

    match line.as_bytes()[MARKER_COLUMN] {
        b' ' => Ok(LineKind::Marker),
        _ => Ok(LineKind::Data),
    }
}
