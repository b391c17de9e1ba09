//! Data block extraction.
//!
//! An IMF file body is a run of data blocks separated by single marker
//! lines. [`BlockExtractor`] walks a single-pass line source and yields one
//! [`DataBlock`] per run. Marker lines are consumed and never appear in a
//! block.
//!
//! Two end states are kept apart: `Some(Ok(block))` with an empty block
//! means two markers were adjacent and more input may follow, while `None`
//! means the line source is exhausted.

use super::classifier::{LineKind, classify};
use crate::error::{ImfError, Result};
use std::io;
use std::iter::FusedIterator;

/// A line of the source file together with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub number: usize,
    pub text: String,
}

/// Contiguous data lines between two markers or file boundaries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataBlock {
    lines: Vec<RawLine>,
}

impl DataBlock {
    pub fn lines(&self) -> &[RawLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl IntoIterator for DataBlock {
    type Item = RawLine;
    type IntoIter = std::vec::IntoIter<RawLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

/// Lazy, non-restartable sequence of data blocks over a line source
#[derive(Debug)]
pub struct BlockExtractor<I> {
    lines: I,
    next_line_number: usize,
    exhausted: bool,
}

impl<I> BlockExtractor<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    /// Create an extractor whose first line carries `first_line_number`.
    ///
    /// The assembler passes 2 because it has already consumed the header.
    pub fn new(lines: I, first_line_number: usize) -> Self {
        Self {
            lines,
            next_line_number: first_line_number,
            exhausted: false,
        }
    }

    /// Line number the next pulled line will receive
    pub fn next_line_number(&self) -> usize {
        self.next_line_number
    }

    fn fail(&mut self, error: ImfError) -> Option<Result<DataBlock>> {
        self.exhausted = true;
        Some(Err(error))
    }
}

impl<I> Iterator for BlockExtractor<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<DataBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let mut block = DataBlock::default();
        loop {
            let Some(line) = self.lines.next() else {
                // The trailing block needs no closing marker
                self.exhausted = true;
                return Some(Ok(block));
            };

            let number = self.next_line_number;
            self.next_line_number += 1;

            let text = match line {
                Ok(text) => text,
                Err(e) => return self.fail(e.into()),
            };

            match classify(&text, number) {
                Ok(LineKind::Marker) => return Some(Ok(block)),
                Ok(LineKind::Data) => block.lines.push(RawLine { number, text }),
                Err(e) => return self.fail(e),
            }
        }
    }
}

impl<I> FusedIterator for BlockExtractor<I> where I: Iterator<Item = io::Result<String>> {}
