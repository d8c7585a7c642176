//! Source positions and spans.
//!
//! A [`Position`] is 1-based in both line and column, matching the way
//! source files are normally reported to a human. Conversion to the
//! zero-based coordinates the LSP wire format expects is a pure
//! subtraction performed at the editor boundary, not here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single point in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub filename: PathBuf,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
    /// Byte offset from the start of the file.
    pub offset: u32,
}

impl Position {
    pub fn new(filename: impl Into<PathBuf>, line: u32, column: u32, offset: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
            offset,
        }
    }

    /// A placeholder position used when a parser fails before producing
    /// any real location (defaults to line 1, column 1).
    pub fn start_of(filename: impl Into<PathBuf>) -> Self {
        Self::new(filename, 1, 1, 0)
    }

    /// Zero-based `(line, character)` pair for the LSP wire format.
    pub fn to_zero_based(&self) -> (u32, u32) {
        (self.line.saturating_sub(1), self.column.saturating_sub(1))
    }
}

/// An inclusive start / exclusive end span within a single file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn point(pos: Position) -> Self {
        Self {
            end: pos.clone(),
            start: pos,
        }
    }

    pub fn file(&self) -> &Path {
        &self.start.filename
    }
}

/// Find the 1-based `(line, column)` of a byte offset in `source`.
///
/// Used by components (the resolver, the collector) that only have a
/// byte offset from an upstream parser and need a displayable position.
pub fn offset_to_line_column(source: &str, offset: usize) -> (u32, u32) {
    let mut line: u32 = 1;
    let mut col: u32 = 1;
    let mut seen = 0usize;

    for ch in source.chars() {
        if seen >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
        seen += ch.len_utf8();
    }

    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_based_subtracts_one() {
        let pos = Position::new("a.vdl", 3, 5, 40);
        assert_eq!(pos.to_zero_based(), (2, 4));
    }

    #[test]
    fn offset_to_line_column_counts_newlines() {
        let src = "type A {\n  name: string\n}\n";
        assert_eq!(offset_to_line_column(src, 0), (1, 1));
        assert_eq!(offset_to_line_column(src, 9), (2, 1));
        let name_offset = src.find("name").unwrap();
        assert_eq!(offset_to_line_column(src, name_offset), (2, 3));
    }
}
