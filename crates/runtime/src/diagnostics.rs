//! Source positions for error reports
//!
//! Errors carry a byte offset into the source buffer. This module turns one
//! into a line and column and renders the familiar three-line report:
//!
//! ```text
//! prog.f:2:3: error: stack underflow
//! 1 +
//!   ^
//! ```

use std::fmt::Write;

/// Line/column of a byte offset, plus the extent of its line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based
    pub line: usize,
    /// 1-based, counted in characters
    pub column: usize,
    /// Byte range of the line, without its newline
    pub line_start: usize,
    pub line_end: usize,
}

impl Position {
    /// Locate `offset` in `source`; offsets past the end clamp to it
    pub fn locate(source: &[u8], offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];

        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let line_end = source[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(source.len(), |i| offset + i);

        let column = String::from_utf8_lossy(&source[line_start..offset])
            .chars()
            .count()
            + 1;

        Position {
            line,
            column,
            line_start,
            line_end,
        }
    }

    pub fn line_text<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        &source[self.line_start..self.line_end]
    }
}

/// Render a fatal error for a human reader
///
/// Without a position only the header line is produced.
pub fn render_error(name: &str, source: &[u8], position: Option<usize>, message: &str) -> String {
    let Some(offset) = position else {
        return format!("{}: error: {}", name, message);
    };

    let pos = Position::locate(source, offset);
    let line = String::from_utf8_lossy(pos.line_text(source));

    let mut out = String::new();
    let _ = writeln!(out, "{}:{}:{}: error: {}", name, pos.line, pos.column, message);
    let _ = writeln!(out, "{}", line.trim_end_matches('\r'));
    let _ = write!(out, "{:spaces$}^", "", spaces = pos.column - 1);
    out
}
