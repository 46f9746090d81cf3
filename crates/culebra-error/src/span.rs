//! Span - Source code location
//!
//! Positions are 1-indexed lines and columns, counted in characters.

/// A position in the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line (1-indexed)
    pub line: u32,
    /// Column (1-indexed)
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A region in the source code (start inclusive, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a span covering `width` characters on a single line
    pub fn on_line(start: Position, width: u32) -> Self {
        Self {
            start,
            end: Position::new(start.line, start.column + width),
        }
    }

    /// Creates a zero-width span
    pub fn point(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    /// Width in columns when the span stays on one line, otherwise 0
    pub fn width(&self) -> u32 {
        if self.start.line == self.end.line {
            self.end.column.saturating_sub(self.start.column)
        } else {
            0
        }
    }
}
