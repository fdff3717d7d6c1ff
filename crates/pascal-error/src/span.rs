//! Span - Source text location
//!
//! Every token and every diagnostic carries a [`Span`] so that callers can
//! map it back onto the original Pascal source.

/// A position in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line (1-indexed)
    pub line: u32,
    /// Column in characters (1-indexed)
    pub column: u32,
    /// Byte offset from the beginning of the source
    pub offset: usize,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

/// A half-open region of the source text (`start..end`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
    /// Source file ID, used to look the text up in a `SourceCache`
    pub file_id: u32,
}

impl Span {
    pub fn new(start: Position, end: Position, file_id: u32) -> Self {
        Self { start, end, file_id }
    }

    /// Creates an empty span at a single position
    pub fn point(pos: Position, file_id: u32) -> Self {
        Self {
            start: pos,
            end: pos,
            file_id,
        }
    }

    /// Returns the covered text, or `None` if the span does not fit `source`
    pub fn slice<'src>(&self, source: &'src str) -> Option<&'src str> {
        source.get(self.start.offset..self.end.offset)
    }
}
