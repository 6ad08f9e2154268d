//! Text span and range types for source location tracking.
//!
//! All positions are character offsets (not bytes) into the text that was
//! scanned, so a span can be shown to a user without re-decoding UTF-8.

use std::fmt;

/// A position in source text, measured in characters from the start.
pub type TextPos = u32;

/// A span in source text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextSpan {
    /// The character offset where this span starts.
    pub start: TextPos,
    /// The length of this span in characters.
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from half-open start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    /// Whether this span contains the given position.
    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

/// A text range with start and end positions, as stored on AST nodes.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextRange {
    /// Start offset (inclusive).
    pub pos: TextPos,
    /// End offset (exclusive).
    pub end: TextPos,
}

impl TextRange {
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    #[inline]
    pub fn to_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    /// Whether this range contains a position. The end offset counts as
    /// inside so that a location at the very end of a block still resolves
    /// to that block.
    #[inline]
    pub fn contains_inclusive(&self, pos: TextPos) -> bool {
        pos >= self.pos && pos <= self.end
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

/// A zero-based line and character column.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LineAndColumn {
    pub line: u32,
    pub character: u32,
}

/// Offsets of line starts in a text, for turning a character offset into a
/// line and column. Only `\n` ends a line.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let breaks = text
            .chars()
            .enumerate()
            .filter(|&(_, ch)| ch == '\n')
            .map(|(i, _)| i as TextPos + 1);
        Self {
            line_starts: std::iter::once(0).chain(breaks).collect(),
        }
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        // line_starts[0] == 0, so at least one start is <= pos
        let line = self.line_starts.partition_point(|&start| start <= pos) - 1;
        LineAndColumn {
            line: line as u32,
            character: pos - self.line_starts[line],
        }
    }
}

/// Convert a character offset into a byte offset of `text`. Offsets past the
/// end clamp to `text.len()`.
pub fn char_to_byte_offset(text: &str, pos: TextPos) -> usize {
    text.char_indices()
        .nth(pos as usize)
        .map_or(text.len(), |(byte, _)| byte)
}
