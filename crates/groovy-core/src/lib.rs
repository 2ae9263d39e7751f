//! Core shared types for the Groovy resolution engine.
//!
//! This crate is intentionally small and dependency-free.

mod name;

pub use name::{
    binary_name_variants, canonical_name, internal_to_binary, package_name, simple_name,
    binary_to_internal,
};

/// A position in a source file expressed as 1-based (line, column).
///
/// Parsers of Groovy sources report positions this way; the engine never converts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A half-open `[start, end)` range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Convenience constructor for `[(start_line, start_col), (end_line, end_col))`.
    #[inline]
    pub const fn from_coords(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Returns `true` if `pos` lies inside this range; the end position is excluded.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Returns `true` if `other` lies entirely inside this range.
    #[must_use]
    pub fn contains_range(&self, other: Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
