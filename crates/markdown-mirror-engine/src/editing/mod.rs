//! Edit descriptors and block-incremental repair.
//!
//! An [`EditInfo`] describes one contiguous change in code-point units.
//! [`parse_incremental`](crate::parse_incremental) localizes the edit to a
//! minimal block range, re-parses just that slice of the new source, and
//! splices the result between reused, span-rebased neighbours. Whenever the
//! surrounding context could leak into the re-parsed region (containers,
//! indented code, unterminated fences, non-blank seams) it falls back to a
//! full parse; correctness always wins over reuse.

pub mod incremental;

use thiserror::Error;

pub use incremental::parse_incremental;

/// One contiguous edit: `[start, old_end)` in the old source was replaced
/// by `[start, new_end)` in the new source. Offsets are code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditInfo {
    pub start: usize,
    pub old_end: usize,
    pub new_end: usize,
}

impl EditInfo {
    /// An insertion of `new_len` code points at `pos`.
    pub fn insert(pos: usize, new_len: usize) -> Self {
        Self {
            start: pos,
            old_end: pos,
            new_end: pos + new_len,
        }
    }

    /// A deletion of `[start, end)`.
    pub fn delete(start: usize, end: usize) -> Self {
        Self {
            start,
            old_end: end,
            new_end: start,
        }
    }

    /// A replacement of `[start, old_end)` by `new_len` code points.
    pub fn replace(start: usize, old_end: usize, new_len: usize) -> Self {
        Self {
            start,
            old_end,
            new_end: start + new_len,
        }
    }

    /// Signed length difference introduced by the edit.
    pub fn delta(&self) -> isize {
        self.new_end as isize - self.old_end as isize
    }
}

/// Programmer errors in an incremental parse request. Malformed Markdown is
/// never an error; these only fire when the edit descriptor contradicts the
/// supplied sources.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit range is inverted: start {start} > end {end}")]
    InvertedRange { start: usize, end: usize },
    #[error("edit range {start}..{end} is outside the source (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("source lengths disagree with edit: old {old_len} + delta {delta} != new {new_len}")]
    LengthMismatch {
        old_len: usize,
        new_len: usize,
        delta: isize,
    },
    #[error("document was parsed from a source of length {doc_len}, got {old_len}")]
    StaleDocument { doc_len: usize, old_len: usize },
}
