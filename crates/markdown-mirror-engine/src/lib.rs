//! # markdown-mirror engine
//!
//! A lossless, block-incremental Markdown parser. Parsing produces a
//! concrete syntax tree whose serialization reproduces the input
//! byte-for-byte for the supported subset; repairing a document after an
//! edit re-parses only the blocks the edit touches and reuses the rest with
//! rebased spans.
//!
//! ## Architecture
//!
//! - **[`scanner`]**: code-point-indexed O(1) access over the source, with
//!   byte and UTF-16 offset tables for slicing and host adapters.
//! - **[`cst`]**: closed sum types for blocks and inlines; every node
//!   carries a code-point [`Span`](cst::Span) plus the trivia (markers,
//!   fence characters, quote styles, blank runs) needed for verbatim
//!   re-emission.
//! - **[`blocks`]**: the line-driven block parser. Lines are split once;
//!   containers collect and strip their inner lines and recurse; leaf
//!   recognition is owned by the `blocks::kinds` modules.
//! - **[`inline`]**: a single-pass tokenizer over (possibly non-contiguous)
//!   block content, plus delimiter-run pairing for emphasis — greedy by
//!   default, CommonMark Rule 9/10 in strict mode.
//! - **[`editing`]**: [`EditInfo`] descriptors and the incremental repair
//!   engine: affected-range detection, region re-parse, splice, span
//!   rebase, and conservative full-parse fallbacks.
//! - **[`serialize`]**: the lossless serializer with opt-in normalization.
//! - **[`refs`]**: the document-wide link reference index.
//! - **[`snapshot`]**: invariant checks and structural summaries for tests
//!   and preview layers.
//!
//! ## Usage
//!
//! ```rust
//! use markdown_mirror_engine::{parse, serialize, EditInfo, parse_incremental};
//! use markdown_mirror_engine::{ParseOptions, SerializeOptions};
//!
//! let source = "# Title\n\nSome *emphasis*.\n";
//! let doc = parse(source, ParseOptions::default());
//! assert_eq!(serialize(&doc, &SerializeOptions::default()), source);
//!
//! // Repair after inserting "really " at code point 14.
//! let edited = "# Title\n\nSome really *emphasis*.\n";
//! let doc2 = parse_incremental(&doc, source, edited, EditInfo::insert(14, 7),
//!     ParseOptions::default()).unwrap();
//! assert_eq!(serialize(&doc2, &SerializeOptions::default()), edited);
//! ```

pub mod blocks;
pub mod cst;
pub mod editing;
pub mod inline;
pub mod options;
pub mod refs;
pub mod scanner;
pub mod serialize;
pub mod snapshot;

pub use cst::{
    Block, Destination, Document, FenceKind, HardBreakStyle, Inline, ListItem, OrderedSuffix,
    QuoteStyle, RefForm, Span, TableAlign, TableCell, Title,
};
pub use editing::{parse_incremental, EditError, EditInfo};
pub use options::{ParseOptions, SerializeOptions};
pub use refs::{LinkReference, LinkReferenceIndex};
pub use scanner::Scanner;
pub use serialize::serialize;

use blocks::{parse_blocks, split_lines};

/// Parses a source string into an immutable [`Document`].
///
/// Never fails: arbitrary text is at worst a sequence of paragraphs.
pub fn parse(source: &str, options: ParseOptions) -> Document {
    let scanner = Scanner::new(source);
    let (lines, trailing_newline) = split_lines(&scanner);
    let blocks = parse_blocks(&lines, options);
    let refs = LinkReferenceIndex::collect(&blocks);
    Document {
        blocks,
        span: Span::new(0, scanner.len()),
        refs,
        trailing_newline,
    }
}
