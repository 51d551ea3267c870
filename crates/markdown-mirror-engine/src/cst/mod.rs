//! Concrete syntax tree types.
//!
//! Closed sum types for blocks and inlines, each node carrying a code-point
//! [`Span`] plus the trivia (markers, fence characters, quote styles, blank
//! runs) required to reproduce the source byte-for-byte.

pub mod block;
pub mod document;
pub mod inline;
pub mod span;

pub use block::{Block, FenceKind, ListItem, OrderedSuffix, TableAlign, TableCell};
pub use document::Document;
pub use inline::{Destination, HardBreakStyle, Inline, QuoteStyle, RefForm, Title};
pub use span::Span;
