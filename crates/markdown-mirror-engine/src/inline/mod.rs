//! Inline parsing.
//!
//! A block's content (projected through a [`ContentMap`] when container
//! prefixes make it non-contiguous) is tokenized in one pass, then the
//! emphasis resolver pairs delimiter runs — greedily by default, with the
//! CommonMark Rule 9/10 delimiter-stack constraints in strict mode.

pub mod content;
pub mod cursor;
pub(crate) mod emphasis;
pub mod kinds;
pub(crate) mod parser;

pub use content::ContentMap;

use crate::cst::Inline;
use crate::options::ParseOptions;

/// Parses a block's content into its ordered inline children.
pub fn parse_inlines(map: &ContentMap, opts: ParseOptions) -> Vec<Inline> {
    parser::parse_range(map, 0, map.len(), opts, 0)
}
