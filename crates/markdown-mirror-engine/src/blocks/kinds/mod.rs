//! Block constructs with their owned delimiters.
//!
//! Each construct's syntax knowledge (prefix characters, fence runs, marker
//! shapes) lives with the type that represents it; the classifier and
//! builder call these helpers and never hardcode delimiters.

pub mod block_quote;
pub mod code_fence;
pub mod footnote;
pub mod heading;
pub mod html_block;
pub mod link_ref_def;
pub mod list_item;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use footnote::Footnote;
pub use heading::AtxHeading;
pub use html_block::HtmlBlock;
pub use link_ref_def::{RefDef, RefDefParts};
pub use list_item::{ListMarker, MarkerMatch, TaskMarker};
pub use table::Table;
pub use thematic_break::ThematicBreak;
