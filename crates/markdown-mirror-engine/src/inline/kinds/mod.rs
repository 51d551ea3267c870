//! Inline constructs with their owned delimiters and scanners.

pub mod autolink;
pub mod code_span;
pub mod html;
pub mod link;

pub use autolink::Autolink;
pub use code_span::{run_len, CodeSpan, CodeSpanScan};
pub use html::HtmlInline;
pub use link::{contains_link, scan_image, scan_link};
