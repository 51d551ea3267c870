//! Block parsing.
//!
//! Two layers, following the container-stack model:
//!
//! 1. **Line splitting** (`line`): the source becomes a sequence of lines
//!    with code-point spans; container stripping produces further lines that
//!    still point into the original source.
//! 2. **Block construction** (`builder`): a single pass over the lines opens
//!    containers by collecting and recursing on their stripped bodies, and
//!    classifies the rest into leaf blocks via the `kinds` helpers.
//!
//! Fenced code, indented code, and HTML blocks are raw zones: their text is
//! stored verbatim and never inline-parsed.

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod line;

pub use builder::parse_blocks;
pub use line::{split_lines, Line};
