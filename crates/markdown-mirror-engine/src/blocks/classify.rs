//! Line-local classification shared by the builder.
//!
//! These checks answer two questions the state machine keeps asking: would
//! this line start a new block here (ending an open paragraph), and does a
//! run of already-collected lines end in an open paragraph (the condition
//! for lazy continuation inside blockquotes and list items).

use crate::cst::FenceKind;

use super::kinds::{AtxHeading, BlockQuote, CodeFence, HtmlBlock, ListMarker, ThematicBreak};
use super::line::Line;

/// True when a line starts a new block at the current nesting level,
/// interrupting an open paragraph.
///
/// Indented code, link reference definitions, table delimiter rows and
/// footnote definitions do not interrupt; an ordered-list marker only
/// interrupts when its ordinal is 1 and the item has content.
pub fn interrupts_paragraph(text: &str) -> bool {
    if ThematicBreak::detect(text).is_some()
        || AtxHeading::detect(text).is_some()
        || CodeFence::open(text).is_some()
        || HtmlBlock::opens(text)
        || BlockQuote::strip_one(text).is_some()
    {
        return true;
    }
    if let Some(m) = ListMarker::detect(text) {
        let has_content = text.chars().count() > m.content_offset();
        let ordinal_ok = match m.marker {
            ListMarker::Ordered { ordinal, .. } => ordinal == 1,
            ListMarker::Bullet { .. } => true,
        };
        return has_content && ordinal_ok;
    }
    false
}

/// Whether a collected run of (container-stripped) lines ends with an open
/// paragraph. Tracks just enough state to stay out of fenced code.
pub fn paragraphish_tail(lines: &[Line]) -> bool {
    let mut fence: Option<(FenceKind, usize)> = None;
    let mut tail_is_paragraph = false;
    for line in lines {
        if let Some((kind, len)) = fence {
            if CodeFence::close(line.text, kind, len).is_some() {
                fence = None;
            }
            tail_is_paragraph = false;
            continue;
        }
        if line.is_blank() {
            tail_is_paragraph = false;
            continue;
        }
        if let Some((kind, len, _)) = CodeFence::open(line.text) {
            fence = Some((kind, len));
            tail_is_paragraph = false;
            continue;
        }
        if interrupts_paragraph(line.text) {
            tail_is_paragraph = false;
            continue;
        }
        if !tail_is_paragraph && line.indent_cols() >= 4 {
            // indented code, not a paragraph opener
            continue;
        }
        tail_is_paragraph = true;
    }
    tail_is_paragraph
}
