//! Affected-range detection, region re-parse, and block splicing.

use crate::blocks::{parse_blocks, split_lines};
use crate::cst::{Block, Document, Span};
use crate::options::ParseOptions;
use crate::refs::LinkReferenceIndex;
use crate::scanner::Scanner;

use super::{EditError, EditInfo};

/// Repairs a document after one contiguous edit.
///
/// The result is structurally equal to `parse(new_source)`; blocks outside
/// the affected range are reused with spans shifted by the edit's delta.
/// Errors only signal misuse (an edit descriptor inconsistent with the
/// sources); any parsing difficulty silently falls back to a full parse.
pub fn parse_incremental(
    old_doc: &Document,
    old_source: &str,
    new_source: &str,
    edit: EditInfo,
    opts: ParseOptions,
) -> Result<Document, EditError> {
    let old_len = old_source.chars().count();
    let new_len = new_source.chars().count();
    validate(old_doc, edit, old_len, new_len)?;

    let full = || crate::parse(new_source, opts);

    // CRLF terminators make block gaps two code points wide; not worth
    // special-casing in the splice math.
    if old_source.contains('\r') || new_source.contains('\r') {
        return Ok(full());
    }

    let blocks = &old_doc.blocks;
    let n = blocks.len();
    if n == 0 {
        return Ok(full());
    }

    // Affected range: first block the edit touches (end-inclusive, so an
    // append at a block's last character re-parses it), last block whose
    // start the edit reaches.
    let mut lo = blocks
        .iter()
        .position(|b| b.span().end >= edit.start)
        .unwrap_or(n - 1);
    let mut hi = blocks
        .iter()
        .rposition(|b| b.span().start <= edit.old_end)
        .unwrap_or(lo);
    if hi < lo {
        hi = lo;
    }
    // Boundary expansion: an edit at a block edge may fuse with the
    // neighbour on that side.
    if edit.start <= blocks[lo].span().start && lo > 0 {
        lo -= 1;
    }
    if edit.old_end >= blocks[hi].span().end && hi + 1 < n {
        hi += 1;
    }

    if lo == 0 && hi == n - 1 {
        return Ok(full());
    }

    // Containers in or next to the affected range can change the meaning of
    // lines the simple expansion does not reach.
    let guard_lo = lo.saturating_sub(1);
    let guard_hi = (hi + 1).min(n - 1);
    if blocks[guard_lo..=guard_hi].iter().any(Block::is_container) {
        return Ok(full());
    }

    // Region bounds: from the start of the first affected block through the
    // last affected block's line terminator (or the end of input).
    let region_start = blocks[lo].span().start;
    let old_region_end = if hi + 1 < n {
        blocks[hi].span().end + 1
    } else {
        old_len
    };
    let new_region_end = (old_region_end as isize + edit.delta()) as usize;

    let region = &new_source[byte_of(new_source, region_start)..byte_of(new_source, new_region_end)];
    let scanner = Scanner::new(region);
    let (lines, _) = split_lines(&scanner);
    let mut middle = parse_blocks(&lines, opts);
    for block in &mut middle {
        block.shift(region_start as isize);
    }
    if middle.is_empty() {
        return Ok(full());
    }

    if !seams_are_safe(blocks, lo, hi, &middle) {
        return Ok(full());
    }

    let mut assembled: Vec<Block> = Vec::with_capacity(n + middle.len());
    for block in &blocks[..lo] {
        push_merging_blanks(&mut assembled, block.clone());
    }
    for block in middle {
        push_merging_blanks(&mut assembled, block);
    }
    for block in &blocks[hi + 1..] {
        let mut shifted = block.clone();
        shifted.shift(edit.delta());
        push_merging_blanks(&mut assembled, shifted);
    }

    let refs = LinkReferenceIndex::collect(&assembled);
    Ok(Document {
        blocks: assembled,
        span: Span::new(0, new_len),
        refs,
        trailing_newline: new_source.ends_with('\n'),
    })
}

fn validate(
    old_doc: &Document,
    edit: EditInfo,
    old_len: usize,
    new_len: usize,
) -> Result<(), EditError> {
    if edit.start > edit.old_end {
        return Err(EditError::InvertedRange {
            start: edit.start,
            end: edit.old_end,
        });
    }
    if edit.start > edit.new_end {
        return Err(EditError::InvertedRange {
            start: edit.start,
            end: edit.new_end,
        });
    }
    if edit.old_end > old_len {
        return Err(EditError::OutOfBounds {
            start: edit.start,
            end: edit.old_end,
            len: old_len,
        });
    }
    if edit.new_end > new_len {
        return Err(EditError::OutOfBounds {
            start: edit.start,
            end: edit.new_end,
            len: new_len,
        });
    }
    if new_len as isize != old_len as isize + edit.delta() {
        return Err(EditError::LengthMismatch {
            old_len,
            new_len,
            delta: edit.delta(),
        });
    }
    if old_doc.source_len() != old_len {
        return Err(EditError::StaleDocument {
            doc_len: old_doc.source_len(),
            old_len,
        });
    }
    Ok(())
}

/// A splice is only kept when the re-parsed middle cannot interact with the
/// reused blocks on either side.
fn seams_are_safe(blocks: &[Block], lo: usize, hi: usize, middle: &[Block]) -> bool {
    let is_blank = |b: &Block| matches!(b, Block::BlankLines { .. });
    let is_indented = |b: &Block| matches!(b, Block::IndentedCode { .. });

    // An unterminated fence swallows everything after it in a full parse.
    if hi + 1 < blocks.len()
        && matches!(
            middle.last(),
            Some(Block::FencedCode {
                close_len: None,
                ..
            })
        )
    {
        return false;
    }

    // A non-blank seam lets paragraph continuation, HTML, and table rules
    // reach across the boundary.
    if lo > 0 && !is_blank(&blocks[lo - 1]) && !middle.first().is_some_and(is_blank) {
        return false;
    }
    if hi + 1 < blocks.len() && !is_blank(&blocks[hi + 1]) && !middle.last().is_some_and(is_blank) {
        return false;
    }

    // Indented code chunks merge across blank lines, so keep clear of them
    // near either seam.
    if middle.first().is_some_and(is_indented) || middle.last().is_some_and(is_indented) {
        return false;
    }
    if blocks[..lo].iter().rev().take(2).any(is_indented) {
        return false;
    }
    if blocks[hi + 1..].iter().take(2).any(is_indented) {
        return false;
    }

    true
}

/// Appends a block, merging adjacent blank runs so splice seams match what
/// a full parse would produce.
fn push_merging_blanks(out: &mut Vec<Block>, block: Block) {
    if let Block::BlankLines { span, count } = &block {
        if let Some(Block::BlankLines {
            span: prev_span,
            count: prev_count,
        }) = out.last_mut()
        {
            prev_span.end = span.end;
            *prev_count += *count;
            return;
        }
    }
    out.push(block);
}

fn byte_of(s: &str, cp: usize) -> usize {
    s.char_indices().nth(cp).map(|(b, _)| b).unwrap_or(s.len())
}
