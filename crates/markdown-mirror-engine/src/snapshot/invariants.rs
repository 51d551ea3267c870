//! Structural invariant checks used by tests.
//!
//! Asserts the span discipline over a whole document: every span is within
//! the document, children sit inside their parents, and siblings appear in
//! source order without overlap.

use crate::cst::{Block, Document, Inline, Span};

/// Panics when any span invariant is violated.
pub fn check(doc: &Document) {
    check_blocks(&doc.blocks, doc.span, "document");
}

fn check_blocks(blocks: &[Block], parent: Span, what: &str) {
    let mut prev_end = parent.start;
    for block in blocks {
        let span = block.span();
        assert!(
            span.start <= span.end,
            "{what}: inverted block span {span:?}"
        );
        assert!(
            parent.contains(span),
            "{what}: block span {span:?} outside parent {parent:?}"
        );
        assert!(
            prev_end <= span.start,
            "{what}: block span {span:?} overlaps predecessor ending at {prev_end}"
        );
        prev_end = span.end;

        match block {
            Block::Paragraph { children, .. } | Block::Heading { children, .. } => {
                check_inlines(children, span);
            }
            Block::Blockquote { children, .. } | Block::FootnoteDef { children, .. } => {
                check_blocks(children, span, "container");
            }
            Block::BulletList { items, .. } | Block::OrderedList { items, .. } => {
                let mut prev_item_end = span.start;
                for item in items {
                    assert!(
                        span.contains(item.span),
                        "item span {:?} outside list {span:?}",
                        item.span
                    );
                    assert!(prev_item_end <= item.span.start, "item spans overlap");
                    prev_item_end = item.span.end;
                    check_blocks(&item.children, item.span, "list item");
                }
            }
            Block::Table { header, rows, .. } => {
                for cell in header.iter().chain(rows.iter().flatten()) {
                    assert!(
                        span.contains(cell.span),
                        "cell span {:?} outside table {span:?}",
                        cell.span
                    );
                    check_inlines(&cell.children, cell.span);
                }
            }
            _ => {}
        }
    }
}

fn check_inlines(inlines: &[Inline], parent: Span) {
    let mut prev_end = parent.start;
    for node in inlines {
        let span = node.span();
        assert!(span.start <= span.end, "inverted inline span {span:?}");
        assert!(
            parent.contains(span),
            "inline span {span:?} outside parent {parent:?}"
        );
        assert!(
            prev_end <= span.start,
            "inline span {span:?} overlaps predecessor ending at {prev_end}"
        );
        prev_end = span.end;
        if let Some(children) = node.children() {
            check_inlines(children, span);
        }
    }
}
