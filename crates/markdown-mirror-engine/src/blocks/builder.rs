//! Line-driven block construction.
//!
//! [`parse_blocks`] walks a slice of lines once, opening containers
//! (blockquotes, lists, footnote definitions) by collecting their stripped
//! inner lines and recursing, and classifying everything else into leaf
//! blocks. Inline parsing happens as text-bearing leaves are emitted.

use crate::cst::{Block, ListItem, Span, TableCell};
use crate::inline::{self, ContentMap};
use crate::options::ParseOptions;

use super::classify::{interrupts_paragraph, paragraphish_tail};
use super::kinds::{
    AtxHeading, BlockQuote, CodeFence, Footnote, HtmlBlock, ListMarker, MarkerMatch, RefDef,
    Table, TaskMarker, ThematicBreak,
};
use super::line::Line;

/// Parses a region of lines into an ordered block sequence.
pub fn parse_blocks(lines: &[Line], opts: ParseOptions) -> Vec<Block> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if line.is_blank() {
            let start = i;
            while i < lines.len() && lines[i].is_blank() {
                i += 1;
            }
            out.push(Block::BlankLines {
                span: Span::new(lines[start].span.start, lines[i - 1].span.end),
                count: i - start,
            });
            continue;
        }

        if BlockQuote::strip_one(line.text).is_some() {
            i = collect_blockquote(lines, i, opts, &mut out);
            continue;
        }

        if let Some(m) = ListMarker::detect(line.text) {
            if ThematicBreak::detect(line.text).is_none() {
                i = collect_list(lines, i, m, opts, &mut out);
                continue;
            }
        }

        if line.indent_cols() >= 4 {
            i = collect_indented(lines, i, &mut out);
            continue;
        }

        if let Some(marker) = ThematicBreak::detect(line.text) {
            out.push(Block::ThematicBreak {
                span: line.span,
                marker,
                literal: line.text.to_string(),
            });
            i += 1;
            continue;
        }

        if let Some((level, offset)) = AtxHeading::detect(line.text) {
            let content = line.strip_chars(offset);
            let children = inline::parse_inlines(&ContentMap::from_lines(&[content]), opts);
            out.push(Block::Heading {
                span: line.span,
                level,
                children,
            });
            i += 1;
            continue;
        }

        if let Some((kind, open_len, info)) = CodeFence::open(line.text) {
            i = collect_fence(lines, i, kind, open_len, info, &mut out);
            continue;
        }

        if HtmlBlock::opens(line.text) {
            i = collect_html(lines, i, &mut out);
            continue;
        }

        if opts.gfm {
            if let Some((label, consumed)) = Footnote::def(line.text) {
                i = collect_footnote(lines, i, label, consumed, opts, &mut out);
                continue;
            }
        }

        if let Some(parts) = RefDef::parse(line.text) {
            out.push(Block::LinkRefDef {
                span: line.span,
                label: parts.label,
                dest: parts.dest,
                title: parts.title,
                raw: line.text.to_string(),
            });
            i += 1;
            continue;
        }

        i = collect_paragraph(lines, i, opts, &mut out);
    }
    out
}

fn collect_blockquote(
    lines: &[Line],
    start: usize,
    opts: ParseOptions,
    out: &mut Vec<Block>,
) -> usize {
    let mut inner: Vec<Line> = Vec::new();
    let mut i = start;
    while i < lines.len() {
        let line = lines[i];
        if let Some(consumed) = BlockQuote::strip_one(line.text) {
            inner.push(line.strip_chars(consumed));
            i += 1;
        } else if !line.is_blank()
            && !interrupts_paragraph(line.text)
            && paragraphish_tail(&inner)
        {
            // lazy paragraph continuation, prefix omitted in the source
            inner.push(line);
            i += 1;
        } else {
            break;
        }
    }
    let children = parse_blocks(&inner, opts);
    out.push(Block::Blockquote {
        span: Span::new(lines[start].span.start, lines[i - 1].span.end),
        children,
    });
    i
}

struct RawItem<'a> {
    span: Span,
    pad: usize,
    ordinal: Option<u64>,
    task: Option<bool>,
    content_offset: usize,
    lines: Vec<Line<'a>>,
}

fn open_item<'a>(line: Line<'a>, m: MarkerMatch, gfm: bool) -> RawItem<'a> {
    let mut content = line.strip_chars(m.content_offset());
    let mut task = None;
    if gfm && m.pad > 0 {
        if let Some((checked, consumed)) = TaskMarker::detect(content.text) {
            task = Some(checked);
            content = content.strip_chars(consumed);
        }
    }
    let ordinal = match m.marker {
        ListMarker::Ordered { ordinal, .. } => Some(ordinal),
        ListMarker::Bullet { .. } => None,
    };
    RawItem {
        span: line.span,
        pad: m.pad,
        ordinal,
        task,
        content_offset: m.content_offset(),
        lines: if content.text.is_empty() {
            Vec::new()
        } else {
            vec![content]
        },
    }
}

fn collect_list(
    lines: &[Line],
    start: usize,
    first: MarkerMatch,
    opts: ParseOptions,
    out: &mut Vec<Block>,
) -> usize {
    let marker_kind = first.marker;
    let mut items = vec![open_item(lines[start], first, opts.gfm)];
    let mut i = start + 1;
    let mut pending: Vec<Line> = Vec::new();
    let mut pending_start = 0;

    while i < lines.len() {
        let line = lines[i];
        if line.is_blank() {
            if pending.is_empty() {
                pending_start = i;
            }
            pending.push(line);
            i += 1;
            continue;
        }

        let marker = if ThematicBreak::detect(line.text).is_none() {
            ListMarker::detect(line.text)
        } else {
            None
        };
        if let Some(m) = marker {
            if !m.marker.same_list(marker_kind) {
                break;
            }
            // blank lines between items stay with the item they follow
            let last = items.len() - 1;
            items[last].lines.append(&mut pending);
            if let Some(end) = items[last].lines.last().map(|l| l.span.end) {
                items[last].span.end = end;
            }
            items.push(open_item(line, m, opts.gfm));
            i += 1;
            continue;
        }

        let last = items.len() - 1;
        let offset = items[last].content_offset;
        if line.indent_cols() >= offset {
            items[last].lines.append(&mut pending);
            items[last].lines.push(line.strip_cols(offset));
            items[last].span.end = line.span.end;
            i += 1;
            continue;
        }

        if pending.is_empty()
            && !interrupts_paragraph(line.text)
            && paragraphish_tail(&items[last].lines)
        {
            items[last].lines.push(line);
            items[last].span.end = line.span.end;
            i += 1;
            continue;
        }

        break;
    }
    if !pending.is_empty() {
        i = pending_start;
    }

    let mut cst_items = Vec::with_capacity(items.len());
    let mut loose = false;
    for mut item in items {
        while item.lines.first().is_some_and(|l| l.is_blank()) {
            item.lines.remove(0);
        }
        let children = parse_blocks(&item.lines, opts);
        if children
            .iter()
            .any(|b| matches!(b, Block::BlankLines { .. }))
        {
            loose = true;
        }
        cst_items.push(ListItem {
            span: item.span,
            pad: item.pad,
            ordinal: item.ordinal,
            task: item.task,
            children,
        });
    }

    let end = cst_items
        .last()
        .map(|item| item.span.end)
        .unwrap_or(lines[start].span.end);
    let span = Span::new(lines[start].span.start, end);
    let tight = !loose;
    out.push(match marker_kind {
        ListMarker::Bullet { ch } => Block::BulletList {
            span,
            marker: ch,
            tight,
            items: cst_items,
        },
        ListMarker::Ordered { ordinal, suffix } => Block::OrderedList {
            span,
            start: ordinal,
            suffix,
            tight,
            items: cst_items,
        },
    });
    i
}

fn collect_indented(lines: &[Line], start: usize, out: &mut Vec<Block>) -> usize {
    let mut last_content = start;
    let mut i = start;
    while i < lines.len() {
        let line = lines[i];
        if line.is_blank() {
            i += 1;
            continue;
        }
        if line.indent_cols() >= 4 {
            last_content = i;
            i += 1;
        } else {
            break;
        }
    }
    let literal = lines[start..=last_content]
        .iter()
        .map(|l| l.text)
        .collect::<Vec<_>>()
        .join("\n");
    out.push(Block::IndentedCode {
        span: Span::new(lines[start].span.start, lines[last_content].span.end),
        literal,
    });
    last_content + 1
}

fn collect_fence(
    lines: &[Line],
    start: usize,
    kind: crate::cst::FenceKind,
    open_len: usize,
    info: &str,
    out: &mut Vec<Block>,
) -> usize {
    let mut close = None;
    let mut j = start + 1;
    while j < lines.len() {
        if let Some(len) = CodeFence::close(lines[j].text, kind, open_len) {
            close = Some(len);
            break;
        }
        j += 1;
    }

    let (end_idx, close_len, interior) = match close {
        Some(len) => (j, Some(len), &lines[start + 1..j]),
        None => (lines.len() - 1, None, &lines[start + 1..]),
    };
    // every interior line keeps its terminator; the document-level trailing
    // newline flag settles whether the very last one is emitted
    let mut body = String::new();
    for line in interior {
        body.push_str(line.text);
        body.push('\n');
    }

    out.push(Block::FencedCode {
        span: Span::new(lines[start].span.start, lines[end_idx].span.end),
        fence: kind,
        fence_len: open_len,
        close_len,
        info: info.to_string(),
        body,
    });
    end_idx + 1
}

fn collect_html(lines: &[Line], start: usize, out: &mut Vec<Block>) -> usize {
    let mut end = start;
    while end + 1 < lines.len() && !lines[end + 1].is_blank() {
        end += 1;
    }
    let literal = lines[start..=end]
        .iter()
        .map(|l| l.text)
        .collect::<Vec<_>>()
        .join("\n");
    out.push(Block::HtmlBlock {
        span: Span::new(lines[start].span.start, lines[end].span.end),
        literal,
    });
    end + 1
}

fn collect_footnote(
    lines: &[Line],
    start: usize,
    label: String,
    consumed: usize,
    opts: ParseOptions,
    out: &mut Vec<Block>,
) -> usize {
    let mut inner = vec![lines[start].strip_chars(consumed)];
    let mut i = start + 1;
    let mut pending: Vec<Line> = Vec::new();
    let mut pending_start = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.is_blank() {
            if pending.is_empty() {
                pending_start = i;
            }
            pending.push(line);
            i += 1;
            continue;
        }
        if line.indent_cols() >= Footnote::CONT_INDENT {
            inner.append(&mut pending);
            inner.push(line.strip_cols(Footnote::CONT_INDENT));
            i += 1;
            continue;
        }
        break;
    }
    if !pending.is_empty() {
        i = pending_start;
    }
    while inner.first().is_some_and(|l| l.is_blank()) {
        inner.remove(0);
    }
    let children = parse_blocks(&inner, opts);
    out.push(Block::FootnoteDef {
        span: Span::new(lines[start].span.start, lines[i - 1].span.end),
        label,
        children,
    });
    i
}

fn collect_paragraph(
    lines: &[Line],
    start: usize,
    opts: ParseOptions,
    out: &mut Vec<Block>,
) -> usize {
    let mut para = vec![lines[start]];
    let mut i = start + 1;
    while i < lines.len() {
        let line = lines[i];
        if line.is_blank() {
            break;
        }
        if opts.gfm && para.len() == 1 && Table::is_delimiter_row(line.text) {
            let header_cells = Table::split_cells(para[0].text).len();
            let delim_cells = Table::split_cells(line.text).len();
            if header_cells == delim_cells && header_cells >= 2 {
                return collect_table(lines, start, i, opts, out);
            }
        }
        if interrupts_paragraph(line.text) {
            break;
        }
        para.push(line);
        i += 1;
    }
    let children = inline::parse_inlines(&ContentMap::from_lines(&para), opts);
    out.push(Block::Paragraph {
        span: Span::new(para[0].span.start, para[para.len() - 1].span.end),
        children,
    });
    i
}

fn table_cells(line: Line, opts: ParseOptions) -> Vec<TableCell> {
    Table::split_cells(line.text)
        .into_iter()
        .map(|(offset, raw)| {
            let span = Span::new(
                line.span.start + offset,
                line.span.start + offset + raw.chars().count(),
            );
            let children = inline::parse_inlines(&ContentMap::single(span, raw), opts);
            TableCell {
                span,
                text: raw.to_string(),
                children,
            }
        })
        .collect()
}

fn collect_table(
    lines: &[Line],
    header_idx: usize,
    delim_idx: usize,
    opts: ParseOptions,
    out: &mut Vec<Block>,
) -> usize {
    let header_line = lines[header_idx];
    let delim_line = lines[delim_idx];
    let header = table_cells(header_line, opts);
    let aligns = Table::parse_aligns(delim_line.text);
    let mut raw_lines = vec![header_line.text.to_string(), delim_line.text.to_string()];
    let mut rows = Vec::new();

    let mut i = delim_idx + 1;
    let mut end = delim_idx;
    while i < lines.len() {
        let line = lines[i];
        if line.is_blank() || !line.text.contains('|') || interrupts_paragraph(line.text) {
            break;
        }
        rows.push(table_cells(line, opts));
        raw_lines.push(line.text.to_string());
        end = i;
        i += 1;
    }

    out.push(Block::Table {
        span: Span::new(header_line.span.start, lines[end].span.end),
        header,
        aligns,
        rows,
        raw_lines,
    });
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::line::split_lines;
    use crate::scanner::Scanner;

    fn blocks_of(source: &str) -> Vec<Block> {
        let scanner = Scanner::new(source);
        let (lines, _) = split_lines(&scanner);
        parse_blocks(&lines, ParseOptions::default())
    }

    #[test]
    fn heading_blank_paragraph() {
        let blocks = blocks_of("# Hello\n\nWorld\n");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
        assert!(matches!(blocks[1], Block::BlankLines { count: 1, .. }));
        assert!(matches!(blocks[2], Block::Paragraph { .. }));
        assert_eq!(blocks[0].span(), Span::new(0, 7));
        assert_eq!(blocks[1].span(), Span::new(8, 8));
        assert_eq!(blocks[2].span(), Span::new(9, 14));
    }

    #[test]
    fn thematic_break_beats_bullet_list() {
        let blocks = blocks_of("- - -\n");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(
            blocks[0],
            Block::ThematicBreak { marker: '-', .. }
        ));
    }

    #[test]
    fn fence_collects_body_and_close() {
        let blocks = blocks_of("```js\nconst x = 1;\n```\n");
        match &blocks[0] {
            Block::FencedCode {
                fence_len,
                close_len,
                info,
                body,
                ..
            } => {
                assert_eq!(*fence_len, 3);
                assert_eq!(*close_len, Some(3));
                assert_eq!(info, "js");
                assert_eq!(body, "const x = 1;\n");
            }
            other => panic!("expected fenced code, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        let blocks = blocks_of("```\ncode\n");
        match &blocks[0] {
            Block::FencedCode {
                close_len, body, ..
            } => {
                assert_eq!(*close_len, None);
                assert_eq!(body, "code\n");
            }
            other => panic!("expected fenced code, got {other:?}"),
        }
    }

    #[test]
    fn blockquote_strips_prefix_and_recurses() {
        let blocks = blocks_of("> # h\n> text\n");
        match &blocks[0] {
            Block::Blockquote { children, .. } => {
                assert_eq!(children.len(), 2);
                assert!(matches!(children[0], Block::Heading { .. }));
                assert!(matches!(children[1], Block::Paragraph { .. }));
            }
            other => panic!("expected blockquote, got {other:?}"),
        }
    }

    #[test]
    fn lazy_continuation_joins_quoted_paragraph() {
        let blocks = blocks_of("> line one\nline two\n");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Blockquote { children, .. } => {
                assert_eq!(children.len(), 1);
                assert!(matches!(children[0], Block::Paragraph { .. }));
            }
            other => panic!("expected blockquote, got {other:?}"),
        }
    }

    #[test]
    fn tight_list_with_nested_item_content() {
        let blocks = blocks_of("- a\n- b\n  - c\n");
        match &blocks[0] {
            Block::BulletList {
                marker,
                tight,
                items,
                ..
            } => {
                assert_eq!(*marker, '-');
                assert!(*tight);
                assert_eq!(items.len(), 2);
                // second item holds a nested list
                assert!(items[1]
                    .children
                    .iter()
                    .any(|b| matches!(b, Block::BulletList { .. })));
            }
            other => panic!("expected bullet list, got {other:?}"),
        }
    }

    #[test]
    fn blank_between_items_makes_list_loose() {
        let blocks = blocks_of("- a\n\n- b\n");
        match &blocks[0] {
            Block::BulletList { tight, items, .. } => {
                assert!(!*tight);
                assert_eq!(items.len(), 2);
            }
            other => panic!("expected bullet list, got {other:?}"),
        }
    }

    #[test]
    fn blank_after_list_stays_outside() {
        let blocks = blocks_of("- a\n\npara\n");
        assert_eq!(blocks.len(), 3);
        match &blocks[0] {
            Block::BulletList { tight, .. } => assert!(*tight),
            other => panic!("expected bullet list, got {other:?}"),
        }
        assert!(matches!(blocks[1], Block::BlankLines { count: 1, .. }));
        assert!(matches!(blocks[2], Block::Paragraph { .. }));
    }

    #[test]
    fn ordered_list_keeps_ordinals() {
        let blocks = blocks_of("3. three\n4. four\n");
        match &blocks[0] {
            Block::OrderedList { start, items, .. } => {
                assert_eq!(*start, 3);
                assert_eq!(items[0].ordinal, Some(3));
                assert_eq!(items[1].ordinal, Some(4));
            }
            other => panic!("expected ordered list, got {other:?}"),
        }
    }

    #[test]
    fn task_items_record_state() {
        let blocks = blocks_of("- [x] done\n- [ ] open\n- plain\n");
        match &blocks[0] {
            Block::BulletList { items, .. } => {
                assert_eq!(items[0].task, Some(true));
                assert_eq!(items[1].task, Some(false));
                assert_eq!(items[2].task, None);
            }
            other => panic!("expected bullet list, got {other:?}"),
        }
    }

    #[test]
    fn different_bullet_char_starts_new_list() {
        let blocks = blocks_of("- a\n* b\n");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0], Block::BulletList { marker: '-', .. }));
        assert!(matches!(blocks[1], Block::BulletList { marker: '*', .. }));
    }

    #[test]
    fn indented_code_does_not_interrupt_paragraph() {
        let blocks = blocks_of("para\n    still para\n");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn indented_code_after_blank() {
        let blocks = blocks_of("para\n\n    code\n");
        assert_eq!(blocks.len(), 3);
        match &blocks[2] {
            Block::IndentedCode { literal, .. } => assert_eq!(literal, "    code"),
            other => panic!("expected indented code, got {other:?}"),
        }
    }

    #[test]
    fn link_ref_def_cannot_interrupt_paragraph() {
        let blocks = blocks_of("text\n[ref]: /u\n");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn link_ref_def_block() {
        let blocks = blocks_of("[ref]: /u \"t\"\n");
        match &blocks[0] {
            Block::LinkRefDef {
                label, dest, title, ..
            } => {
                assert_eq!(label, "ref");
                assert_eq!(dest, "/u");
                assert_eq!(title.as_ref().unwrap().text, "t");
            }
            other => panic!("expected link ref def, got {other:?}"),
        }
    }

    #[test]
    fn table_needs_single_line_header() {
        let blocks = blocks_of("a | b\n--- | ---\n1 | 2\n");
        match &blocks[0] {
            Block::Table {
                header, rows, aligns, ..
            } => {
                assert_eq!(header.len(), 2);
                assert_eq!(rows.len(), 1);
                assert_eq!(aligns.len(), 2);
            }
            other => panic!("expected table, got {other:?}"),
        }

        let blocks = blocks_of("one\ntwo\n--- | ---\n");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn footnote_definition_collects_continuation() {
        let blocks = blocks_of("[^n]: first\n    second\n");
        match &blocks[0] {
            Block::FootnoteDef {
                label, children, ..
            } => {
                assert_eq!(label, "n");
                assert_eq!(children.len(), 1);
                assert!(matches!(children[0], Block::Paragraph { .. }));
            }
            other => panic!("expected footnote def, got {other:?}"),
        }
    }

    #[test]
    fn html_block_runs_to_blank_line() {
        let blocks = blocks_of("<div>\n<p>x</p>\n</div>\n\nafter\n");
        match &blocks[0] {
            Block::HtmlBlock { literal, .. } => {
                assert_eq!(literal, "<div>\n<p>x</p>\n</div>");
            }
            other => panic!("expected html block, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(blocks_of("").is_empty());
    }
}
