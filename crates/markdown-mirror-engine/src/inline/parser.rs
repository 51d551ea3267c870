//! Single-pass inline tokenizer.
//!
//! Walks a window of block content left to right, trying recognizers in
//! priority order: backslash escapes, code spans, autolinks, inline HTML,
//! images, footnote references, links, emphasis delimiter runs,
//! strikethrough runs, hard and soft breaks, and finally literal text.
//! Unresolved delimiter runs are left as items for the emphasis pass.

use crate::blocks::kinds::Footnote;
use crate::cst::{HardBreakStyle, Inline};
use crate::options::ParseOptions;

use super::content::ContentMap;
use super::cursor::Cursor;
use super::emphasis::{self, classify_flanking, Delim, Item};
use super::kinds::{scan_image, scan_link, Autolink, CodeSpan, HtmlInline};

/// Cap on link-text re-parsing depth for pathological bracket nesting.
const MAX_LINK_DEPTH: usize = 16;

/// Parses a window of the content map into inline nodes.
pub(crate) fn parse_range(
    map: &ContentMap,
    start: usize,
    end: usize,
    opts: ParseOptions,
    depth: usize,
) -> Vec<Inline> {
    let items = tokenize(map, start, end, opts, depth);
    emphasis::resolve(items, map, opts.strict)
}

fn flush_text(map: &ContentMap, items: &mut Vec<Item>, from: usize, to: usize) {
    if to > from {
        items.push(Item::Node(Inline::Text {
            span: map.src_span(from, to),
            text: map.slice(from, to),
        }));
    }
}

fn tokenize(
    map: &ContentMap,
    start: usize,
    end: usize,
    opts: ParseOptions,
    depth: usize,
) -> Vec<Item> {
    let chars = map.chars();
    let mut cur = Cursor::new(chars, start, end);
    let mut items: Vec<Item> = Vec::new();
    let mut text_start = start;

    while let Some(c) = cur.peek() {
        let pos = cur.pos();
        match c {
            '\\' => match cur.peek_at(1) {
                Some('\n') => {
                    flush_text(map, &mut items, text_start, pos);
                    items.push(Item::Node(Inline::HardBreak {
                        span: map.src_span(pos, pos + 2),
                        style: HardBreakStyle::Backslash,
                    }));
                    cur.bump_n(2);
                    text_start = cur.pos();
                }
                // the escape stays literal in the text node
                Some(next) if next.is_ascii_punctuation() => cur.bump_n(2),
                _ => cur.bump_n(1),
            },
            '`' => {
                if let Some(scan) = CodeSpan::scan(&chars[..end], pos) {
                    flush_text(map, &mut items, text_start, pos);
                    items.push(Item::Node(Inline::Code {
                        span: map.src_span(pos, scan.end),
                        ticks: scan.ticks,
                        text: map.slice(scan.content_start, scan.content_end),
                    }));
                    cur.set_pos(scan.end);
                    text_start = scan.end;
                } else {
                    cur.bump_n(cur.run_len('`'));
                }
            }
            '<' => {
                if let Some((url, email, link_end)) = Autolink::scan(&chars[..end], pos) {
                    flush_text(map, &mut items, text_start, pos);
                    items.push(Item::Node(Inline::Autolink {
                        span: map.src_span(pos, link_end),
                        url,
                        email,
                    }));
                    cur.set_pos(link_end);
                    text_start = link_end;
                } else if let Some(html_end) = HtmlInline::scan(&chars[..end], pos) {
                    flush_text(map, &mut items, text_start, pos);
                    items.push(Item::Node(Inline::HtmlInline {
                        span: map.src_span(pos, html_end),
                        raw: map.slice(pos, html_end),
                    }));
                    cur.set_pos(html_end);
                    text_start = html_end;
                } else {
                    cur.bump_n(1);
                }
            }
            '!' if cur.peek_at(1) == Some('[') => {
                if let Some((node, node_end)) = scan_image(map, end, pos) {
                    flush_text(map, &mut items, text_start, pos);
                    items.push(Item::Node(node));
                    cur.set_pos(node_end);
                    text_start = node_end;
                } else {
                    cur.bump_n(1);
                }
            }
            '[' => {
                let footnote = if opts.gfm {
                    Footnote::reference(&chars[..end], pos)
                } else {
                    None
                };
                if let Some((label, ref_end)) = footnote {
                    flush_text(map, &mut items, text_start, pos);
                    items.push(Item::Node(Inline::FootnoteRef {
                        span: map.src_span(pos, ref_end),
                        label,
                    }));
                    cur.set_pos(ref_end);
                    text_start = ref_end;
                } else if depth < MAX_LINK_DEPTH {
                    if let Some((node, node_end)) = scan_link(map, end, pos, opts, depth) {
                        flush_text(map, &mut items, text_start, pos);
                        items.push(Item::Node(node));
                        cur.set_pos(node_end);
                        text_start = node_end;
                    } else {
                        cur.bump_n(1);
                    }
                } else {
                    cur.bump_n(1);
                }
            }
            '*' | '_' => {
                let run = cur.run_len(c);
                let (may_open, may_close) = classify_flanking(chars, pos, run, c);
                flush_text(map, &mut items, text_start, pos);
                items.push(Item::Delim(Delim {
                    ch: c,
                    count: run,
                    orig: run,
                    local: pos,
                    may_open,
                    may_close,
                }));
                cur.bump_n(run);
                text_start = cur.pos();
            }
            '~' if opts.gfm => {
                let run = cur.run_len('~');
                if run == 2 {
                    let (may_open, may_close) = classify_flanking(chars, pos, run, '~');
                    flush_text(map, &mut items, text_start, pos);
                    items.push(Item::Delim(Delim {
                        ch: '~',
                        count: run,
                        orig: run,
                        local: pos,
                        may_open,
                        may_close,
                    }));
                    cur.bump_n(run);
                    text_start = cur.pos();
                } else {
                    cur.bump_n(run);
                }
            }
            '\n' => {
                let max_spaces = pos - text_start;
                let mut spaces = 0;
                while spaces < max_spaces && chars[pos - spaces - 1] == ' ' {
                    spaces += 1;
                }
                if spaces >= 2 {
                    flush_text(map, &mut items, text_start, pos - spaces);
                    items.push(Item::Node(Inline::HardBreak {
                        span: map.src_span(pos - spaces, pos + 1),
                        style: HardBreakStyle::Spaces { count: spaces },
                    }));
                } else {
                    flush_text(map, &mut items, text_start, pos);
                    items.push(Item::Node(Inline::SoftBreak {
                        span: map.src_span(pos, pos + 1),
                    }));
                }
                cur.bump_n(1);
                text_start = cur.pos();
            }
            _ => cur.bump_n(1),
        }
    }
    flush_text(map, &mut items, text_start, cur.pos());
    items
}
