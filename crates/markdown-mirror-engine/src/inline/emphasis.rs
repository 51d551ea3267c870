//! Delimiter-run pairing for emphasis, strong emphasis, and strikethrough.
//!
//! The tokenizer leaves `*`, `_`, and `~~` runs as delimiter items; this
//! pass pairs closers with their nearest eligible opener, scanning closers
//! left to right. Strict mode adds the CommonMark Rule 9/10 constraint:
//! when either side of a candidate pair can both open and close, the summed
//! original run lengths must not be a multiple of 3 unless both lengths
//! are. Runs can pair more than once (`***a***` nests strong inside
//! emphasis); leftovers become literal text.

use crate::cst::Inline;

use super::content::ContentMap;

/// One tokenized piece of block content: a finished node or an unresolved
/// delimiter run.
pub(crate) enum Item {
    Node(Inline),
    Delim(Delim),
}

/// An unresolved delimiter run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Delim {
    pub ch: char,
    /// Remaining characters in the run.
    pub count: usize,
    /// Original run length, used by Rule 9/10.
    pub orig: usize,
    /// Local position of the first remaining character.
    pub local: usize,
    pub may_open: bool,
    pub may_close: bool,
}

/// Flanking classification of a run, per the CommonMark definitions.
///
/// `_` additionally requires a word boundary on the opening/closing side.
pub(crate) fn classify_flanking(
    chars: &[char],
    pos: usize,
    run: usize,
    ch: char,
) -> (bool, bool) {
    let before = pos.checked_sub(1).map(|p| chars[p]);
    let after = chars.get(pos + run).copied();
    let ws = |c: Option<char>| c.is_none_or(|c| c.is_whitespace());
    let punct = |c: Option<char>| c.is_some_and(|c| c.is_ascii_punctuation());

    let left = !ws(after) && (!punct(after) || ws(before) || punct(before));
    let right = !ws(before) && (!punct(before) || ws(after) || punct(after));
    match ch {
        '_' => (
            left && (!right || punct(before)),
            right && (!left || punct(after)),
        ),
        _ => (left, right),
    }
}

fn rule_9_10_blocks(opener: &Delim, closer: &Delim) -> bool {
    (opener.may_close || closer.may_open)
        && (opener.orig + closer.orig) % 3 == 0
        && !(opener.orig % 3 == 0 && closer.orig % 3 == 0)
}

/// Pairs delimiters and assembles the final inline sequence.
pub(crate) fn resolve(mut items: Vec<Item>, map: &ContentMap, strict: bool) -> Vec<Inline> {
    let mut i = 0;
    while i < items.len() {
        let closer = match &items[i] {
            Item::Delim(d) if d.may_close && d.count > 0 => *d,
            _ => {
                i += 1;
                continue;
            }
        };

        let mut opener_idx = None;
        let mut j = i;
        while j > 0 {
            j -= 1;
            if let Item::Delim(o) = &items[j] {
                if o.ch != closer.ch || !o.may_open || o.count == 0 {
                    continue;
                }
                if closer.ch == '~' && !(o.count == 2 && closer.count == 2) {
                    continue;
                }
                if strict && closer.ch != '~' && rule_9_10_blocks(o, &closer) {
                    continue;
                }
                opener_idx = Some(j);
                break;
            }
        }
        let Some(j) = opener_idx else {
            i += 1;
            continue;
        };

        let opener_count = match &items[j] {
            Item::Delim(o) => o.count,
            Item::Node(_) => 0,
        };
        let strength = if closer.ch == '~' || (opener_count >= 2 && closer.count >= 2) {
            2
        } else {
            1
        };

        // Marker characters come off the opener's right end and the
        // closer's left end.
        let mut open_marker_start = 0;
        let mut opener_left = 0;
        if let Item::Delim(o) = &mut items[j] {
            o.count -= strength;
            open_marker_start = o.local + o.count;
            opener_left = o.count;
        }
        let mut close_marker_end = 0;
        let mut closer_left = 0;
        if let Item::Delim(d) = &mut items[i] {
            close_marker_end = d.local + strength;
            d.count -= strength;
            d.local += strength;
            closer_left = d.count;
        }

        let span = map.src_span(open_marker_start, close_marker_end);
        let inner: Vec<Item> = items.drain(j + 1..i).collect();
        let children = assemble(inner, map);
        let node = match (closer.ch, strength) {
            ('~', _) => Inline::Strikethrough { span, children },
            (ch, 2) => Inline::Strong {
                span,
                marker: ch,
                children,
            },
            (ch, _) => Inline::Emphasis {
                span,
                marker: ch,
                children,
            },
        };

        let mut insert_at = j + 1;
        if opener_left == 0 {
            items.remove(j);
            insert_at = j;
        }
        items.insert(insert_at, Item::Node(node));
        let closer_idx = insert_at + 1;
        if closer_left == 0 {
            items.remove(closer_idx);
        }
        // Revisit the closer: a remaining run may pair again with an
        // earlier opener.
        i = closer_idx;
    }
    assemble(items, map)
}

/// Converts leftover delimiters to text and coalesces adjacent text nodes.
pub(crate) fn assemble(items: Vec<Item>, map: &ContentMap) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::new();
    for item in items {
        match item {
            Item::Node(node) => push_coalesced(&mut out, node),
            Item::Delim(d) if d.count > 0 => {
                let text: String = std::iter::repeat(d.ch).take(d.count).collect();
                push_coalesced(
                    &mut out,
                    Inline::Text {
                        span: map.src_span(d.local, d.local + d.count),
                        text,
                    },
                );
            }
            Item::Delim(_) => {}
        }
    }
    out
}

fn push_coalesced(out: &mut Vec<Inline>, node: Inline) {
    if let Inline::Text { span, text } = &node {
        if let Some(Inline::Text {
            span: prev_span,
            text: prev_text,
        }) = out.last_mut()
        {
            if prev_span.end == span.start {
                prev_text.push_str(text);
                prev_span.end = span.end;
                return;
            }
        }
    }
    out.push(node);
}
