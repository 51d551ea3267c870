//! Links, images, and their reference forms.
//!
//! Bracketed text is scanned with nesting and escapes, the destination and
//! title are parsed strictly (anything off-pattern falls back to literal
//! text), and link text is re-parsed recursively. A link whose text
//! contains another link is invalidated, matching the no-nested-links rule.

use crate::cst::{Destination, Inline, QuoteStyle, RefForm, Title};
use crate::inline::content::ContentMap;
use crate::inline::parser;
use crate::options::ParseOptions;

/// Parsed destination/title group `(dest "title")`.
#[derive(Debug, Clone, PartialEq)]
pub struct DestTitle {
    pub dest: String,
    pub angled: bool,
    pub title: Option<Title>,
    /// Position just past the closing `)`.
    pub end: usize,
}

/// Finds the `]` matching the `[` at `open`, honoring nesting and escapes.
pub fn scan_bracket(window: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open + 1;
    while i < window.len() {
        let c = window[i];
        if c == '\\' && i + 1 < window.len() && window[i + 1].is_ascii_punctuation() {
            i += 2;
            continue;
        }
        match c {
            '[' => depth += 1,
            ']' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Finds the `]` closing a reference label opened at `open`. Labels do not
/// nest; an inner `[` aborts.
fn scan_label(window: &[char], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while i < window.len() && window[i] != ']' {
        if window[i] == '[' || window[i] == '\n' {
            return None;
        }
        i += 1;
    }
    (i < window.len()).then_some(i)
}

/// Parses `(dest "title")` starting at the `(` at `open`.
///
/// Destinations are either `<...>` (no newlines) or bare with balanced
/// parentheses and no whitespace. The title separator is spaces with at
/// most one newline.
pub fn scan_dest_title(window: &[char], open: usize) -> Option<DestTitle> {
    let mut i = open + 1;

    let (dest, angled) = if window.get(i) == Some(&'<') {
        i += 1;
        let start = i;
        while i < window.len() && window[i] != '>' {
            if window[i] == '\n' || window[i] == '<' {
                return None;
            }
            i += 1;
        }
        if i >= window.len() {
            return None;
        }
        let dest: String = window[start..i].iter().collect();
        i += 1;
        (dest, true)
    } else {
        let start = i;
        let mut depth = 0usize;
        while i < window.len() {
            let c = window[i];
            if c == ' ' || c == '\n' {
                break;
            }
            if c == '\\' && i + 1 < window.len() && window[i + 1].is_ascii_punctuation() {
                i += 2;
                continue;
            }
            match c {
                '(' => depth += 1,
                ')' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            i += 1;
        }
        (window[start..i].iter().collect(), false)
    };

    let sep_start = i;
    let mut newlines = 0;
    while i < window.len() && (window[i] == ' ' || window[i] == '\n') {
        if window[i] == '\n' {
            newlines += 1;
            if newlines > 1 {
                return None;
            }
        }
        i += 1;
    }

    let mut title = None;
    if i > sep_start && i < window.len() {
        let (close, quote) = match window[i] {
            '"' => ('"', QuoteStyle::Double),
            '\'' => ('\'', QuoteStyle::Single),
            '(' => (')', QuoteStyle::Paren),
            _ => return None,
        };
        i += 1;
        let start = i;
        while i < window.len() && window[i] != close {
            if window[i] == '\n' {
                return None;
            }
            i += 1;
        }
        if i >= window.len() {
            return None;
        }
        title = Some(Title {
            text: window[start..i].iter().collect(),
            quote,
        });
        i += 1;
    }

    if window.get(i) != Some(&')') {
        return None;
    }
    Some(DestTitle {
        dest,
        angled,
        title,
        end: i + 1,
    })
}

/// True when any inline (recursively) is a link; used to invalidate
/// nested links.
pub fn contains_link(inlines: &[Inline]) -> bool {
    inlines.iter().any(|node| match node {
        Inline::Link { .. } | Inline::RefLink { .. } | Inline::Autolink { .. } => true,
        other => other.children().is_some_and(contains_link),
    })
}

/// Scans a link at `pos` (pointing at `[`). Returns the node and the
/// position just past it.
pub fn scan_link(
    map: &ContentMap,
    window_end: usize,
    pos: usize,
    opts: ParseOptions,
    depth: usize,
) -> Option<(Inline, usize)> {
    let window = &map.chars()[..window_end];
    let close = scan_bracket(window, pos)?;
    let (text_from, text_to) = (pos + 1, close);

    match window.get(close + 1) {
        Some('(') => {
            let dt = scan_dest_title(window, close + 1)?;
            let children = parser::parse_range(map, text_from, text_to, opts, depth + 1);
            if contains_link(&children) {
                return None;
            }
            Some((
                Inline::Link {
                    span: map.src_span(pos, dt.end),
                    children,
                    dest: Destination {
                        url: dt.dest,
                        angled: dt.angled,
                    },
                    title: dt.title,
                },
                dt.end,
            ))
        }
        Some('[') => {
            let label_close = scan_label(window, close + 1)?;
            let written: String = window[close + 2..label_close].iter().collect();
            let (label, form) = if written.trim().is_empty() {
                (map.slice(text_from, text_to), RefForm::Collapsed)
            } else {
                (written, RefForm::Full)
            };
            let children = parser::parse_range(map, text_from, text_to, opts, depth + 1);
            if contains_link(&children) {
                return None;
            }
            Some((
                Inline::RefLink {
                    span: map.src_span(pos, label_close + 1),
                    children,
                    label,
                    form,
                },
                label_close + 1,
            ))
        }
        _ => {
            let children = parser::parse_range(map, text_from, text_to, opts, depth + 1);
            if contains_link(&children) {
                return None;
            }
            Some((
                Inline::RefLink {
                    span: map.src_span(pos, close + 1),
                    children,
                    label: map.slice(text_from, text_to),
                    form: RefForm::Shortcut,
                },
                close + 1,
            ))
        }
    }
}

/// Scans an image at `pos` (pointing at `!`). The alt text is kept as the
/// raw characters between the brackets.
pub fn scan_image(map: &ContentMap, window_end: usize, pos: usize) -> Option<(Inline, usize)> {
    let window = &map.chars()[..window_end];
    if window.get(pos + 1) != Some(&'[') {
        return None;
    }
    let close = scan_bracket(window, pos + 1)?;
    let alt = map.slice(pos + 2, close);

    match window.get(close + 1) {
        Some('(') => {
            let dt = scan_dest_title(window, close + 1)?;
            Some((
                Inline::Image {
                    span: map.src_span(pos, dt.end),
                    alt,
                    dest: Destination {
                        url: dt.dest,
                        angled: dt.angled,
                    },
                    title: dt.title,
                },
                dt.end,
            ))
        }
        Some('[') => {
            let label_close = scan_label(window, close + 1)?;
            let written: String = window[close + 2..label_close].iter().collect();
            let (label, form) = if written.trim().is_empty() {
                (alt.clone(), RefForm::Collapsed)
            } else {
                (written, RefForm::Full)
            };
            Some((
                Inline::RefImage {
                    span: map.src_span(pos, label_close + 1),
                    alt,
                    label,
                    form,
                },
                label_close + 1,
            ))
        }
        _ => Some((
            Inline::RefImage {
                span: map.src_span(pos, close + 1),
                alt: alt.clone(),
                label: alt,
                form: RefForm::Shortcut,
            },
            close + 1,
        )),
    }
}
