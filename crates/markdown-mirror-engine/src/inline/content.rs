//! Content projection for inline parsing.
//!
//! A block's text can be non-contiguous in the source when container
//! prefixes were stripped per line. The map joins the stripped lines with
//! `\n` and remembers each line's source span, so every local position in
//! the joined text translates back to a source code point. The separator
//! position maps to the line terminator, which sits at the line's content
//! end in the source.

use crate::blocks::line::Line;
use crate::cst::Span;

#[derive(Debug, Clone, Copy)]
struct Seg {
    local_start: usize,
    src_start: usize,
    len: usize,
}

/// Joined block content with a local-to-source position mapping.
pub struct ContentMap {
    chars: Vec<char>,
    segs: Vec<Seg>,
}

impl ContentMap {
    /// Builds the map from a block's (possibly stripped) lines.
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut chars = Vec::new();
        let mut segs = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            if idx > 0 {
                chars.push('\n');
            }
            let local_start = chars.len();
            chars.extend(line.text.chars());
            segs.push(Seg {
                local_start,
                src_start: line.span.start,
                len: chars.len() - local_start,
            });
        }
        Self { chars, segs }
    }

    /// A single contiguous piece of content (heading text, table cell).
    pub fn single(span: Span, text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        Self {
            chars,
            segs: vec![Seg {
                local_start: 0,
                src_start: span.start,
                len,
            }],
        }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Source code-point position of a local position.
    pub fn to_src(&self, local: usize) -> usize {
        if self.segs.is_empty() {
            return 0;
        }
        let idx = match self
            .segs
            .binary_search_by(|seg| seg.local_start.cmp(&local))
        {
            Ok(idx) => idx,
            Err(0) => 0,
            Err(idx) => idx - 1,
        };
        let seg = self.segs[idx];
        seg.src_start + (local - seg.local_start).min(seg.len)
    }

    /// Source span of a local half-open range.
    pub fn src_span(&self, from: usize, to: usize) -> Span {
        Span::new(self.to_src(from), self.to_src(to))
    }

    pub fn slice(&self, from: usize, to: usize) -> String {
        self.chars[from..to].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(span: Span, text: &'static str) -> Line<'static> {
        Line { span, text }
    }

    #[test]
    fn contiguous_content_maps_identically_offset() {
        let map = ContentMap::from_lines(&[line(Span::new(5, 10), "hello")]);
        assert_eq!(map.to_src(0), 5);
        assert_eq!(map.to_src(3), 8);
        assert_eq!(map.to_src(5), 10);
        assert_eq!(map.slice(1, 3), "el");
    }

    #[test]
    fn separator_maps_to_line_terminator() {
        // Two quoted lines: "> ab" and "> cd" — content at 2..4 and 7..9
        let map = ContentMap::from_lines(&[
            line(Span::new(2, 4), "ab"),
            line(Span::new(7, 9), "cd"),
        ]);
        assert_eq!(map.chars().iter().collect::<String>(), "ab\ncd");
        assert_eq!(map.to_src(1), 3);
        assert_eq!(map.to_src(2), 4); // the separator: line 1 terminator
        assert_eq!(map.to_src(3), 7); // first char of line 2
        assert_eq!(map.src_span(0, 5), Span::new(2, 9));
    }

    #[test]
    fn empty_map() {
        let map = ContentMap::from_lines(&[]);
        assert!(map.is_empty());
        assert_eq!(map.to_src(0), 0);
    }
}
