//! Logical lines with code-point spans.
//!
//! The block parser is line-driven: the source is split once into lines
//! whose spans exclude the terminator, and container stripping produces new
//! `Line` values that still point into the original source. `\r\n` is
//! normalized to `\n` on read.

use crate::cst::Span;
use crate::scanner::Scanner;

/// One logical line: its code-point span (terminator excluded) and text.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub span: Span,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Leading indentation in columns, tabs expanding to 4-column stops.
    pub fn indent_cols(&self) -> usize {
        let mut cols = 0;
        for ch in self.text.chars() {
            match ch {
                ' ' => cols += 1,
                '\t' => cols += 4 - cols % 4,
                _ => break,
            }
        }
        cols
    }

    /// Drops the first `n` code points.
    pub fn strip_chars(&self, n: usize) -> Line<'a> {
        let byte = char_to_byte(self.text, n);
        Line {
            span: Span::new(self.span.start + n, self.span.end),
            text: &self.text[byte..],
        }
    }

    /// Strips leading whitespace until at least `cols` columns are consumed.
    ///
    /// A tab straddling the target column is stripped whole.
    pub fn strip_cols(&self, cols: usize) -> Line<'a> {
        let mut consumed = 0;
        let mut chars = 0;
        for ch in self.text.chars() {
            if consumed >= cols {
                break;
            }
            match ch {
                ' ' => consumed += 1,
                '\t' => consumed += 4 - consumed % 4,
                _ => break,
            }
            chars += 1;
        }
        self.strip_chars(chars)
    }
}

/// Byte offset of the `n`-th code point of `text`.
fn char_to_byte(text: &str, n: usize) -> usize {
    text.char_indices()
        .nth(n)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Splits the source into lines and reports whether it ends with a
/// terminator. A trailing `\r` before `\n` is excluded from the line text
/// (its position still counts toward spans, so offsets stay consistent).
pub fn split_lines<'a>(scanner: &Scanner<'a>) -> (Vec<Line<'a>>, bool) {
    let mut lines = Vec::new();
    let n = scanner.len();
    let mut start = 0;
    for i in 0..n {
        if scanner.char_at(i) == Some('\n') {
            let mut end = i;
            if end > start && scanner.char_at(end - 1) == Some('\r') {
                end -= 1;
            }
            lines.push(Line {
                span: Span::new(start, end),
                text: scanner.slice(start, end),
            });
            start = i + 1;
        }
    }
    if start < n {
        lines.push(Line {
            span: Span::new(start, n),
            text: scanner.slice(start, n),
        });
    }
    let trailing = n > 0 && scanner.char_at(n - 1) == Some('\n');
    (lines, trailing)
}
