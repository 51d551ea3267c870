/// Inline raw HTML: tags, closing tags, comments, declarations, and
/// processing instructions, confined to a single line.
pub struct HtmlInline;

impl HtmlInline {
    /// Scans a recognized HTML pattern at `pos` (pointing at `<`),
    /// returning the position just past the closing `>`.
    pub fn scan(window: &[char], pos: usize) -> Option<usize> {
        if window.get(pos) != Some(&'<') {
            return None;
        }
        match window.get(pos + 1)? {
            '!' => {
                if window.get(pos + 2) == Some(&'-') && window.get(pos + 3) == Some(&'-') {
                    Self::scan_comment(window, pos + 4)
                } else {
                    Self::scan_to_gt(window, pos + 2)
                }
            }
            '?' => Self::scan_pi(window, pos + 2),
            '/' => {
                let c = window.get(pos + 2)?;
                c.is_ascii_alphabetic()
                    .then(|| Self::scan_to_gt(window, pos + 3))
                    .flatten()
            }
            c if c.is_ascii_alphabetic() => Self::scan_to_gt(window, pos + 2),
            _ => None,
        }
    }

    fn scan_to_gt(window: &[char], from: usize) -> Option<usize> {
        let mut i = from;
        while i < window.len() {
            match window[i] {
                '>' => return Some(i + 1),
                '<' | '\n' => return None,
                _ => i += 1,
            }
        }
        None
    }

    fn scan_comment(window: &[char], from: usize) -> Option<usize> {
        let mut i = from;
        while i + 2 < window.len() + 1 {
            if window.get(i) == Some(&'\n') {
                return None;
            }
            if window.get(i) == Some(&'-')
                && window.get(i + 1) == Some(&'-')
                && window.get(i + 2) == Some(&'>')
            {
                return Some(i + 3);
            }
            i += 1;
        }
        None
    }

    fn scan_pi(window: &[char], from: usize) -> Option<usize> {
        let mut i = from;
        while i + 1 < window.len() {
            if window[i] == '\n' {
                return None;
            }
            if window[i] == '?' && window[i + 1] == '>' {
                return Some(i + 2);
            }
            i += 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn scans_open_and_close_tags() {
        assert_eq!(HtmlInline::scan(&chars("<b>x"), 0), Some(3));
        assert_eq!(HtmlInline::scan(&chars("<span class=\"a\">"), 0), Some(16));
        assert_eq!(HtmlInline::scan(&chars("</em> rest"), 0), Some(5));
    }

    #[test]
    fn scans_comments_and_pi() {
        assert_eq!(HtmlInline::scan(&chars("<!-- note -->x"), 0), Some(13));
        assert_eq!(HtmlInline::scan(&chars("<?php 1 ?>"), 0), Some(10));
    }

    #[test]
    fn rejects_malformed() {
        assert!(HtmlInline::scan(&chars("<1bad>"), 0).is_none());
        assert!(HtmlInline::scan(&chars("<a\nb>"), 0).is_none());
        assert!(HtmlInline::scan(&chars("<unclosed"), 0).is_none());
        assert!(HtmlInline::scan(&chars("</ x>"), 0).is_none());
    }
}
