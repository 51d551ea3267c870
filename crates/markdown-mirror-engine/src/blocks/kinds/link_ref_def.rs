use crate::cst::{QuoteStyle, Title};

/// Parsed pieces of a link reference definition line.
#[derive(Debug, Clone, PartialEq)]
pub struct RefDefParts {
    pub label: String,
    pub dest: String,
    pub title: Option<Title>,
}

/// Link reference definition leaf: `[label]: dest "title"` on one line.
pub struct RefDef;

impl RefDef {
    /// Parses a full definition line. Anything that does not match exactly
    /// is left for the paragraph fallback.
    pub fn parse(text: &str) -> Option<RefDefParts> {
        let chars: Vec<char> = text.chars().collect();
        if chars.first() != Some(&'[') {
            return None;
        }

        let mut i = 1;
        let label_start = i;
        while i < chars.len() && chars[i] != ']' {
            if chars[i] == '[' {
                return None;
            }
            i += 1;
        }
        if i >= chars.len() {
            return None;
        }
        let label: String = chars[label_start..i].iter().collect();
        if label.trim().is_empty() {
            return None;
        }
        i += 1;
        if chars.get(i) != Some(&':') {
            return None;
        }
        i += 1;
        while chars.get(i) == Some(&' ') {
            i += 1;
        }

        let dest = if chars.get(i) == Some(&'<') {
            i += 1;
            let start = i;
            while i < chars.len() && chars[i] != '>' {
                i += 1;
            }
            if i >= chars.len() {
                return None;
            }
            let dest: String = chars[start..i].iter().collect();
            i += 1;
            dest
        } else {
            let start = i;
            while i < chars.len() && chars[i] != ' ' {
                i += 1;
            }
            if i == start {
                return None;
            }
            chars[start..i].iter().collect()
        };

        while chars.get(i) == Some(&' ') {
            i += 1;
        }
        if i == chars.len() {
            return Some(RefDefParts {
                label,
                dest,
                title: None,
            });
        }

        let (close, quote) = match chars[i] {
            '"' => ('"', QuoteStyle::Double),
            '\'' => ('\'', QuoteStyle::Single),
            '(' => (')', QuoteStyle::Paren),
            _ => return None,
        };
        i += 1;
        let start = i;
        while i < chars.len() && chars[i] != close {
            i += 1;
        }
        if i >= chars.len() {
            return None;
        }
        let title_text: String = chars[start..i].iter().collect();
        i += 1;
        while chars.get(i) == Some(&' ') {
            i += 1;
        }
        if i != chars.len() {
            return None;
        }

        Some(RefDefParts {
            label,
            dest,
            title: Some(Title {
                text: title_text,
                quote,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_definition() {
        let parts = RefDef::parse("[ref]: /url").unwrap();
        assert_eq!(parts.label, "ref");
        assert_eq!(parts.dest, "/url");
        assert!(parts.title.is_none());
    }

    #[test]
    fn parses_title_styles() {
        let parts = RefDef::parse("[r]: /u \"t\"").unwrap();
        assert_eq!(parts.title.unwrap().quote, QuoteStyle::Double);
        let parts = RefDef::parse("[r]: /u 't'").unwrap();
        assert_eq!(parts.title.unwrap().quote, QuoteStyle::Single);
        let parts = RefDef::parse("[r]: /u (t)").unwrap();
        assert_eq!(parts.title.unwrap().quote, QuoteStyle::Paren);
    }

    #[test]
    fn parses_angled_destination() {
        let parts = RefDef::parse("[r]: </some url>").unwrap();
        assert_eq!(parts.dest, "/some url");
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(RefDef::parse("[r] /u").is_none());
        assert!(RefDef::parse("[]: /u").is_none());
        assert!(RefDef::parse("[r]:").is_none());
        assert!(RefDef::parse("[r]: /u \"t\" junk").is_none());
        assert!(RefDef::parse("plain text").is_none());
    }
}
