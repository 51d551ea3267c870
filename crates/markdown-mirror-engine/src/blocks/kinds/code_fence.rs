use crate::cst::FenceKind;

/// Fenced code block delimiters.
///
/// Fences open with three or more backticks or tildes at the start of the
/// (container-stripped) line; a backtick fence's info string may not contain
/// a backtick. The closing fence uses the same character, is at least as
/// long as the opener, and carries nothing else.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: char = '`';
    pub const TILDE: char = '~';
    pub const MIN_LEN: usize = 3;

    /// Detects an opening fence: `(kind, fence length, raw info string)`.
    pub fn open(text: &str) -> Option<(FenceKind, usize, &str)> {
        let first = text.chars().next()?;
        let kind = match first {
            Self::BACKTICK => FenceKind::Backticks,
            Self::TILDE => FenceKind::Tildes,
            _ => return None,
        };
        let len = text.chars().take_while(|&c| c == first).count();
        if len < Self::MIN_LEN {
            return None;
        }
        // Fence characters are ASCII, so the char count is a byte offset.
        let info = &text[len..];
        if kind == FenceKind::Backticks && info.contains(Self::BACKTICK) {
            return None;
        }
        Some((kind, len, info))
    }

    /// Detects a closing fence for an open block, returning its length.
    pub fn close(text: &str, kind: FenceKind, open_len: usize) -> Option<usize> {
        let ch = kind.ch();
        let len = text.chars().take_while(|&c| c == ch).count();
        (len >= open_len && text[len..].is_empty()).then_some(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_with_info_string() {
        assert_eq!(
            CodeFence::open("```rust ignore"),
            Some((FenceKind::Backticks, 3, "rust ignore"))
        );
        assert_eq!(CodeFence::open("~~~~"), Some((FenceKind::Tildes, 4, "")));
    }

    #[test]
    fn rejects_short_fences() {
        assert_eq!(CodeFence::open("``"), None);
        assert_eq!(CodeFence::open("x```"), None);
    }

    #[test]
    fn backtick_info_may_not_contain_backticks() {
        assert_eq!(CodeFence::open("``` a`b"), None);
        assert!(CodeFence::open("~~~ a`b").is_some());
    }

    #[test]
    fn close_requires_matching_char_and_length() {
        assert_eq!(CodeFence::close("```", FenceKind::Backticks, 3), Some(3));
        assert_eq!(CodeFence::close("`````", FenceKind::Backticks, 3), Some(5));
        assert_eq!(CodeFence::close("```", FenceKind::Backticks, 4), None);
        assert_eq!(CodeFence::close("~~~", FenceKind::Backticks, 3), None);
        assert_eq!(CodeFence::close("``` x", FenceKind::Backticks, 3), None);
    }
}
