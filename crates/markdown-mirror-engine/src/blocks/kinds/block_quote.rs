/// Blockquote container with its owned delimiter.
///
/// All `>`-prefix knowledge lives here; the builder only calls these
/// helpers and never hardcodes the delimiter.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: char = '>';

    /// Number of code points to strip for one quote level: the `>` plus one
    /// optional following space. `None` when the line is not quoted.
    pub fn strip_one(text: &str) -> Option<usize> {
        let mut chars = text.chars();
        if chars.next()? != Self::PREFIX {
            return None;
        }
        match chars.next() {
            Some(' ') => Some(2),
            _ => Some(1),
        }
    }
}
