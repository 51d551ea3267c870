/// Autolinks: `<scheme:...>` with a scheme whitelist, or `<email>`.
pub struct Autolink;

impl Autolink {
    pub const SCHEMES: [&'static str; 6] = ["http", "https", "ftp", "ftps", "mailto", "xmpp"];

    /// Scans an autolink at `pos` (pointing at `<`), returning
    /// `(url, is_email, position past '>')`.
    pub fn scan(window: &[char], pos: usize) -> Option<(String, bool, usize)> {
        if window.get(pos) != Some(&'<') {
            return None;
        }
        let start = pos + 1;
        let mut i = start;
        while i < window.len() && window[i] != '>' {
            let c = window[i];
            if c.is_whitespace() || c == '<' {
                return None;
            }
            i += 1;
        }
        if i >= window.len() || i == start {
            return None;
        }
        let inner: String = window[start..i].iter().collect();
        if Self::is_uri(&inner) {
            Some((inner, false, i + 1))
        } else if Self::is_email(&inner) {
            Some((inner, true, i + 1))
        } else {
            None
        }
    }

    fn is_uri(s: &str) -> bool {
        let Some((scheme, rest)) = s.split_once(':') else {
            return false;
        };
        !rest.is_empty()
            && Self::SCHEMES
                .iter()
                .any(|known| scheme.eq_ignore_ascii_case(known))
    }

    fn is_email(s: &str) -> bool {
        let Some((local, domain)) = s.split_once('@') else {
            return false;
        };
        let local_ok = !local.is_empty()
            && local
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
        let domain_ok = domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        local_ok && domain_ok
    }
}
