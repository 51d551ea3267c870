//! Parse and serialize settings.
//!
//! Both structs are serde-serializable so host editors can persist them
//! alongside their own preferences.

use serde::{Deserialize, Serialize};

use crate::cst::{FenceKind, HardBreakStyle, QuoteStyle};

/// Settings for [`parse`](crate::parse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Use the two-phase delimiter-stack emphasis algorithm (CommonMark
    /// Rule 9/10) instead of greedy pairing.
    pub strict: bool,
    /// Enable GFM extensions: tables, strikethrough, task items, footnotes.
    pub gfm: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            gfm: true,
        }
    }
}

/// Settings for [`serialize`](crate::serialize).
///
/// With everything off the output is byte-identical to the parsed source for
/// the supported subset. `normalize` switches every style to its canonical
/// form; the per-style overrides apply individually and take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializeOptions {
    /// Canonicalize styles: `"…"` titles, backtick fences, `-` bullets,
    /// backslash hard breaks.
    pub normalize: bool,
    pub bullet_marker: Option<char>,
    pub fence: Option<FenceKindOption>,
    pub hard_break: Option<HardBreakOption>,
    pub title_quote: Option<TitleQuoteOption>,
}

/// Serializable stand-in for [`FenceKind`] overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FenceKindOption {
    Backticks,
    Tildes,
}

/// Hard-break emission style override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardBreakOption {
    Backslash,
    TwoSpaces,
}

/// Title quote style override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleQuoteOption {
    Double,
    Single,
    Paren,
}

impl SerializeOptions {
    /// Effective bullet marker, if any override applies.
    pub(crate) fn bullet(&self) -> Option<char> {
        self.bullet_marker.or(self.normalize.then_some('-'))
    }

    pub(crate) fn fence_kind(&self) -> Option<FenceKind> {
        match self.fence {
            Some(FenceKindOption::Backticks) => Some(FenceKind::Backticks),
            Some(FenceKindOption::Tildes) => Some(FenceKind::Tildes),
            None => self.normalize.then_some(FenceKind::Backticks),
        }
    }

    pub(crate) fn hard_break_style(&self) -> Option<HardBreakStyle> {
        match self.hard_break {
            Some(HardBreakOption::Backslash) => Some(HardBreakStyle::Backslash),
            Some(HardBreakOption::TwoSpaces) => Some(HardBreakStyle::Spaces { count: 2 }),
            None => self.normalize.then_some(HardBreakStyle::Backslash),
        }
    }

    pub(crate) fn quote_style(&self) -> Option<QuoteStyle> {
        match self.title_quote {
            Some(TitleQuoteOption::Double) => Some(QuoteStyle::Double),
            Some(TitleQuoteOption::Single) => Some(QuoteStyle::Single),
            Some(TitleQuoteOption::Paren) => Some(QuoteStyle::Paren),
            None => self.normalize.then_some(QuoteStyle::Double),
        }
    }
}
