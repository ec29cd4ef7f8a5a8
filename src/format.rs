//! Size rendering: locale-grouped integers and binary units.

use crate::error::DirstatError;
use crate::i18n::LocaleTag;
use humansize::{BINARY, format_size as format_binary};

/// How digits are split into groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupStyle {
    /// Groups of three: 1,234,567
    Thousands,
    /// Three, then twos: 12,34,567
    Indian,
}

/// Digit grouping conventions for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLocale {
    tag: LocaleTag,
    separator: &'static str,
    style: GroupStyle,
    /// Leading digits required before the first separator is used
    min_grouping: usize,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::new(LocaleTag::default())
    }
}

impl NumberLocale {
    /// Conventions for an already validated tag. Unknown languages use `,`.
    pub fn new(tag: LocaleTag) -> Self {
        let (separator, style, min_grouping) = match (tag.language(), tag.region()) {
            ("de", "CH" | "LI") => ("\u{2019}", GroupStyle::Thousands, 1),
            ("en", "IN") | ("hi", _) => (",", GroupStyle::Indian, 1),
            ("pt", "PT") => ("\u{a0}", GroupStyle::Thousands, 2),
            ("es", _) => (".", GroupStyle::Thousands, 2),
            ("pl", _) => ("\u{a0}", GroupStyle::Thousands, 2),
            ("fr", _) => ("\u{202f}", GroupStyle::Thousands, 1),
            ("de" | "it" | "nl" | "pt" | "id" | "tr" | "da" | "el", _) => {
                (".", GroupStyle::Thousands, 1)
            }
            ("ru" | "uk" | "cs" | "sk" | "sv" | "fi" | "nb" | "hu", _) => {
                ("\u{a0}", GroupStyle::Thousands, 1)
            }
            _ => (",", GroupStyle::Thousands, 1),
        };

        Self {
            tag,
            separator,
            style,
            min_grouping,
        }
    }

    /// Build the conventions for a raw tag.
    ///
    /// [`LocaleTag::parse`] is the whole validation: every well-formed tag
    /// has a convention, so only a malformed one fails, with
    /// [`DirstatError::BadLocale`].
    pub fn try_new(raw: &str) -> Result<Self, DirstatError> {
        Ok(Self::new(LocaleTag::parse(raw)?))
    }

    /// Tag these conventions were chosen for
    pub fn tag(&self) -> &LocaleTag {
        &self.tag
    }

    /// Render an integer with this locale's digit grouping
    pub fn format_integer(&self, n: u64) -> String {
        let digits = n.to_string();
        let len = digits.len();
        if len < 3 + self.min_grouping {
            return digits;
        }

        let mut result = String::with_capacity(len + len / 2 * self.separator.len());
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && self.is_group_boundary(len - i) {
                result.push_str(self.separator);
            }
            result.push(c);
        }
        result
    }

    /// Whether a separator goes before a digit with `remaining` digits left
    fn is_group_boundary(&self, remaining: usize) -> bool {
        match self.style {
            GroupStyle::Thousands => remaining % 3 == 0,
            GroupStyle::Indian => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
        }
    }
}

/// Render a byte count for the report.
///
/// Metric mode uses base-1024 units (`B`, `KiB`, `MiB`, ...) with two
/// decimals; otherwise the raw count is grouped per `numbers`.
pub fn format_size(bytes: u64, metric: bool, numbers: &NumberLocale) -> String {
    if metric {
        format_binary(bytes, BINARY)
    } else {
        numbers.format_integer(bytes)
    }
}
