//! Locale seeding for [`FormatDescriptor`].
//!
//! Engines never read the process locale themselves; callers resolve a tag once (from
//! `LANG`, a user setting, ...) and pass the resulting descriptor in at construction.

use crate::{
    DAY_PLACEHOLDER_DE, DAY_PLACEHOLDER_EN, DAY_PLACEHOLDER_RU, MONTH_PLACEHOLDER_DE,
    MONTH_PLACEHOLDER_EN, MONTH_PLACEHOLDER_RU, YEAR_PLACEHOLDER_DE, YEAR_PLACEHOLDER_EN,
    YEAR_PLACEHOLDER_RU,
    format::{DateOrder, FormatDescriptor},
    types::{Placeholder, Separator},
};

/// Locale groups that carry their own placeholder letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaleBucket {
    Russian,
    German,
    English,
}

impl LocaleBucket {
    /// Resolves a locale tag such as `ru`, `ru_RU.UTF-8`, `de-DE` or `DE`.
    ///
    /// The country part decides, so `de_AT` and `de_US` are English. A bare code with no
    /// country is read as the country. Unknown tags fall back to [`LocaleBucket::English`].
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.split(['.', '@']).next().unwrap_or_default();
        let mut parts = tag.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        let country = parts.next().unwrap_or(language);

        if country.eq_ignore_ascii_case("ru") {
            Self::Russian
        } else if country.eq_ignore_ascii_case("de") {
            Self::German
        } else {
            Self::English
        }
    }

    pub const fn defaults(self) -> FormatDescriptor {
        let (order, day, month, year) = match self {
            Self::Russian => (
                DateOrder::Dmy,
                DAY_PLACEHOLDER_RU,
                MONTH_PLACEHOLDER_RU,
                YEAR_PLACEHOLDER_RU,
            ),
            Self::German => (
                DateOrder::Dmy,
                DAY_PLACEHOLDER_DE,
                MONTH_PLACEHOLDER_DE,
                YEAR_PLACEHOLDER_DE,
            ),
            Self::English => (
                DateOrder::Ymd,
                DAY_PLACEHOLDER_EN,
                MONTH_PLACEHOLDER_EN,
                YEAR_PLACEHOLDER_EN,
            ),
        };
        FormatDescriptor::new(
            order,
            Separator::Dot,
            Placeholder::from_letter(day),
            Placeholder::from_letter(month),
            Placeholder::from_letter(year),
        )
    }
}

/// Default format descriptor for a locale tag
pub fn locale_defaults(tag: &str) -> FormatDescriptor {
    LocaleBucket::from_tag(tag).defaults()
}
