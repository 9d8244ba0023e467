use crate::ConfigError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_MONTH, MIN_YEAR, SEPARATOR_DASH, SEPARATOR_DOT,
    SEPARATOR_SLASH,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three characters allowed between date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum Separator {
    #[display(fmt = ".")]
    Dot,
    #[display(fmt = "/")]
    Slash,
    #[display(fmt = "-")]
    Dash,
}

impl Separator {
    pub const ALL: [Self; 3] = [Self::Dot, Self::Slash, Self::Dash];

    /// Validates a separator character
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidSeparator` for anything other than `.`, `/` or `-`.
    pub const fn new(ch: char) -> Result<Self, ConfigError> {
        match ch {
            SEPARATOR_DOT => Ok(Self::Dot),
            SEPARATOR_SLASH => Ok(Self::Slash),
            SEPARATOR_DASH => Ok(Self::Dash),
            other => Err(ConfigError::InvalidSeparator(other)),
        }
    }

    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Self::Dot => SEPARATOR_DOT,
            Self::Slash => SEPARATOR_SLASH,
            Self::Dash => SEPARATOR_DASH,
        }
    }

    /// True for any recognized separator, regardless of the configured one
    pub const fn is_separator(ch: char) -> bool {
        matches!(ch, SEPARATOR_DOT | SEPARATOR_SLASH | SEPARATOR_DASH)
    }
}

impl TryFrom<char> for Separator {
    type Error = ConfigError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Separator> for char {
    fn from(separator: Separator) -> Self {
        separator.as_char()
    }
}

/// A placeholder letter shown in an unfilled field slot.
/// Only Latin `A-Z`/`a-z` and Cyrillic `А-я` letters are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Placeholder(char);

impl Placeholder {
    /// Creates a new Placeholder, validating the letter class
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidPlaceholder` if `ch` is not a Latin or basic Cyrillic letter.
    pub const fn new(ch: char) -> Result<Self, ConfigError> {
        if is_placeholder_letter(ch) {
            Ok(Self(ch))
        } else {
            Err(ConfigError::InvalidPlaceholder(ch))
        }
    }

    /// For letters known at compile time; an invalid one degrades to `x`.
    pub(crate) const fn from_letter(ch: char) -> Self {
        if is_placeholder_letter(ch) { Self(ch) } else { Self('x') }
    }

    #[inline]
    pub const fn get(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Placeholder {
    type Error = ConfigError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Placeholder> for char {
    fn from(placeholder: Placeholder) -> Self {
        placeholder.0
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// `А` (U+0410) through `я` (U+044F) is one contiguous block; `ё`/`Ё` sit outside it.
const fn is_placeholder_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, 'А'..='я')
}

// Validation engine

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days allowed in `month` of `year`.
/// A month that has not been entered yet (0) allows the full 31.
pub const fn days_in_month(year: u16, month: u8) -> u8 {
    if month > MAX_MONTH {
        return DAYS_IN_MONTH[0];
    }
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub fn clamp_month(month: u32) -> u8 {
    let clamped = month.clamp(u32::from(MIN_MONTH), u32::from(MAX_MONTH));
    u8::try_from(clamped).unwrap_or(MAX_MONTH)
}

pub fn clamp_year(year: u32) -> u16 {
    let clamped = year.clamp(u32::from(MIN_YEAR), u32::from(MAX_YEAR));
    u16::try_from(clamped).unwrap_or(MAX_YEAR)
}

/// Clamps `day` against whatever `month`/`year` are currently known, which may be
/// stale while an edit is in flight. Callers re-clamp when month or year change.
pub fn clamp_day(day: u32, month: u8, year: u16) -> u8 {
    if day < u32::from(MIN_DAY) {
        return MIN_DAY;
    }
    let max = days_in_month(year, month);
    u8::try_from(day.min(u32::from(max))).unwrap_or(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_new_valid() {
        assert_eq!(Separator::new('.').unwrap(), Separator::Dot);
        assert_eq!(Separator::new('/').unwrap(), Separator::Slash);
        assert_eq!(Separator::new('-').unwrap(), Separator::Dash);
    }

    #[test]
    fn test_separator_new_invalid() {
        for ch in [',', ' ', '_', '1', 'a'] {
            let result = Separator::new(ch);
            assert!(
                matches!(result, Err(ConfigError::InvalidSeparator(c)) if c == ch),
                "{ch:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_separator_display_and_char() {
        for sep in Separator::ALL {
            assert_eq!(sep.to_string(), sep.as_char().to_string());
            let ch: char = sep.into();
            assert_eq!(Separator::try_from(ch).unwrap(), sep);
        }
    }

    #[test]
    fn test_separator_serde() {
        let json = serde_json::to_string(&Separator::Slash).unwrap();
        assert_eq!(json, "\"/\"");

        let parsed: Separator = serde_json::from_str("\"-\"").unwrap();
        assert_eq!(parsed, Separator::Dash);

        let result: Result<Separator, _> = serde_json::from_str("\",\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_placeholder_accepts_letters() {
        for ch in ['a', 'z', 'A', 'Z', 'd', 'А', 'Я', 'а', 'я', 'д', 'м', 'г'] {
            assert!(Placeholder::new(ch).is_ok(), "{ch:?} should be accepted");
        }
    }

    #[test]
    fn test_placeholder_rejects_non_letters() {
        for ch in ['0', '9', '*', '.', ' ', 'ё', 'Ё', 'é', 'ß'] {
            assert!(
                matches!(Placeholder::new(ch), Err(ConfigError::InvalidPlaceholder(c)) if c == ch),
                "{ch:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_placeholder_serde() {
        let placeholder = Placeholder::new('г').unwrap();
        let json = serde_json::to_string(&placeholder).unwrap();
        assert_eq!(json, "\"г\"");

        let parsed: Placeholder = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, placeholder);

        let result: Result<Placeholder, _> = serde_json::from_str("\"7\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_clamp_month() {
        assert_eq!(clamp_month(0), 1);
        assert_eq!(clamp_month(1), 1);
        assert_eq!(clamp_month(7), 7);
        assert_eq!(clamp_month(12), 12);
        assert_eq!(clamp_month(13), 12);
        assert_eq!(clamp_month(99), 12);
    }

    #[test]
    fn test_clamp_year() {
        assert_eq!(clamp_year(0), 1);
        assert_eq!(clamp_year(1), 1);
        assert_eq!(clamp_year(2024), 2024);
        assert_eq!(clamp_year(2100), 2100);
        assert_eq!(clamp_year(2101), 2100);
        assert_eq!(clamp_year(9999), 2100);
    }

    #[test]
    fn test_clamp_day_cases() {
        struct TestCase {
            day:      u32,
            month:    u8,
            year:     u16,
            expected: u8,
        }

        let cases = [
            TestCase { day: 0, month: 1, year: 2024, expected: 1 },
            TestCase { day: 31, month: 1, year: 2024, expected: 31 },
            TestCase { day: 99, month: 1, year: 2024, expected: 31 },
            TestCase { day: 31, month: 4, year: 2024, expected: 30 },
            TestCase { day: 31, month: 6, year: 2024, expected: 30 },
            TestCase { day: 31, month: 9, year: 2024, expected: 30 },
            TestCase { day: 31, month: 11, year: 2024, expected: 30 },
            TestCase { day: 30, month: 2, year: 2024, expected: 29 },
            TestCase { day: 29, month: 2, year: 2023, expected: 28 },
            TestCase { day: 29, month: 2, year: 1900, expected: 28 },
            TestCase { day: 29, month: 2, year: 2000, expected: 29 },
            // month not entered yet
            TestCase { day: 31, month: 0, year: 0, expected: 31 },
            TestCase { day: 45, month: 0, year: 0, expected: 31 },
        ];

        for case in &cases {
            assert_eq!(
                clamp_day(case.day, case.month, case.year),
                case.expected,
                "clamp_day({}, {}, {})",
                case.day,
                case.month,
                case.year
            );
        }
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        u16,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase { year: 2020, is_leap: true, description: "divisible by 4" },
            TestCase { year: 2024, is_leap: true, description: "divisible by 4" },
            TestCase { year: 2023, is_leap: false, description: "not divisible by 4" },
            TestCase { year: 1900, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2100, is_leap: false, description: "century not divisible by 400" },
            TestCase { year: 2000, is_leap: true, description: "divisible by 400" },
            TestCase { year: 0, is_leap: true, description: "unset year" },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_30_day_months() {
        for month in [4, 6, 9, 11] {
            assert_eq!(days_in_month(2024, month), 30, "Month {month} should have 30 days");
        }
    }

    #[test]
    fn test_days_in_month_31_day_months() {
        for month in [0, 1, 3, 5, 7, 8, 10, 12] {
            assert_eq!(days_in_month(2024, month), 31, "Month {month} should have 31 days");
        }
    }
}
