//! Masked date entry for fixed-width text fields.
//!
//! A [`DateEditor`] drives a ten-character buffer such as `dd.mm.yyyy`, turning keystrokes,
//! deletions, pastes and focus loss into buffer edits and a clamped [`DateValue`]. The widget
//! that shows the text is abstracted behind [`HostSurface`].

mod buffer;
mod consts;
mod editor;
mod format;
mod host;
mod locale;
mod prelude;
mod types;

pub use buffer::DateBuffer;
pub use consts::*;
pub use editor::DateEditor;
pub use format::{DateOrder, Field, FormatDescriptor, Layout};
pub use host::{FilterOutcome, HostSurface, MemoryHost};
pub use locale::{LocaleBucket, locale_defaults};
pub use types::{Placeholder, Separator, clamp_day, clamp_month, clamp_year, days_in_month, is_leap_year};

use crate::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

// `^([0-9]{4})-([0-9]{2})-([0-9]{2})$` is a fixed literal that compiles.
#[allow(clippy::expect_used)]
static CANONICAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("canonical date pattern is valid")
});

/// The date held by an editor. `0` in any component means "not entered yet".
///
/// Fields are public and building the struct directly is unchecked. [`DateValue::new`] and
/// deserialization reject components outside the ranges the editor can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
#[serde(try_from = "RawDateValue")]
pub struct DateValue {
    pub day:   u8,
    pub month: u8,
    pub year:  u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format (expected YYYY-MM-DD): {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid date {day}/{month}/{year}: all components must be at least 1")]
    NonPositive { day: u32, month: u32, year: u32 },
    #[display(fmt = "Date component out of range: {day}/{month}/{year}")]
    OutOfRange { day: u8, month: u8, year: u16 },
}

impl std::error::Error for DateError {}

/// Rejected configuration value. The previous configuration stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid separator {0:?}: only '.', '/' or '-' are allowed")]
    InvalidSeparator(char),

    #[error("Invalid placeholder {0:?}: only letters a-z, A-Z or а-я, А-Я are allowed")]
    InvalidPlaceholder(char),

    #[error("Invalid date order code {0}: only 0 (DMY), 1 (YMD) or 2 (MDY) are allowed")]
    InvalidOrder(u8),
}

#[derive(Deserialize)]
struct RawDateValue {
    day:   u8,
    month: u8,
    year:  u16,
}

impl TryFrom<RawDateValue> for DateValue {
    type Error = DateError;

    fn try_from(raw: RawDateValue) -> Result<Self, Self::Error> {
        Self::new(raw.day, raw.month, raw.year)
    }
}

impl DateValue {
    pub const UNSET: Self = Self {
        day:   0,
        month: 0,
        year:  0,
    };

    /// Checked constructor. Each component is either `0` (unset) or in range, with the day
    /// bounded by whatever month and year are set.
    ///
    /// # Errors
    /// Returns `DateError::OutOfRange` for a month above 12, a year above the maximum or a day
    /// past the end of its month.
    pub const fn new(day: u8, month: u8, year: u16) -> Result<Self, DateError> {
        if month > MAX_MONTH || year > MAX_YEAR || day > days_in_month(year, month) {
            return Err(DateError::OutOfRange { day, month, year });
        }
        Ok(Self { day, month, year })
    }

    /// Clamps raw components into range. Day is clamped last, against the clamped
    /// month and year.
    pub fn clamped(day: u32, month: u32, year: u32) -> Self {
        let year = clamp_year(year);
        let month = clamp_month(month);
        Self {
            day: clamp_day(day, month, year),
            month,
            year,
        }
    }

    /// True once every component has been entered
    pub const fn is_complete(&self) -> bool {
        self.day != 0 && self.month != 0 && self.year != 0
    }

    pub const fn is_unset(&self) -> bool {
        self.day == 0 && self.month == 0 && self.year == 0
    }

    pub fn get(&self, field: Field) -> u32 {
        match field {
            Field::Day => u32::from(self.day),
            Field::Month => u32::from(self.month),
            Field::Year => u32::from(self.year),
        }
    }

    /// `YYYY-MM-DD`, or `None` while any component is unset
    pub fn canonical(&self) -> Option<String> {
        self.is_complete().then(|| self.to_string())
    }
}

/// Parses the canonical `YYYY-MM-DD` form, clamping each component into range.
impl FromStr for DateValue {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = CANONICAL_PATTERN
            .captures(s)
            .ok_or_else(|| DateError::InvalidFormat(s.to_owned()))?;
        let component = |index: usize| -> Result<u32, DateError> {
            captures[index]
                .parse::<u32>()
                .map_err(|_| DateError::InvalidFormat(s.to_owned()))
        };
        let year = component(1)?;
        let month = component(2)?;
        let day = component(3)?;
        Ok(Self::clamped(day, month, year))
    }
}
