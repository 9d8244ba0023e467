use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, DAY_PLACEHOLDER_EN, MONTH_PLACEHOLDER_EN, YEAR_PLACEHOLDER_EN,
    prelude::*,
    types::{Placeholder, Separator},
};

/// Order of the three date fields inside the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    /// `dd.mm.yyyy`
    #[default]
    #[display(fmt = "DMY")]
    Dmy,
    /// `mm.dd.yyyy`
    #[display(fmt = "MDY")]
    Mdy,
    /// `yyyy.mm.dd`
    #[display(fmt = "YMD")]
    Ymd,
}

impl DateOrder {
    /// Slot layout for this order
    pub const fn layout(self) -> &'static Layout {
        match self {
            Self::Dmy => &DMY_LAYOUT,
            Self::Mdy => &MDY_LAYOUT,
            Self::Ymd => &YMD_LAYOUT,
        }
    }
}

/// Legacy integer codes: `0 = DMY`, `1 = YMD`, `2 = MDY`.
impl TryFrom<u8> for DateOrder {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Dmy),
            1 => Ok(Self::Ymd),
            2 => Ok(Self::Mdy),
            other => Err(ConfigError::InvalidOrder(other)),
        }
    }
}

/// One of the three date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

impl Field {
    /// Number of buffer slots the field occupies
    pub const fn width(self) -> usize {
        match self {
            Self::Day | Self::Month => 2,
            Self::Year => 4,
        }
    }
}

/// Where each field and separator lives in the ten-slot buffer for one [`DateOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    separators:  [usize; 2],
    day_start:   usize,
    month_start: usize,
    year_start:  usize,
    /// Fields in display order, which is also the order they complete in
    fields:      [Field; 3],
}

const DMY_LAYOUT: Layout = Layout {
    separators:  [2, 5],
    day_start:   0,
    month_start: 3,
    year_start:  6,
    fields:      [Field::Day, Field::Month, Field::Year],
};

const MDY_LAYOUT: Layout = Layout {
    separators:  [2, 5],
    day_start:   3,
    month_start: 0,
    year_start:  6,
    fields:      [Field::Month, Field::Day, Field::Year],
};

const YMD_LAYOUT: Layout = Layout {
    separators:  [4, 7],
    day_start:   8,
    month_start: 5,
    year_start:  0,
    fields:      [Field::Year, Field::Month, Field::Day],
};

impl Layout {
    pub const fn separators(&self) -> [usize; 2] {
        self.separators
    }

    pub const fn fields(&self) -> [Field; 3] {
        self.fields
    }

    pub const fn is_separator(&self, slot: usize) -> bool {
        slot == self.separators[0] || slot == self.separators[1]
    }

    pub const fn start(&self, field: Field) -> usize {
        match field {
            Field::Day => self.day_start,
            Field::Month => self.month_start,
            Field::Year => self.year_start,
        }
    }

    /// Slot range occupied by `field`
    pub const fn span(&self, field: Field) -> Range<usize> {
        let start = self.start(field);
        start..start + field.width()
    }

    /// Field owning `slot`, or `None` for separator and out-of-range slots
    pub fn field_at(&self, slot: usize) -> Option<Field> {
        self.fields.into_iter().find(|&field| self.span(field).contains(&slot))
    }

    /// Field the cursor at `position` is considered to be inside when a separator is typed,
    /// together with the cursor position just past it.
    pub fn field_for_cursor(&self, position: usize) -> (Field, usize) {
        let [first, second] = self.separators;
        if position <= first {
            (self.fields[0], first + 1)
        } else if position <= second {
            (self.fields[1], second + 1)
        } else {
            (self.fields[2], crate::BUFFER_LEN)
        }
    }
}

/// Display format of the date buffer: field order, separator and per-field placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatDescriptor {
    order: DateOrder,
    separator: Separator,
    day_placeholder: Placeholder,
    month_placeholder: Placeholder,
    year_placeholder: Placeholder,
}

impl Default for FormatDescriptor {
    fn default() -> Self {
        Self {
            order: DateOrder::Dmy,
            separator: Separator::Dot,
            day_placeholder: Placeholder::from_letter(DAY_PLACEHOLDER_EN),
            month_placeholder: Placeholder::from_letter(MONTH_PLACEHOLDER_EN),
            year_placeholder: Placeholder::from_letter(YEAR_PLACEHOLDER_EN),
        }
    }
}

impl FormatDescriptor {
    pub const fn new(
        order: DateOrder,
        separator: Separator,
        day_placeholder: Placeholder,
        month_placeholder: Placeholder,
        year_placeholder: Placeholder,
    ) -> Self {
        Self {
            order,
            separator,
            day_placeholder,
            month_placeholder,
            year_placeholder,
        }
    }

    pub const fn order(&self) -> DateOrder {
        self.order
    }

    pub const fn separator(&self) -> Separator {
        self.separator
    }

    pub const fn layout(&self) -> &'static Layout {
        self.order.layout()
    }

    pub const fn placeholder(&self, field: Field) -> char {
        match field {
            Field::Day => self.day_placeholder.get(),
            Field::Month => self.month_placeholder.get(),
            Field::Year => self.year_placeholder.get(),
        }
    }

    pub fn set_order(&mut self, order: DateOrder) {
        self.order = order;
    }

    /// # Errors
    /// Returns `ConfigError::InvalidSeparator` and keeps the current separator if `ch` is not
    /// one of `.`, `/`, `-`.
    pub fn set_separator(&mut self, ch: char) -> Result<(), ConfigError> {
        self.separator = Separator::new(ch)?;
        Ok(())
    }

    /// # Errors
    /// Returns `ConfigError::InvalidPlaceholder` and keeps the current placeholder if `ch` is
    /// not an accepted letter.
    pub fn set_placeholder(&mut self, field: Field, ch: char) -> Result<(), ConfigError> {
        let placeholder = Placeholder::new(ch)?;
        match field {
            Field::Day => self.day_placeholder = placeholder,
            Field::Month => self.month_placeholder = placeholder,
            Field::Year => self.year_placeholder = placeholder,
        }
        Ok(())
    }

    /// Builder-style variant of [`Self::set_order`]
    #[must_use]
    pub const fn with_order(mut self, order: DateOrder) -> Self {
        self.order = order;
        self
    }

    /// Builder-style variant of separator selection for already validated separators
    #[must_use]
    pub const fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Text shown while the field is empty, e.g. `dd.mm.yyyy`
    pub fn hint(&self) -> String {
        let separator = self.separator.as_char();
        let mut hint = String::with_capacity(crate::BUFFER_LEN);
        for (index, field) in self.layout().fields().into_iter().enumerate() {
            if index > 0 {
                hint.push(separator);
            }
            let placeholder = self.placeholder(field);
            hint.extend(std::iter::repeat_n(placeholder, field.width()));
        }
        hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_table() {
        struct TestCase {
            order:      DateOrder,
            day:        Range<usize>,
            month:      Range<usize>,
            year:       Range<usize>,
            separators: [usize; 2],
        }

        let cases = [
            TestCase { order: DateOrder::Dmy, day: 0..2, month: 3..5, year: 6..10, separators: [2, 5] },
            TestCase { order: DateOrder::Mdy, day: 3..5, month: 0..2, year: 6..10, separators: [2, 5] },
            TestCase { order: DateOrder::Ymd, day: 8..10, month: 5..7, year: 0..4, separators: [4, 7] },
        ];

        for case in cases {
            let layout = case.order.layout();
            assert_eq!(layout.span(Field::Day), case.day, "{} day", case.order);
            assert_eq!(layout.span(Field::Month), case.month, "{} month", case.order);
            assert_eq!(layout.span(Field::Year), case.year, "{} year", case.order);
            assert_eq!(layout.separators(), case.separators, "{} separators", case.order);
        }
    }

    #[test]
    fn test_layout_field_at() {
        let layout = DateOrder::Ymd.layout();
        assert_eq!(layout.field_at(0), Some(Field::Year));
        assert_eq!(layout.field_at(3), Some(Field::Year));
        assert_eq!(layout.field_at(4), None);
        assert_eq!(layout.field_at(6), Some(Field::Month));
        assert_eq!(layout.field_at(7), None);
        assert_eq!(layout.field_at(9), Some(Field::Day));
        assert_eq!(layout.field_at(10), None);
    }

    #[test]
    fn test_completion_order() {
        assert_eq!(DateOrder::Dmy.layout().fields(), [Field::Day, Field::Month, Field::Year]);
        assert_eq!(DateOrder::Mdy.layout().fields(), [Field::Month, Field::Day, Field::Year]);
        assert_eq!(DateOrder::Ymd.layout().fields(), [Field::Year, Field::Month, Field::Day]);
    }

    #[test]
    fn test_field_for_cursor() {
        let dmy = DateOrder::Dmy.layout();
        assert_eq!(dmy.field_for_cursor(0), (Field::Day, 3));
        assert_eq!(dmy.field_for_cursor(2), (Field::Day, 3));
        assert_eq!(dmy.field_for_cursor(3), (Field::Month, 6));
        assert_eq!(dmy.field_for_cursor(5), (Field::Month, 6));
        assert_eq!(dmy.field_for_cursor(6), (Field::Year, 10));

        let ymd = DateOrder::Ymd.layout();
        assert_eq!(ymd.field_for_cursor(4), (Field::Year, 5));
        assert_eq!(ymd.field_for_cursor(7), (Field::Month, 8));
        assert_eq!(ymd.field_for_cursor(9), (Field::Day, 10));
    }

    #[test]
    fn test_order_codes() {
        assert_eq!(DateOrder::try_from(0).unwrap(), DateOrder::Dmy);
        assert_eq!(DateOrder::try_from(1).unwrap(), DateOrder::Ymd);
        assert_eq!(DateOrder::try_from(2).unwrap(), DateOrder::Mdy);
        assert!(matches!(DateOrder::try_from(3), Err(ConfigError::InvalidOrder(3))));
    }

    #[test]
    fn test_hint_per_order() {
        let mut format = FormatDescriptor::default();
        assert_eq!(format.hint(), "dd.mm.yyyy");

        format.set_order(DateOrder::Mdy);
        format.set_separator('/').unwrap();
        assert_eq!(format.hint(), "mm/dd/yyyy");

        format.set_order(DateOrder::Ymd);
        format.set_separator('-').unwrap();
        format.set_placeholder(Field::Year, 'J').unwrap();
        assert_eq!(format.hint(), "JJJJ-mm-dd");
    }

    #[test]
    fn test_invalid_setters_keep_previous_value() {
        let mut format = FormatDescriptor::default();

        assert!(matches!(format.set_separator(','), Err(ConfigError::InvalidSeparator(','))));
        assert_eq!(format.separator(), Separator::Dot);

        assert!(matches!(
            format.set_placeholder(Field::Day, '*'),
            Err(ConfigError::InvalidPlaceholder('*'))
        ));
        assert_eq!(format.placeholder(Field::Day), 'd');
    }

    #[test]
    fn test_descriptor_serde() {
        let format = FormatDescriptor::default()
            .with_order(DateOrder::Ymd)
            .with_separator(Separator::Slash);
        let json = serde_json::to_string(&format).unwrap();
        let parsed: FormatDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, format);

        let bad = r#"{"order":"dmy","separator":",","day_placeholder":"d","month_placeholder":"m","year_placeholder":"y"}"#;
        assert!(serde_json::from_str::<FormatDescriptor>(bad).is_err());
    }
}
