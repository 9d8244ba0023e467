use std::fmt;

use crate::{
    BUFFER_LEN,
    format::{Field, FormatDescriptor, Layout},
};

/// The ten character slots behind the edit field.
///
/// Separator slots always hold the configured separator; field slots hold either an ASCII
/// digit or the placeholder of the field they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBuffer {
    slots: [char; BUFFER_LEN],
}

impl DateBuffer {
    /// Creates an empty buffer laid out for `format`
    pub fn new(format: &FormatDescriptor) -> Self {
        let mut buffer = Self {
            slots: [' '; BUFFER_LEN],
        };
        buffer.reset(format);
        buffer
    }

    /// Every field slot back to its placeholder, separators to the configured separator
    pub fn reset(&mut self, format: &FormatDescriptor) {
        let layout = format.layout();
        let separator = format.separator().as_char();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            *slot = layout
                .field_at(index)
                .map_or(separator, |field| format.placeholder(field));
        }
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied()
    }

    /// Reads `count` slots starting at `start` as a decimal number. Slots that do not hold
    /// a digit contribute zero at their weight, so `d5` reads as 5 and `dd` as 0.
    pub fn extract_integer(&self, start: usize, count: usize) -> u32 {
        let Some(slots) = self.slots.get(start..start + count) else {
            return 0;
        };
        let mut value = 0;
        let mut weight = 1;
        for ch in slots.iter().rev() {
            if let Some(digit) = ch.to_digit(10) {
                value += digit * weight;
            }
            weight *= 10;
        }
        value
    }

    pub fn extract_field(&self, field: Field, layout: &Layout) -> u32 {
        self.extract_integer(layout.start(field), field.width())
    }

    /// Writes `value` zero-padded into the slots of `field`
    pub fn write_field(&mut self, field: Field, value: u32, layout: &Layout) {
        let mut rest = value;
        for index in layout.span(field).rev() {
            self.slots[index] = char::from_digit(rest % 10, 10).unwrap_or('0');
            rest /= 10;
        }
    }

    /// Writes `ch` at `index` if it is a field slot; separator slots are left alone.
    pub fn write_slot(&mut self, index: usize, ch: char, layout: &Layout) {
        if index < BUFFER_LEN && !layout.is_separator(index) {
            self.slots[index] = ch;
        }
    }

    /// Puts the field placeholder back into `index`; separator slots are never cleared.
    pub fn clear_slot(&mut self, index: usize, format: &FormatDescriptor) {
        if let Some(field) = format.layout().field_at(index) {
            self.slots[index] = format.placeholder(field);
        }
    }

    /// A field is empty while no slot of it holds a digit.
    pub fn is_field_empty(&self, field: Field, layout: &Layout) -> bool {
        !self.slots[layout.span(field)].iter().any(char::is_ascii_digit)
    }

    /// Number of field slots still showing a placeholder
    pub fn placeholder_count(&self, layout: &Layout) -> usize {
        (0..BUFFER_LEN)
            .filter(|&index| !layout.is_separator(index) && !self.slots[index].is_ascii_digit())
            .count()
    }

    pub fn is_empty(&self, layout: &Layout) -> bool {
        self.placeholder_count(layout) == BUFFER_LEN - layout.separators().len()
    }
}

impl fmt::Display for DateBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slots.iter().try_for_each(|ch| write!(f, "{ch}"))
    }
}
