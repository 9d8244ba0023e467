use std::fmt;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::{
    BUFFER_LEN, ConfigError, DateError, DateValue,
    buffer::DateBuffer,
    format::{DateOrder, Field, FormatDescriptor},
    host::{FilterOutcome, HostSurface},
    locale::locale_defaults,
    types::{Separator, clamp_day, clamp_month, clamp_year},
};

/// Pasted text for day-first and month-first layouts. Any recognized separator is accepted,
/// independent of the configured one.
// Both patterns are fixed literals that compile.
#[allow(clippy::expect_used)]
static TWO_DIGIT_FIRST_PASTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}[./-][0-9]{2}[./-][0-9]{4}$").expect("paste pattern is valid")
});

#[allow(clippy::expect_used)]
static YEAR_FIRST_PASTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}[./-][0-9]{2}[./-][0-9]{2}$").expect("paste pattern is valid")
});

fn paste_pattern(order: DateOrder) -> &'static Regex {
    match order {
        DateOrder::Dmy | DateOrder::Mdy => &TWO_DIGIT_FIRST_PASTE,
        DateOrder::Ymd => &YEAR_FIRST_PASTE,
    }
}

type ChangeListener = Box<dyn FnMut(DateValue)>;

/// Masked date entry engine bound to one host surface.
///
/// The editor owns the ten-slot [`DateBuffer`] and the [`DateValue`] derived from it and keeps
/// the two consistent: whenever a field completes, its integer is clamped and the slots are
/// rewritten from it. Every entry point runs to completion, including the change listener,
/// before returning.
pub struct DateEditor<H: HostSurface> {
    host: H,
    format: FormatDescriptor,
    buffer: DateBuffer,
    value: DateValue,
    /// Raised between handing a paste replacement to the host and the host reporting the
    /// resulting text change, so that change is not taken for a user deletion.
    applying_internal_edit: bool,
    listener: Option<ChangeListener>,
}

impl<H: HostSurface> DateEditor<H> {
    /// Creates an editor with its own copy of `format`
    pub fn new(host: H, format: FormatDescriptor) -> Self {
        let mut editor = Self {
            host,
            format,
            buffer: DateBuffer::new(&format),
            value: DateValue::UNSET,
            applying_internal_edit: false,
            listener: None,
        };
        editor.host.set_hint(&format.hint());
        editor
    }

    /// Creates an editor using the defaults of a locale tag such as `de_DE.UTF-8`
    pub fn with_locale(host: H, tag: &str) -> Self {
        Self::new(host, locale_defaults(tag))
    }

    /// Registers the listener called with the current value whenever day, month or year
    /// actually change. Replaces any previous listener.
    pub fn on_change(&mut self, listener: impl FnMut(DateValue) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub const fn format(&self) -> &FormatDescriptor {
        &self.format
    }

    pub const fn buffer(&self) -> &DateBuffer {
        &self.buffer
    }

    pub const fn value(&self) -> DateValue {
        self.value
    }

    pub const fn day(&self) -> u8 {
        self.value.day
    }

    pub const fn month(&self) -> u8 {
        self.value.month
    }

    pub const fn year(&self) -> u16 {
        self.value.year
    }

    /// `YYYY-MM-DD`, or `None` while any field is unset
    pub fn canonical_date(&self) -> Option<String> {
        self.value.canonical()
    }

    // --- configuration ---

    pub fn set_order(&mut self, order: DateOrder) {
        self.format.set_order(order);
        self.apply_format();
    }

    /// # Errors
    /// Returns `ConfigError::InvalidOrder` for codes other than 0, 1 or 2.
    pub fn set_order_code(&mut self, code: u8) -> Result<(), ConfigError> {
        let order = DateOrder::try_from(code).inspect_err(|err| warn!("{err}"))?;
        self.set_order(order);
        Ok(())
    }

    /// # Errors
    /// Returns `ConfigError::InvalidSeparator`; the current separator stays in effect.
    pub fn set_separator(&mut self, ch: char) -> Result<(), ConfigError> {
        self.format.set_separator(ch).inspect_err(|err| warn!("{err}"))?;
        self.apply_format();
        Ok(())
    }

    /// # Errors
    /// Returns `ConfigError::InvalidPlaceholder`; the current placeholder stays in effect.
    pub fn set_placeholder(&mut self, field: Field, ch: char) -> Result<(), ConfigError> {
        self.format
            .set_placeholder(field, ch)
            .inspect_err(|err| warn!("{field} {err}"))?;
        self.apply_format();
        Ok(())
    }

    /// Applies each supplied placeholder on its own; a rejected one does not stop the others.
    ///
    /// # Errors
    /// Returns the first rejection, after every valid placeholder has been applied.
    pub fn set_placeholders(
        &mut self,
        day: Option<char>,
        month: Option<char>,
        year: Option<char>,
    ) -> Result<(), ConfigError> {
        let mut result = Ok(());
        for (field, ch) in [(Field::Day, day), (Field::Month, month), (Field::Year, year)] {
            let Some(ch) = ch else { continue };
            if let Err(err) = self.format.set_placeholder(field, ch) {
                warn!("{field} {err}");
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        self.apply_format();
        result
    }

    /// Rebuilds hint and buffer after a format change. Fields that already hold a value are
    /// rendered in the new layout; digits of uncompleted fields are dropped.
    fn apply_format(&mut self) {
        self.host.set_hint(&self.format.hint());
        self.buffer.reset(&self.format);
        if self.value.is_unset() {
            self.host.set_text("");
            return;
        }
        for field in [Field::Day, Field::Month, Field::Year] {
            if self.value.get(field) != 0 {
                self.render_field(field);
            }
        }
        self.push_text();
    }

    // --- value API ---

    /// Sets the date from its canonical `YYYY-MM-DD` form, clamping each component.
    ///
    /// # Errors
    /// Returns `DateError::InvalidFormat` without touching the current date.
    pub fn set_canonical_date(&mut self, date: &str) -> Result<(), DateError> {
        let value = date
            .parse::<DateValue>()
            .inspect_err(|err| warn!("set_canonical_date: {err}"))?;
        self.apply_value(value);
        Ok(())
    }

    /// Sets the date from integers, clamping month, year and then day.
    ///
    /// # Errors
    /// Returns `DateError::NonPositive` without touching the current date if any component
    /// is below 1.
    pub fn set_date(&mut self, day: u32, month: u32, year: u32) -> Result<(), DateError> {
        if day < 1 || month < 1 || year < 1 {
            let err = DateError::NonPositive { day, month, year };
            warn!("set_date: {err}");
            return Err(err);
        }
        self.apply_value(DateValue::clamped(day, month, year));
        Ok(())
    }

    fn apply_value(&mut self, value: DateValue) {
        let before = self.value;
        self.value = value;
        self.buffer.reset(&self.format);
        for field in [Field::Day, Field::Month, Field::Year] {
            self.render_field(field);
        }
        self.push_text();
        self.notify_if_changed(before);
    }

    /// Back to the empty state. Never notifies.
    pub fn reset(&mut self) {
        debug!("reset");
        self.value = DateValue::UNSET;
        self.buffer.reset(&self.format);
        self.host.set_text("");
    }

    // --- host events ---

    /// Decides what happens to candidate text about to be inserted at `dest_start`.
    ///
    /// Single digits and separators are applied to the buffer directly and the raw keystroke
    /// is dropped. A ten-character candidate is treated as a paste.
    ///
    /// A pending paste guard is dropped here: a host that never reported the replacement must
    /// not have its next deletion swallowed.
    pub fn filter_input(&mut self, candidate: &str, dest_start: usize) -> FilterOutcome {
        self.applying_internal_edit = false;
        let mut chars = candidate.chars();
        match (chars.next(), chars.next()) {
            (None, _) => FilterOutcome::Accept,
            (Some(ch), None) if ch.is_ascii_digit() => {
                self.insert_digit(dest_start, ch);
                FilterOutcome::Reject
            }
            (Some(ch), None) if Separator::is_separator(ch) => {
                self.insert_separator(dest_start);
                FilterOutcome::Reject
            }
            (Some(_), None) => FilterOutcome::Reject,
            _ => self
                .paste(candidate)
                .map_or(FilterOutcome::Reject, FilterOutcome::Replace),
        }
    }

    /// Host report that `removed` characters at `start` were replaced by `inserted` new ones.
    pub fn on_text_changed(&mut self, start: usize, removed: usize, _inserted: usize) {
        if self.applying_internal_edit {
            self.applying_internal_edit = false;
            return;
        }
        self.delete_range(start, removed);
    }

    pub fn on_focus_changed(&mut self, has_focus: bool) {
        if !has_focus {
            self.finalize();
        }
    }

    // --- handlers ---

    /// Writes `digit` at `position` and completes any field the cursor moves past.
    pub fn insert_digit(&mut self, position: usize, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        let before = self.value;
        let layout = self.format.layout();
        let [first_separator, second_separator] = layout.separators();
        let [first, second, last] = layout.fields();

        let mut position = position.min(BUFFER_LEN);
        if position < BUFFER_LEN && !layout.is_separator(position) {
            self.buffer.write_slot(position, digit, layout);
            position += 1;
        }
        if position == first_separator {
            self.complete_field(first);
            position += 1;
        }
        if position == second_separator {
            self.complete_field(second);
            position += 1;
        }
        if position >= BUFFER_LEN {
            self.complete_field(last);
        }

        self.push_text();
        self.host.set_cursor(position);
        self.notify_if_changed(before);
    }

    /// Completes the field the cursor is in and jumps to the start of the next one.
    pub fn insert_separator(&mut self, position: usize) {
        let before = self.value;
        let (field, next) = self.format.layout().field_for_cursor(position);
        self.complete_field(field);

        self.push_text();
        self.host.set_cursor(next);
        self.notify_if_changed(before);
    }

    /// Clears `count` slots from `start`, keeping separators. Clearing the last digit resets
    /// the editor.
    pub fn delete_range(&mut self, start: usize, count: usize) {
        if count == 0 {
            return;
        }
        let end = start.saturating_add(count.min(BUFFER_LEN)).min(BUFFER_LEN);
        for index in start..end {
            self.buffer.clear_slot(index, &self.format);
        }
        if self.buffer.is_empty(self.format.layout()) {
            self.reset();
            return;
        }
        self.push_text();
        self.host.set_cursor(start);
    }

    /// Replaces the whole buffer with a pasted date shaped for the current order.
    /// Returns the new field text, or `None` if the paste was rejected.
    pub fn paste(&mut self, text: &str) -> Option<String> {
        if !paste_pattern(self.format.order()).is_match(text) {
            debug!("paste rejected: {text:?}");
            return None;
        }
        let layout = self.format.layout();
        for (index, ch) in text.chars().enumerate() {
            self.buffer.write_slot(index, ch, layout);
        }

        let before = self.value;
        let year = clamp_year(self.buffer.extract_field(Field::Year, layout));
        let month = clamp_month(self.buffer.extract_field(Field::Month, layout));
        let day = clamp_day(self.buffer.extract_field(Field::Day, layout), month, year);
        self.value = DateValue { day, month, year };
        for field in [Field::Day, Field::Month, Field::Year] {
            self.render_field(field);
        }

        self.applying_internal_edit = true;
        self.notify_if_changed(before);
        Some(self.buffer.to_string())
    }

    /// Focus-loss pass: resets if any field is empty, otherwise derives every field that has
    /// no value yet and re-renders the rest.
    pub fn finalize(&mut self) {
        let layout = self.format.layout();
        let any_empty = layout
            .fields()
            .into_iter()
            .any(|field| self.buffer.is_field_empty(field, layout));
        if any_empty {
            self.reset();
            return;
        }

        let before = self.value;
        let mut derived = false;
        for field in [Field::Day, Field::Month, Field::Year] {
            if self.value.get(field) == 0 {
                self.complete_field(field);
                derived = true;
            }
        }
        if !derived {
            for field in [Field::Day, Field::Month, Field::Year] {
                self.render_field(field);
            }
        }
        self.push_text();
        self.notify_if_changed(before);
    }

    /// Extracts, clamps and re-renders `field`. Month and year changes re-clamp a day that
    /// is already set.
    fn complete_field(&mut self, field: Field) {
        let raw = self.buffer.extract_field(field, self.format.layout());
        match field {
            Field::Day => self.value.day = clamp_day(raw, self.value.month, self.value.year),
            Field::Month => {
                self.value.month = clamp_month(raw);
                self.reclamp_day();
            }
            Field::Year => {
                self.value.year = clamp_year(raw);
                self.reclamp_day();
            }
        }
        self.render_field(field);
        debug!("{field} completed: {raw} -> {}", self.value.get(field));
    }

    fn reclamp_day(&mut self) {
        if self.value.day > 0 {
            self.value.day = clamp_day(u32::from(self.value.day), self.value.month, self.value.year);
            self.render_field(Field::Day);
        }
    }

    fn render_field(&mut self, field: Field) {
        self.buffer
            .write_field(field, self.value.get(field), self.format.layout());
    }

    fn push_text(&mut self) {
        self.host.set_text(&self.buffer.to_string());
    }

    fn notify_if_changed(&mut self, before: DateValue) {
        if self.value == before {
            return;
        }
        if let Some(listener) = self.listener.as_mut() {
            listener(self.value);
        }
    }
}

impl<H: HostSurface + fmt::Debug> fmt::Debug for DateEditor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateEditor")
            .field("host", &self.host)
            .field("format", &self.format)
            .field("buffer", &self.buffer.to_string())
            .field("value", &self.value)
            .field("applying_internal_edit", &self.applying_internal_edit)
            .finish_non_exhaustive()
    }
}
