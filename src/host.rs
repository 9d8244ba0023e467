//! The text input surface the engine drives.

/// Capabilities the engine needs from whatever widget displays the date.
///
/// Text written through [`HostSurface::set_text`] must not be reported back to the engine as
/// a user edit. Text applied because of a [`FilterOutcome::Replace`] answer must be reported
/// through `on_text_changed` exactly once.
pub trait HostSurface {
    fn current_text(&self) -> String;

    fn cursor_position(&self) -> usize;

    fn set_text(&mut self, text: &str);

    fn set_cursor(&mut self, position: usize);

    fn set_hint(&mut self, hint: &str);
}

/// Answer to a keystroke or paste candidate offered to the engine before it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Let the host apply the candidate as is
    Accept,
    /// Apply this text instead of the candidate
    Replace(String),
    /// Drop the candidate
    Reject,
}

/// Host surface that only keeps state in memory. Useful headless and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHost {
    text:   String,
    cursor: usize,
    hint:   String,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Text the user sees: the content, or the hint while the content is empty
    pub fn display(&self) -> &str {
        if self.text.is_empty() { &self.hint } else { &self.text }
    }
}

impl HostSurface for MemoryHost {
    fn current_text(&self) -> String {
        self.text.clone()
    }

    fn cursor_position(&self) -> usize {
        self.cursor
    }

    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.cursor = self.cursor.min(self.text.chars().count());
    }

    fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.text.chars().count());
    }

    fn set_hint(&mut self, hint: &str) {
        hint.clone_into(&mut self.hint);
    }
}
