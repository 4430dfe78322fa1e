//! Single-line text input control
//!
//! Renders as a bracketed field with a placeholder when empty:
//! ```text
//! [Add new file system...        ]
//! ```
//!
//! Used for the add field, the search field and inline cell editing.

mod input;
mod render;

use ratatui::style::Color;

pub use input::TextInputEvent;
pub use render::render_text_input;

use super::FocusState;

/// State for a text input control
#[derive(Debug, Clone, PartialEq)]
pub struct TextInputState {
    /// Current value
    pub value: String,
    /// Cursor position as a byte offset into `value` (always on a char boundary)
    pub cursor: usize,
    /// Text shown while the value is empty
    pub placeholder: String,
    /// Focus state
    pub focus: FocusState,
}

impl TextInputState {
    /// Create an empty input
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.into(),
            focus: FocusState::Normal,
        }
    }

    /// Set the initial value, placing the cursor at the end
    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    /// Set the focus state
    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check if the control is enabled
    pub fn is_enabled(&self) -> bool {
        self.focus != FocusState::Disabled
    }

    /// Replace the value, placing the cursor at the end
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    /// Clear the value
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        if !self.is_enabled() {
            return;
        }
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert a string at the cursor (paste)
    pub fn insert_str(&mut self, s: &str) {
        if !self.is_enabled() {
            return;
        }
        self.value.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        match self.prev_boundary() {
            Some(prev) => {
                self.value.remove(prev);
                self.cursor = prev;
                true
            }
            None => false,
        }
    }

    /// Delete the character at the cursor
    pub fn delete(&mut self) -> bool {
        if !self.is_enabled() || self.cursor >= self.value.len() {
            return false;
        }
        self.value.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .chars()
            .next_back()
            .map(|c| self.cursor - c.len_utf8())
    }
}

/// Colors for the text input control
#[derive(Debug, Clone, Copy)]
pub struct TextInputColors {
    /// Value text color
    pub text: Color,
    /// Placeholder color
    pub placeholder: Color,
    /// Bracket color
    pub border: Color,
    /// Bracket color while focused
    pub focused: Color,
    /// Disabled color
    pub disabled: Color,
}

impl Default for TextInputColors {
    fn default() -> Self {
        Self {
            text: Color::White,
            placeholder: Color::DarkGray,
            border: Color::Gray,
            focused: Color::Cyan,
            disabled: Color::DarkGray,
        }
    }
}
