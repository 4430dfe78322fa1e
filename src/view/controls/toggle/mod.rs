//! Toggle (checkbox) control for boolean values
//!
//! Renders as: `Label: [x]` or `Label: [ ]`

mod input;
mod render;

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use input::ToggleEvent;
pub use render::render_toggle;

use super::FocusState;

/// State for a toggle control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleState {
    pub checked: bool,
    /// Label displayed before the checkbox
    pub label: String,
    pub focus: FocusState,
}

impl ToggleState {
    pub fn new(checked: bool, label: impl Into<String>) -> Self {
        Self {
            checked,
            label: label.into(),
            focus: FocusState::Normal,
        }
    }

    /// Set the focus state
    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.focus != FocusState::Disabled
    }

    /// Flip the value unless disabled
    pub fn toggle(&mut self) {
        if self.is_enabled() {
            self.checked = !self.checked;
        }
    }
}

/// Colors for the toggle control
#[derive(Debug, Clone, Copy)]
pub struct ToggleColors {
    /// Checkbox bracket color
    pub bracket: Color,
    /// Checkmark color when checked
    pub checkmark: Color,
    pub label: Color,
    pub focused: Color,
    pub disabled: Color,
}

impl Default for ToggleColors {
    fn default() -> Self {
        Self {
            bracket: Color::Gray,
            checkmark: Color::Green,
            label: Color::White,
            focused: Color::Cyan,
            disabled: Color::DarkGray,
        }
    }
}

/// Layout information returned after rendering for hit testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleLayout {
    /// The `[x]` cells
    pub checkbox_area: Rect,
    /// Label and checkbox; the whole area is clickable
    pub full_area: Rect,
}

impl ToggleLayout {
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let area = self.full_area;
        x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
    }
}
