//! Push button control
//!
//! Renders as: `[ Add ]`
//!
//! A click fires on release over the button after a press on it, so a press
//! dragged off the button does nothing. A disabled button ignores input.

mod input;
mod render;

use ratatui::layout::Rect;
use ratatui::style::Color;

pub use input::ButtonEvent;
pub use render::render_button;

use super::FocusState;

/// State for a button control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    /// Text between the brackets
    pub label: String,
    pub focus: FocusState,
    /// Pressed and not yet released
    pub pressed: bool,
}

impl ButtonState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            focus: FocusState::Normal,
            pressed: false,
        }
    }

    /// Set the focus state
    pub fn with_focus(mut self, focus: FocusState) -> Self {
        self.focus = focus;
        self
    }

    /// Check if the button can be activated
    pub fn is_enabled(&self) -> bool {
        self.focus != FocusState::Disabled
    }

    /// Enable or disable the button, keeping hover and focus when enabled
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.focus = FocusState::Disabled;
            self.pressed = false;
        } else if self.focus == FocusState::Disabled {
            self.focus = FocusState::Normal;
        }
    }
}

/// Colors for the button control
#[derive(Debug, Clone, Copy)]
pub struct ButtonColors {
    /// Label color
    pub text: Color,
    /// Bracket color
    pub border: Color,
    /// Background while pressed
    pub pressed_bg: Color,
    pub focused: Color,
    pub hovered: Color,
    pub disabled: Color,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            text: Color::Green,
            border: Color::Gray,
            pressed_bg: Color::DarkGray,
            focused: Color::Cyan,
            hovered: Color::LightGreen,
            disabled: Color::DarkGray,
        }
    }
}

/// Layout information returned after rendering for hit testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonLayout {
    pub button_area: Rect,
}

impl ButtonLayout {
    /// Check if a point is on the button
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let area = self.button_area;
        x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
    }
}
