//! Button input handling

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::{ButtonLayout, ButtonState, FocusState};

/// Events returned from button input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Released over the button after pressing it
    Clicked,
    /// The mouse entered the button
    Hovered,
    /// The mouse left the button
    Left,
}

impl ButtonState {
    /// Handle a mouse event for this button
    ///
    /// # Arguments
    /// * `event` - The mouse event to handle
    /// * `layout` - The button's rendered layout for hit testing
    ///
    /// # Returns
    /// * `Some(ButtonEvent)` if an action should be taken
    /// * `None` otherwise (a press only arms the button)
    pub fn handle_mouse(&mut self, event: MouseEvent, layout: &ButtonLayout) -> Option<ButtonEvent> {
        if !self.is_enabled() {
            return None;
        }

        let inside = layout.contains(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.pressed = true;
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let was_pressed = std::mem::take(&mut self.pressed);
                (inside && was_pressed).then_some(ButtonEvent::Clicked)
            }
            MouseEventKind::Moved => {
                if inside {
                    if self.focus == FocusState::Hovered {
                        return None;
                    }
                    if self.focus != FocusState::Focused {
                        self.focus = FocusState::Hovered;
                    }
                    Some(ButtonEvent::Hovered)
                } else if self.focus == FocusState::Hovered {
                    self.focus = FocusState::Normal;
                    Some(ButtonEvent::Left)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Handle a keyboard event while focused
    ///
    /// # Returns
    /// * `Some(ButtonEvent::Clicked)` on Enter or Space
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ButtonEvent> {
        if !self.is_enabled() || self.focus != FocusState::Focused {
            return None;
        }
        matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')).then_some(ButtonEvent::Clicked)
    }
}
