//! Toggle input handling

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use super::{FocusState, ToggleLayout, ToggleState};

/// Events returned from toggle input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    /// The value changed to the carried state
    Toggled(bool),
    Hovered,
    Left,
}

impl ToggleState {
    /// Handle a mouse event for this toggle
    ///
    /// # Returns
    /// * `Some(ToggleEvent)` if the event was consumed
    /// * `None` if the event was not relevant to this toggle
    pub fn handle_mouse(&mut self, event: MouseEvent, layout: &ToggleLayout) -> Option<ToggleEvent> {
        if !self.is_enabled() {
            return None;
        }

        let inside = layout.contains(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.toggle();
                Some(ToggleEvent::Toggled(self.checked))
            }
            MouseEventKind::Moved => {
                if inside {
                    if self.focus == FocusState::Hovered {
                        return None;
                    }
                    if self.focus != FocusState::Focused {
                        self.focus = FocusState::Hovered;
                    }
                    Some(ToggleEvent::Hovered)
                } else if self.focus == FocusState::Hovered {
                    self.focus = FocusState::Normal;
                    Some(ToggleEvent::Left)
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
    /// * `Some(ToggleEvent::Toggled)` on Enter or Space
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ToggleEvent> {
        if !self.is_enabled() || self.focus != FocusState::Focused {
            return None;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.toggle();
                Some(ToggleEvent::Toggled(self.checked))
            }
            _ => None,
        }
    }
}
