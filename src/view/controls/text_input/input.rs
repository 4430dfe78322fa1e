//! Text input key handling

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::TextInputState;

/// Events returned from text input key handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputEvent {
    /// The value changed
    Changed,
    /// Only the cursor moved
    CursorMoved,
    /// Enter was pressed
    Submitted,
    /// Escape was pressed
    Cancelled,
}

impl TextInputState {
    /// Handle a keyboard event for this input
    ///
    /// # Returns
    /// * `Some(TextInputEvent)` if the event was consumed
    /// * `None` if the event was not relevant
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TextInputEvent> {
        if !self.is_enabled() {
            return None;
        }

        match key.code {
            KeyCode::Enter => Some(TextInputEvent::Submitted),
            KeyCode::Esc => Some(TextInputEvent::Cancelled),
            KeyCode::Char(c)
                if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.insert(c);
                Some(TextInputEvent::Changed)
            }
            KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => {
                if self.value.is_empty() {
                    return Some(TextInputEvent::CursorMoved);
                }
                self.clear();
                Some(TextInputEvent::Changed)
            }
            KeyCode::Backspace => Some(if self.backspace() {
                TextInputEvent::Changed
            } else {
                TextInputEvent::CursorMoved
            }),
            KeyCode::Delete => Some(if self.delete() {
                TextInputEvent::Changed
            } else {
                TextInputEvent::CursorMoved
            }),
            KeyCode::Left => {
                self.move_left();
                Some(TextInputEvent::CursorMoved)
            }
            KeyCode::Right => {
                self.move_right();
                Some(TextInputEvent::CursorMoved)
            }
            KeyCode::Home => {
                self.move_home();
                Some(TextInputEvent::CursorMoved)
            }
            KeyCode::End => {
                self.move_end();
                Some(TextInputEvent::CursorMoved)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::controls::FocusState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_editing() {
        let mut state = TextInputState::new("Name");

        for c in "helo".chars() {
            assert_eq!(
                state.handle_key(key(KeyCode::Char(c))),
                Some(TextInputEvent::Changed)
            );
        }
        state.handle_key(key(KeyCode::Left));
        state.handle_key(key(KeyCode::Char('l')));
        assert_eq!(state.value(), "hello");

        state.handle_key(key(KeyCode::Home));
        assert_eq!(
            state.handle_key(key(KeyCode::Backspace)),
            Some(TextInputEvent::CursorMoved)
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Delete)),
            Some(TextInputEvent::Changed)
        );
        assert_eq!(state.value(), "ello");
    }

    #[test]
    fn test_enter_and_escape() {
        let mut state = TextInputState::new("");
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(TextInputEvent::Submitted)
        );
        assert_eq!(
            state.handle_key(key(KeyCode::Esc)),
            Some(TextInputEvent::Cancelled)
        );
        assert_eq!(state.handle_key(key(KeyCode::F(5))), None);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut state = TextInputState::new("").with_value("/data");
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(state.handle_key(ctrl_u), Some(TextInputEvent::Changed));
        assert!(state.value().is_empty());
        assert_eq!(state.handle_key(ctrl_u), Some(TextInputEvent::CursorMoved));
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut state = TextInputState::new("").with_focus(FocusState::Disabled);
        assert_eq!(state.handle_key(key(KeyCode::Char('a'))), None);
        assert!(state.value().is_empty());
    }
}
