//! File system map input handling
//!
//! Every entry point wraps its work in the same cycle: pick up changes made
//! to the search field since the last dispatch, handle the input, then
//! deliver the events deferred while handling it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::{FileSystemMapHit, FileSystemMapLayout, FileSystemMapState, FocusArea, TreeColumn};
use super::tree::ItemButton;
use crate::view::controls::{ButtonEvent, TextInputEvent, ToggleEvent};

/// A left press on a tree cell, kept until release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PressState {
    pub row: usize,
    pub column: TreeColumn,
    /// The cell was already selected before the press
    pub was_selected: bool,
    pub position: (u16, u16),
}

impl FileSystemMapState {
    /// Handle a keyboard event
    ///
    /// # Returns
    /// * `true` if the event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.sync_search_box();
        let handled = self.dispatch_key(key);
        self.sync_search_box();
        self.finish_dispatch();
        handled
    }

    /// Handle a mouse event
    ///
    /// # Arguments
    /// * `event` - The mouse event to handle
    /// * `layout` - The editor's rendered layout for hit testing
    ///
    /// # Returns
    /// * `true` if the event was consumed
    pub fn handle_mouse(&mut self, event: MouseEvent, layout: &FileSystemMapLayout) -> bool {
        self.sync_search_box();
        let handled = self.dispatch_mouse(event, layout);
        self.sync_search_box();
        self.finish_dispatch();
        handled
    }

    /// Insert pasted text into the focused field
    pub fn handle_paste(&mut self, text: &str) -> bool {
        self.sync_search_box();
        let handled = self.dispatch_paste(text);
        self.sync_search_box();
        self.finish_dispatch();
        handled
    }

    fn dispatch_paste(&mut self, text: &str) -> bool {
        if self.message.is_open() {
            return true;
        }
        // Line breaks cannot be typed into a single-line field
        let text: String = text.chars().filter(|c| !c.is_control()).collect();

        if let Some(edit) = self.editing.as_mut() {
            edit.input.insert_str(&text);
            return true;
        }

        match self.focus {
            FocusArea::Search => {
                self.search.edit(|input| input.insert_str(&text));
                true
            }
            FocusArea::AddField => {
                self.add_input.insert_str(&text);
                self.add_edit_text_changed();
                true
            }
            FocusArea::BuiltinToggle | FocusArea::Tree => false,
        }
    }

    fn dispatch_key(&mut self, key: KeyEvent) -> bool {
        // The dialog is modal
        if self.message.is_open() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.message.dismiss();
            }
            return true;
        }

        if self.editing.is_some() {
            return self.handle_edit_key(key);
        }

        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                return true;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return true;
            }
            _ => {}
        }

        match self.focus {
            FocusArea::Search => self.search.handle_key(key).is_some(),
            FocusArea::AddField => self.handle_add_key(key),
            FocusArea::BuiltinToggle => match self.builtin_toggle.handle_key(key) {
                Some(ToggleEvent::Toggled(_)) => {
                    self.show_builtins_changed();
                    true
                }
                _ => false,
            },
            FocusArea::Tree => self.handle_tree_key(key),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.commit_edit();
            return true;
        }

        let Some(edit) = self.editing.as_mut() else {
            return false;
        };
        match edit.input.handle_key(key) {
            Some(TextInputEvent::Submitted) => self.commit_edit(),
            Some(TextInputEvent::Cancelled) => self.cancel_edit(),
            _ => {}
        }
        true
    }

    fn handle_add_key(&mut self, key: KeyEvent) -> bool {
        match self.add_input.handle_key(key) {
            Some(TextInputEvent::Changed) => {
                self.add_edit_text_changed();
                true
            }
            // Invalid names are reported in the dialog
            Some(TextInputEvent::Submitted) => {
                self.add_file_system_pressed();
                true
            }
            Some(TextInputEvent::Cancelled) => {
                if self.add_input.value().is_empty() {
                    return false;
                }
                self.set_add_text("");
                true
            }
            Some(TextInputEvent::CursorMoved) => true,
            None => false,
        }
    }

    fn handle_tree_key(&mut self, key: KeyEvent) -> bool {
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Up if alt => {
                self.move_selected(true);
                true
            }
            KeyCode::Down if alt => {
                self.move_selected(false);
                true
            }
            KeyCode::Up => {
                self.select_offset(-1);
                true
            }
            KeyCode::Down => {
                self.select_offset(1);
                true
            }
            KeyCode::Home => {
                self.select(0, self.selected_column);
                true
            }
            KeyCode::End => {
                if let Some(last) = self.tree.len().checked_sub(1) {
                    self.select(last, self.selected_column);
                }
                true
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.prev();
                true
            }
            KeyCode::Right => {
                self.selected_column = self.selected_column.next();
                true
            }
            KeyCode::Enter | KeyCode::F(2) | KeyCode::Char(' ') => {
                let Some(row) = self.selected else {
                    return false;
                };
                if self.selected_column == TreeColumn::Buttons {
                    if let Some(button) = self.tree.row(row).and_then(|r| r.first_enabled_button())
                    {
                        self.tree_button_pressed(row, button, MouseButton::Left);
                    }
                    true
                } else if key.code == KeyCode::Char(' ') {
                    false
                } else {
                    self.begin_edit(row, self.selected_column);
                    true
                }
            }
            KeyCode::Delete => {
                let Some(row) = self.selected else {
                    return false;
                };
                let removable = self
                    .tree
                    .row(row)
                    .and_then(|r| r.button(ItemButton::Remove))
                    .is_some_and(|b| !b.disabled);
                if removable {
                    self.tree_button_pressed(row, ItemButton::Remove, MouseButton::Left);
                }
                true
            }
            _ => false,
        }
    }

    fn select_offset(&mut self, delta: isize) {
        if self.tree.is_empty() {
            return;
        }
        let last = self.tree.len() - 1;
        let next = match self.selected {
            None => 0,
            Some(current) => current.saturating_add_signed(delta).min(last),
        };
        self.select(next, self.selected_column);
    }

    fn dispatch_mouse(&mut self, event: MouseEvent, layout: &FileSystemMapLayout) -> bool {
        let position = (event.column, event.row);

        if self.message.is_open() {
            if let MouseEventKind::Down(MouseButton::Left) = event.kind {
                if layout.hit_test(event.column, event.row) == Some(FileSystemMapHit::DialogOk) {
                    self.message.dismiss();
                }
            }
            return true;
        }

        match event.kind {
            MouseEventKind::Down(button) => {
                let hit = layout.hit_test(event.column, event.row);
                self.press = None;

                if let Some((row, column)) = self.editing.as_ref().map(|e| (e.row, e.column)) {
                    if hit == Some(FileSystemMapHit::RowCell(row, column)) {
                        return true;
                    }
                    self.commit_edit();
                }

                let Some(hit) = hit else {
                    return false;
                };
                if button != MouseButton::Left {
                    if let FileSystemMapHit::RowButton(row, item_button) = hit {
                        self.tree_button_pressed(row, item_button, button);
                    }
                    return true;
                }
                self.handle_left_press(hit, event, layout);
                true
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.drag.is_none() {
                    let Some(press) = self.press else {
                        return false;
                    };
                    if press.position == position || !self.begin_drag(position) {
                        return false;
                    }
                }
                self.update_drag(layout.row_at(event.row), position);
                true
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.release_buttons(event, layout) {
                    return true;
                }
                let press = self.press.take();

                if self.drag.is_some() {
                    self.finish_drag();
                    return true;
                }

                let Some(press) = press else {
                    return false;
                };
                let hit = layout.hit_test(event.column, event.row);
                if press.was_selected && hit == Some(FileSystemMapHit::RowCell(press.row, press.column)) {
                    self.begin_edit(press.row, press.column);
                }
                true
            }
            MouseEventKind::Moved => self.hover_controls(event, layout),
            _ => false,
        }
    }

    /// Finish a click on the add or clear button. Returns true if either
    /// button was armed.
    fn release_buttons(&mut self, event: MouseEvent, layout: &FileSystemMapLayout) -> bool {
        let add_armed = self.add_button.pressed;
        if self.add_button.handle_mouse(event, &layout.add_button) == Some(ButtonEvent::Clicked) {
            self.add_file_system_pressed();
        }

        let clear_armed = self.clear_button.pressed;
        if let Some(clear_layout) = layout.clear_button.as_ref() {
            if self.clear_button.handle_mouse(event, clear_layout) == Some(ButtonEvent::Clicked)
                && !self.external_search
            {
                self.search.clear();
            }
        } else {
            self.clear_button.pressed = false;
        }

        add_armed || clear_armed
    }

    fn hover_controls(&mut self, event: MouseEvent, layout: &FileSystemMapLayout) -> bool {
        let mut changed = self.add_button.handle_mouse(event, &layout.add_button).is_some();
        if let Some(clear_layout) = layout.clear_button.as_ref() {
            changed |= self.clear_button.handle_mouse(event, clear_layout).is_some();
        }
        changed |= self.builtin_toggle.handle_mouse(event, &layout.toggle).is_some();
        changed
    }

    fn handle_left_press(
        &mut self,
        hit: FileSystemMapHit,
        event: MouseEvent,
        layout: &FileSystemMapLayout,
    ) {
        let position = (event.column, event.row);
        match hit {
            FileSystemMapHit::SearchField => self.set_focus(FocusArea::Search),
            FileSystemMapHit::ClearAll => {
                if let Some(clear_layout) = layout.clear_button.as_ref() {
                    self.clear_button.handle_mouse(event, clear_layout);
                }
            }
            FileSystemMapHit::AddField => self.set_focus(FocusArea::AddField),
            // Armed here, fires on release; a disabled button stays unarmed
            FileSystemMapHit::AddButton => {
                self.add_button.handle_mouse(event, &layout.add_button);
            }
            FileSystemMapHit::BuiltinToggle => {
                self.set_focus(FocusArea::BuiltinToggle);
                let toggled = self.builtin_toggle.handle_mouse(event, &layout.toggle);
                if let Some(ToggleEvent::Toggled(_)) = toggled {
                    self.show_builtins_changed();
                }
            }
            FileSystemMapHit::RowCell(row, column) => {
                let was_selected = self.selected == Some(row) && self.selected_column == column;
                self.set_focus(FocusArea::Tree);
                self.select(row, column);
                self.press = Some(PressState {
                    row,
                    column,
                    was_selected,
                    position,
                });
            }
            FileSystemMapHit::RowButton(row, button) => {
                self.set_focus(FocusArea::Tree);
                self.select(row, TreeColumn::Buttons);
                let enabled = self
                    .tree
                    .row(row)
                    .and_then(|r| r.button(button))
                    .is_some_and(|b| !b.disabled);
                if enabled {
                    self.tree_button_pressed(row, button, MouseButton::Left);
                }
            }
            FileSystemMapHit::DialogOk => {}
        }
    }
}
