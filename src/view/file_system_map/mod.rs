//! File system map editor
//!
//! Renders as a filter row, an add row and a three-column tree:
//! ```text
//! [Filter by name...                     ] [ Clear All ]
//! [Add new file system   ] [ Add ] Show built-in file systems: [ ]
//!  Invalid file system name. It cannot be empty nor contain ...
//!  File System              Path
//!  user                     /data                          [x]
//!  assets                   /assets                     [r][x]
//! ```
//!
//! The editor only keeps a display cache of the mapping. Every change the
//! user asks for is validated (names only) and turned into a
//! [`FileSystemMapEvent`]; the owner applies it and pushes a new snapshot
//! with [`FileSystemMapState::update_file_system_list`].
//!
//! This module provides:
//! - State management and owner-facing operations (`FileSystemMapState`)
//! - Rendering (`render_file_system_map`)
//! - Input handling (`FileSystemMapState::handle_key`, `handle_mouse`)
//! - Drag-and-drop reordering (`drag`)
//! - Layout/hit testing (`FileSystemMapLayout`)

mod drag;
mod input;
mod render;
mod search;
mod tree;

use crossterm::event::MouseButton;
use ratatui::layout::Rect;
use ratatui::style::Color;
use serde_json::Value;

pub use drag::{can_drop, drop_section, DragData, DragPayload, DragState, DropSection};
pub use render::render_file_system_map;
pub use search::SearchBox;
pub use tree::{
    FileSystemTree, ItemButton, RowButton, RowId, RowKind, RowMeta, TreeColumn, TreeRow,
};

use crate::model::event::{EventQueue, FileSystemMapEvent};
use crate::model::name::validate_name;
use crate::model::record::{path_display, FileSystemRecord, PATH_KEY};
use crate::model::check_new_name;
use crate::view::controls::{
    ButtonColors, ButtonLayout, ButtonState, FocusState, TextInputColors, TextInputState,
    ToggleColors, ToggleLayout, ToggleState,
};
use crate::view::message_dialog::{MessageDialogColors, MessageDialogState};

use input::PressState;

/// Which part of the editor has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    Search,
    AddField,
    BuiltinToggle,
    Tree,
}

/// An inline edit of a tree cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellEdit {
    pub row: usize,
    pub column: TreeColumn,
    pub input: TextInputState,
}

/// State for the file system map editor
#[derive(Debug)]
pub struct FileSystemMapState {
    /// Display cache, in authoritative order
    cache: Vec<FileSystemRecord>,
    tree: FileSystemTree,
    builtin_toggle: ToggleState,

    add_input: TextInputState,
    add_button: ButtonState,
    /// Why the add action is disabled; empty when enabled
    add_tooltip: String,

    search: SearchBox,
    clear_button: ButtonState,
    external_search: bool,
    seen_search_revision: u64,

    message: MessageDialogState,

    focus: FocusArea,
    selected: Option<usize>,
    selected_column: TreeColumn,
    editing: Option<CellEdit>,
    drag: Option<DragState>,
    press: Option<PressState>,

    events: EventQueue,
}

impl Default for FileSystemMapState {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemMapState {
    /// Create an empty editor
    pub fn new() -> Self {
        let mut state = Self {
            cache: Vec::new(),
            tree: FileSystemTree::new(),
            builtin_toggle: ToggleState::new(false, "Show built-in file systems"),
            add_input: TextInputState::new("Add new file system").with_focus(FocusState::Focused),
            add_button: ButtonState::new("Add"),
            add_tooltip: String::new(),
            search: SearchBox::new("Filter by name..."),
            clear_button: ButtonState::new("Clear All"),
            external_search: false,
            seen_search_revision: 0,
            message: MessageDialogState::default(),
            focus: FocusArea::AddField,
            selected: None,
            selected_column: TreeColumn::Name,
            editing: None,
            drag: None,
            press: None,
            events: EventQueue::new(),
        };
        // Disable the add action until a valid name is typed
        state.add_edit_text_changed();
        state
    }

    // ===== Owner-facing operations =====

    /// Replace the cache with `records` and rebuild the tree.
    ///
    /// An empty list means "redraw from the current cache"; use
    /// [`clear_file_system_list`](Self::clear_file_system_list) to empty it.
    pub fn update_file_system_list(&mut self, records: Vec<FileSystemRecord>) {
        if !records.is_empty() {
            self.cache = records;
        }
        self.rebuild();
        self.add_edit_text_changed();
    }

    /// Empty the cache and the tree
    pub fn clear_file_system_list(&mut self) {
        self.cache.clear();
        self.rebuild();
        self.add_edit_text_changed();
    }

    /// Show or hide built-in entries
    pub fn set_show_builtins(&mut self, show: bool) {
        self.builtin_toggle.checked = show;
        self.show_builtins_changed();
    }

    fn show_builtins_changed(&mut self) {
        tracing::debug!(show = self.builtin_toggle.checked, "show built-ins changed");

        // Nothing to redraw before the first snapshot
        if !self.cache.is_empty() {
            self.rebuild();
        }
    }

    /// Open the message dialog
    pub fn show_message(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!("show message: {}", text);
        self.message.show(text);
    }

    pub fn dismiss_message(&mut self) {
        self.message.dismiss();
    }

    /// Replace the internal search field with one supplied by the owner.
    ///
    /// The editor stops drawing its own search row and rebuilds whenever the
    /// supplied field's value changes.
    pub fn use_external_search_box(&mut self, search: SearchBox) {
        if self.focus == FocusArea::Search {
            self.set_focus(FocusArea::AddField);
        }
        self.seen_search_revision = search.revision();
        self.search = search;
        self.external_search = true;
    }

    /// Handle to the search field in use
    pub fn search_box(&self) -> SearchBox {
        self.search.clone()
    }

    pub fn uses_external_search_box(&self) -> bool {
        self.external_search
    }

    /// Rebuild if the search text changed since the last check
    pub fn sync_search_box(&mut self) -> bool {
        let revision = self.search.revision();
        if revision == self.seen_search_revision {
            return false;
        }
        self.seen_search_revision = revision;
        self.search_term_updated();
        true
    }

    /// Events delivered so far, without consuming them
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// End the current cycle and take every pending event
    pub fn take_events(&mut self) -> Vec<FileSystemMapEvent> {
        self.events.drain()
    }

    /// Deliver events deferred during the current dispatch
    pub fn finish_dispatch(&mut self) {
        let delivered = self.events.finish_dispatch();
        if delivered > 0 {
            tracing::trace!(delivered, "delivered deferred events");
        }
    }

    // ===== Accessors =====

    pub fn cache(&self) -> &[FileSystemRecord] {
        &self.cache
    }

    pub fn tree(&self) -> &FileSystemTree {
        &self.tree
    }

    pub fn show_builtins(&self) -> bool {
        self.builtin_toggle.checked
    }

    pub fn builtin_toggle(&self) -> &ToggleState {
        &self.builtin_toggle
    }

    pub fn add_input(&self) -> &TextInputState {
        &self.add_input
    }

    pub fn add_button(&self) -> &ButtonState {
        &self.add_button
    }

    pub fn add_button_enabled(&self) -> bool {
        self.add_button.is_enabled()
    }

    /// Why the add action is disabled, or an empty string
    pub fn add_button_tooltip(&self) -> &str {
        &self.add_tooltip
    }

    pub fn message(&self) -> &MessageDialogState {
        &self.message
    }

    pub fn focus(&self) -> FocusArea {
        self.focus
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_column(&self) -> TreeColumn {
        self.selected_column
    }

    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.selected.and_then(|index| self.tree.row(index))
    }

    pub fn editing(&self) -> Option<&CellEdit> {
        self.editing.as_ref()
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Whether a cached record (visible or not) uses `name`
    pub fn has_file_system(&self, name: &str) -> bool {
        self.cache.iter().any(|record| record.name == name)
    }

    fn cache_names(&self) -> impl Iterator<Item = &str> {
        self.cache.iter().map(|record| record.name.as_str())
    }

    // ===== Tree reconciliation =====

    fn rebuild(&mut self) {
        self.tree.rebuild(&self.cache, self.builtin_toggle.checked);

        self.selected = match self.selected {
            Some(_) if self.tree.is_empty() => None,
            Some(index) => Some(index.min(self.tree.len() - 1)),
            None => None,
        };
        self.editing = None;
        self.drag = None;
        self.press = None;
    }

    fn search_term_updated(&mut self) {
        // The search text is not applied as a filter; only the built-in
        // toggle decides which records are shown.
        tracing::debug!(search = %self.search.text(), "search term updated");
        self.rebuild();
    }

    // ===== Focus =====

    /// Move keyboard focus, emitting filter focus events as needed
    pub fn set_focus(&mut self, area: FocusArea) {
        if area == self.focus || (area == FocusArea::Search && self.external_search) {
            return;
        }
        if self.editing.is_some() {
            self.commit_edit();
        }

        let left_search = self.focus == FocusArea::Search;
        self.focus = area;

        if !self.external_search {
            self.search.set_focus(if area == FocusArea::Search {
                FocusState::Focused
            } else {
                FocusState::Normal
            });
        }
        self.add_input.focus = if area == FocusArea::AddField {
            FocusState::Focused
        } else {
            FocusState::Normal
        };
        self.builtin_toggle.focus = if area == FocusArea::BuiltinToggle {
            FocusState::Focused
        } else {
            FocusState::Normal
        };

        if left_search {
            self.events.emit(FileSystemMapEvent::FilterUnfocused);
        }
        if area == FocusArea::Search {
            self.events.emit(FileSystemMapEvent::FilterFocused);
        }

        if area == FocusArea::Tree && self.selected.is_none() && !self.tree.is_empty() {
            self.selected = Some(0);
        }
    }

    fn focus_order(&self) -> Vec<FocusArea> {
        let mut order = Vec::with_capacity(4);
        if !self.external_search {
            order.push(FocusArea::Search);
        }
        order.extend([FocusArea::AddField, FocusArea::BuiltinToggle, FocusArea::Tree]);
        order
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let current = order.iter().position(|&a| a == self.focus).unwrap_or(0);
        self.set_focus(order[(current + 1) % order.len()]);
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let current = order.iter().position(|&a| a == self.focus).unwrap_or(0);
        self.set_focus(order[(current + order.len() - 1) % order.len()]);
    }

    // ===== Add flow =====

    /// Replace the add field text, as if typed
    pub fn set_add_text(&mut self, text: &str) {
        self.add_input.set_value(text);
        self.add_edit_text_changed();
    }

    /// Re-validate the add field after every change
    pub fn add_edit_text_changed(&mut self) {
        self.add_tooltip = check_new_name(self.add_input.value(), self.cache_names());
        self.add_button.set_enabled(self.add_tooltip.is_empty());
    }

    /// The Add button was pressed
    pub fn add_file_system_pressed(&mut self) {
        let name = self.add_input.value().to_string();
        self.add_file_system(&name);
    }

    /// Request a new entry named `name`
    pub fn add_file_system(&mut self, name: &str) {
        if let Err(e) = validate_name(name, self.cache_names()) {
            self.show_message(e.to_string());
            return;
        }

        self.add_input.clear();
        self.add_edit_text_changed();
        self.events.emit(FileSystemMapEvent::Added {
            name: name.to_string(),
        });
    }

    // ===== Selection and inline editing =====

    /// Select a row and column
    pub fn select(&mut self, row: usize, column: TreeColumn) {
        if row < self.tree.len() {
            self.selected = Some(row);
            self.selected_column = column;
        }
    }

    /// Open an inline editor on a cell. Returns false if it is not editable.
    pub fn begin_edit(&mut self, row: usize, column: TreeColumn) -> bool {
        let Some(item) = self.tree.row(row) else {
            return false;
        };
        if !item.is_editable(column) {
            return false;
        }

        let input = TextInputState::new("")
            .with_value(item.cell_text(column))
            .with_focus(FocusState::Focused);
        self.select(row, column);
        self.editing = Some(CellEdit { row, column, input });
        true
    }

    /// Write the inline editor's text into its cell and handle the edit
    pub fn commit_edit(&mut self) {
        let Some(edit) = self.editing.take() else {
            return;
        };
        if let Some(item) = self.tree.row_mut(edit.row) {
            item.set_cell_text(edit.column, edit.input.value());
        }
        self.item_edited(edit.row, edit.column);
    }

    /// Close the inline editor, leaving the cell untouched
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // ===== Edit handling =====

    /// A cell of `row` was edited in place
    pub fn item_edited(&mut self, row: usize, column: TreeColumn) {
        let Some(item) = self.tree.row(row) else {
            return;
        };
        let Some(meta) = self.tree.meta(item.id) else {
            return;
        };

        match column {
            TreeColumn::Name => {
                let new_name = item.name_text.clone();
                let old_name = meta.name.clone();

                if new_name == old_name {
                    return;
                }

                if let Err(e) = validate_name(&new_name, self.cache_names()) {
                    if let Some(item) = self.tree.row_mut(row) {
                        item.name_text = old_name;
                    }
                    self.show_message(e.to_string());
                    return;
                }

                self.events
                    .emit(FileSystemMapEvent::Renamed { old_name, new_name });
            }
            TreeColumn::Path => {
                // Opening and closing the editor must not turn a non-string
                // path into a string
                if item.path_text == path_display(&meta.config) {
                    return;
                }

                let mut config = meta.config.clone();
                config.insert(PATH_KEY.to_string(), Value::String(item.path_text.clone()));
                let name = meta.name.clone();

                // Delivered after the dispatch so the owner's refresh cannot
                // rebuild the tree while this edit is still being handled
                self.events
                    .defer(FileSystemMapEvent::Edited { name, config });
            }
            TreeColumn::Buttons => {}
        }
    }

    /// A button in the third column was clicked
    pub fn tree_button_pressed(&mut self, row: usize, button: ItemButton, mouse: MouseButton) {
        if mouse != MouseButton::Left {
            return;
        }
        let Some(meta) = self.tree.meta_at(row) else {
            return;
        };

        match button {
            ItemButton::Remove => {
                let name = meta.name.clone();
                self.events.emit(FileSystemMapEvent::Removed { name });
            }
            ItemButton::Revert => {
                let Some(initial) = meta.initial.clone() else {
                    tracing::error!(
                        "row for file system '{}' offers revert without an initial config",
                        meta.name
                    );
                    return;
                };
                let name = meta.name.clone();
                self.events.emit(FileSystemMapEvent::Edited {
                    name,
                    config: initial,
                });
            }
        }
    }
}

/// Colors for the file system map editor
#[derive(Debug, Clone, Copy)]
pub struct FileSystemMapColors {
    pub input: TextInputColors,
    pub button: ButtonColors,
    pub toggle: ToggleColors,
    pub dialog: MessageDialogColors,
    /// Column header color
    pub header: Color,
    /// Row text color
    pub text: Color,
    /// Read-only and disabled elements
    pub disabled: Color,
    /// Selected row background
    pub selected_bg: Color,
    /// Selected cell background while the tree has focus
    pub focused_cell_bg: Color,
    /// Revert button color
    pub revert_button: Color,
    /// Remove button color
    pub remove_button: Color,
    /// Validation hint color
    pub error: Color,
    /// Drop target marker color
    pub drop_target: Color,
}

impl Default for FileSystemMapColors {
    fn default() -> Self {
        Self {
            input: TextInputColors::default(),
            button: ButtonColors::default(),
            toggle: ToggleColors::default(),
            dialog: MessageDialogColors::default(),
            header: Color::Gray,
            text: Color::White,
            disabled: Color::DarkGray,
            selected_bg: Color::Rgb(40, 40, 60),
            focused_cell_bg: Color::Rgb(50, 70, 110),
            revert_button: Color::Green,
            remove_button: Color::Red,
            error: Color::LightRed,
            drop_target: Color::Yellow,
        }
    }
}

/// Hit areas of one tree row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRowLayout {
    /// Row index in the tree
    pub index: usize,
    /// The whole row
    pub area: Rect,
    pub name_area: Rect,
    pub path_area: Rect,
    pub buttons: Vec<(ItemButton, Rect)>,
}

/// Layout information returned after rendering for hit testing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSystemMapLayout {
    pub full_area: Rect,
    pub search_area: Option<Rect>,
    pub clear_button: Option<ButtonLayout>,
    pub add_field_area: Rect,
    pub add_button: ButtonLayout,
    pub toggle: ToggleLayout,
    pub tree_area: Rect,
    pub rows: Vec<TreeRowLayout>,
    pub dialog_ok_area: Option<Rect>,
}

/// Result of hit testing on the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSystemMapHit {
    SearchField,
    ClearAll,
    AddField,
    AddButton,
    BuiltinToggle,
    RowCell(usize, TreeColumn),
    RowButton(usize, ItemButton),
    DialogOk,
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

impl FileSystemMapLayout {
    /// Find which component is at a screen position
    pub fn hit_test(&self, x: u16, y: u16) -> Option<FileSystemMapHit> {
        if let Some(ok) = self.dialog_ok_area {
            return contains(ok, x, y).then_some(FileSystemMapHit::DialogOk);
        }

        if self.search_area.is_some_and(|a| contains(a, x, y)) {
            return Some(FileSystemMapHit::SearchField);
        }
        if self.clear_button.is_some_and(|b| b.contains(x, y)) {
            return Some(FileSystemMapHit::ClearAll);
        }
        if contains(self.add_field_area, x, y) {
            return Some(FileSystemMapHit::AddField);
        }
        if self.add_button.contains(x, y) {
            return Some(FileSystemMapHit::AddButton);
        }
        if self.toggle.contains(x, y) {
            return Some(FileSystemMapHit::BuiltinToggle);
        }

        for row in &self.rows {
            if !contains(row.area, x, y) {
                continue;
            }
            for (button, area) in &row.buttons {
                if contains(*area, x, y) {
                    return Some(FileSystemMapHit::RowButton(row.index, *button));
                }
            }
            if contains(row.path_area, x, y) {
                return Some(FileSystemMapHit::RowCell(row.index, TreeColumn::Path));
            }
            if contains(row.name_area, x, y) {
                return Some(FileSystemMapHit::RowCell(row.index, TreeColumn::Name));
            }
            return Some(FileSystemMapHit::RowCell(row.index, TreeColumn::Buttons));
        }

        None
    }

    /// Tree row at screen row `y`, for drag hovering
    pub fn row_at(&self, y: u16) -> Option<usize> {
        self.rows
            .iter()
            .find(|row| y >= row.area.y && y < row.area.y + row.area.height)
            .map(|row| row.index)
    }
}
