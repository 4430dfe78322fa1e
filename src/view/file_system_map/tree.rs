//! Visual tree rows and their side table
//!
//! Rows are purely presentational and regenerated in full on every
//! rebuild. What a row stands for (record name, config, initial config)
//! lives in a side table keyed by [`RowId`], never in the row itself.

use std::collections::HashMap;

use crate::model::record::{path_display, FileSystemConfig, FileSystemRecord, PATH_KEY};

/// Identifier of a visual row, fresh for every rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u32);

/// What a row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    FileSystem,
    /// Nested event row. Never created by this view, but drag-and-drop
    /// rules are defined for it.
    Event,
}

/// Tree columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeColumn {
    #[default]
    Name,
    Path,
    Buttons,
}

impl TreeColumn {
    pub fn next(self) -> Self {
        match self {
            TreeColumn::Name => TreeColumn::Path,
            _ => TreeColumn::Buttons,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TreeColumn::Buttons => TreeColumn::Path,
            _ => TreeColumn::Name,
        }
    }
}

/// Buttons in the third column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemButton {
    Remove,
    Revert,
}

/// A button attached to a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowButton {
    pub kind: ItemButton,
    pub disabled: bool,
    pub tooltip: &'static str,
}

/// A visual row
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    pub id: RowId,
    pub kind: RowKind,
    pub parent: Option<RowId>,
    /// Displayed name (column 0). May differ from the record while a rename
    /// is waiting for the owner's refresh.
    pub name_text: String,
    pub name_editable: bool,
    /// Displayed path (column 1)
    pub path_text: String,
    pub path_editable: bool,
    pub buttons: Vec<RowButton>,
}

impl TreeRow {
    pub fn is_editable(&self, column: TreeColumn) -> bool {
        match column {
            TreeColumn::Name => self.name_editable,
            TreeColumn::Path => self.path_editable,
            TreeColumn::Buttons => false,
        }
    }

    pub fn cell_text(&self, column: TreeColumn) -> &str {
        match column {
            TreeColumn::Name => &self.name_text,
            TreeColumn::Path => &self.path_text,
            TreeColumn::Buttons => "",
        }
    }

    pub fn set_cell_text(&mut self, column: TreeColumn, text: &str) {
        match column {
            TreeColumn::Name => self.name_text = text.to_string(),
            TreeColumn::Path => self.path_text = text.to_string(),
            TreeColumn::Buttons => {}
        }
    }

    pub fn button(&self, kind: ItemButton) -> Option<&RowButton> {
        self.buttons.iter().find(|b| b.kind == kind)
    }

    /// First button that can be pressed
    pub fn first_enabled_button(&self) -> Option<ItemButton> {
        self.buttons.iter().find(|b| !b.disabled).map(|b| b.kind)
    }
}

/// Record identity attached to a row
#[derive(Debug, Clone, PartialEq)]
pub struct RowMeta {
    pub name: String,
    pub config: FileSystemConfig,
    pub initial: Option<FileSystemConfig>,
}

/// Visual rows plus the side table mapping them back to records
#[derive(Debug, Default)]
pub struct FileSystemTree {
    rows: Vec<TreeRow>,
    meta: HashMap<RowId, RowMeta>,
    next_id: u32,
}

impl FileSystemTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.meta.clear();
    }

    /// Regenerate every row from the cache
    pub fn rebuild(&mut self, cache: &[FileSystemRecord], show_builtins: bool) {
        self.clear();

        for record in cache {
            if !record.editable && !show_builtins {
                continue;
            }

            let id = self.alloc_id();
            self.rows.push(TreeRow {
                id,
                kind: RowKind::FileSystem,
                parent: None,
                name_text: record.name.clone(),
                name_editable: record.editable,
                path_text: path_display(&record.config),
                path_editable: true,
                buttons: row_buttons(record),
            });
            self.meta.insert(
                id,
                RowMeta {
                    name: record.name.clone(),
                    config: record.config.clone(),
                    initial: record.initial.clone(),
                },
            );
        }

        tracing::trace!(rows = self.rows.len(), cached = cache.len(), "rebuilt tree");
    }

    fn alloc_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&TreeRow> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut TreeRow> {
        self.rows.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn meta(&self, id: RowId) -> Option<&RowMeta> {
        self.meta.get(&id)
    }

    /// Side table entry of the row at `index`
    pub fn meta_at(&self, index: usize) -> Option<&RowMeta> {
        self.row(index).and_then(|row| self.meta(row.id))
    }

    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    /// Add an event row under `parent`, directly after its last child
    #[cfg(test)]
    pub(crate) fn insert_event_row(&mut self, parent: RowId, label: &str) -> Option<RowId> {
        let parent_index = self.index_of(parent)?;
        let insert_at = self.rows[parent_index + 1..]
            .iter()
            .take_while(|row| row.parent == Some(parent))
            .count()
            + parent_index
            + 1;
        let id = self.alloc_id();
        self.rows.insert(
            insert_at,
            TreeRow {
                id,
                kind: RowKind::Event,
                parent: Some(parent),
                name_text: label.to_string(),
                name_editable: false,
                path_text: String::new(),
                path_editable: false,
                buttons: Vec::new(),
            },
        );
        Some(id)
    }
}

fn row_buttons(record: &FileSystemRecord) -> Vec<RowButton> {
    let mut buttons = Vec::with_capacity(2);

    if let Some(initial) = &record.initial {
        let unchanged = initial.get(PATH_KEY) == record.config.get(PATH_KEY);
        buttons.push(RowButton {
            kind: ItemButton::Revert,
            disabled: unchanged,
            tooltip: if unchanged {
                "Cannot revert - file system is same as initial"
            } else {
                "Revert file system"
            },
        });
    }

    buttons.push(RowButton {
        kind: ItemButton::Remove,
        disabled: !record.editable,
        tooltip: if record.editable {
            "Remove file system"
        } else {
            "Cannot remove file system"
        },
    });

    buttons
}
