//! Drag-and-drop reordering
//!
//! Dragging a row never reorders the cache. A valid drop only emits a
//! `Reordered` event; the new order arrives with the owner's next snapshot.
//!
//! Terminal rows are a single cell high, so there is no upper/lower half to
//! aim at. The drop section comes from the drag direction instead: dropping
//! on a row above the source lands above it, on a row below lands below it.

use super::tree::{RowKind, TreeRow};
use super::FileSystemMapState;
use crate::model::event::FileSystemMapEvent;

/// What kind of row is being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    FileSystem,
    Event,
}

/// Data carried by a drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragData {
    pub payload: DragPayload,
    /// Label drawn under the mouse while dragging
    pub preview: String,
}

/// Where a dragged row lands relative to the target row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropSection {
    Above,
    Below,
}

/// An in-progress mouse drag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub data: DragData,
    /// Row index the drag started from
    pub source: usize,
    /// Row index currently under the mouse
    pub hover: Option<usize>,
    /// Current mouse position (column, row)
    pub position: (u16, u16),
}

impl DragState {
    /// Hovered row and section, unless hovering the source itself
    pub fn drop_target(&self) -> Option<(usize, DropSection)> {
        self.hover
            .filter(|&target| target != self.source)
            .map(|target| (target, drop_section(self.source, target)))
    }
}

/// Drop acceptance rules.
///
/// Rejects when nothing is selected or hovered, or when hovering the selected
/// row. A file system cannot land among event rows, and an event cannot move
/// to a different parent.
pub fn can_drop(payload: DragPayload, selected: Option<&TreeRow>, target: Option<&TreeRow>) -> bool {
    let (Some(selected), Some(target)) = (selected, target) else {
        return false;
    };

    if selected.id == target.id {
        return false;
    }

    match payload {
        DragPayload::FileSystem => target.kind != RowKind::Event,
        DragPayload::Event => target.parent == selected.parent,
    }
}

/// Section implied by dragging from `source` onto `target`
pub fn drop_section(source: usize, target: usize) -> DropSection {
    if target < source {
        DropSection::Above
    } else {
        DropSection::Below
    }
}

impl FileSystemMapState {
    /// Start dragging the selected row
    pub fn get_drag_data(&self) -> Option<DragData> {
        let row = self.selected_row()?;
        let payload = match row.kind {
            RowKind::FileSystem => DragPayload::FileSystem,
            RowKind::Event => DragPayload::Event,
        };
        Some(DragData {
            payload,
            preview: row.name_text.clone(),
        })
    }

    /// Whether `data` may be dropped on the row at `target`
    pub fn can_drop_data(&self, data: &DragData, target: Option<usize>) -> bool {
        can_drop(
            data.payload,
            self.selected_row(),
            target.and_then(|index| self.tree.row(index)),
        )
    }

    /// Drop `data` on the row at `target`
    pub fn drop_data(&mut self, data: &DragData, target: Option<usize>, section: DropSection) {
        if !self.can_drop_data(data, target) {
            return;
        }
        let (Some(target), Some(selected)) = (target, self.selected) else {
            return;
        };

        if data.payload != DragPayload::FileSystem {
            return;
        }

        let (Some(relative_to), Some(moved)) =
            (self.tree.meta_at(target), self.tree.meta_at(selected))
        else {
            return;
        };

        let event = FileSystemMapEvent::Reordered {
            name: moved.name.clone(),
            relative_to: relative_to.name.clone(),
            before: section == DropSection::Above,
        };
        self.events.emit(event);
    }

    /// Keyboard reordering: move the selected row past its neighbour
    pub fn move_selected(&mut self, up: bool) {
        let Some(selected) = self.selected else {
            return;
        };
        let target = if up {
            selected.checked_sub(1)
        } else {
            Some(selected + 1)
        };
        let Some(data) = self.get_drag_data() else {
            return;
        };
        let section = if up {
            DropSection::Above
        } else {
            DropSection::Below
        };
        self.drop_data(&data, target, section);
    }

    pub(super) fn begin_drag(&mut self, position: (u16, u16)) -> bool {
        let Some(source) = self.selected else {
            return false;
        };
        let Some(data) = self.get_drag_data() else {
            return false;
        };
        tracing::trace!(source, preview = %data.preview, "drag started");
        self.drag = Some(DragState {
            data,
            source,
            hover: None,
            position,
        });
        true
    }

    pub(super) fn update_drag(&mut self, hover: Option<usize>, position: (u16, u16)) {
        if let Some(drag) = self.drag.as_mut() {
            drag.hover = hover;
            drag.position = position;
        }
    }

    /// Drop at the current hover position, if accepted
    pub(super) fn finish_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        let Some((target, section)) = drag.drop_target() else {
            return;
        };
        self.drop_data(&drag.data, Some(target), section);
    }
}
