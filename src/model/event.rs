//! Map editor events - intent notifications sent to the owner of the mapping
//!
//! The editor never changes the mapping itself. Every user request becomes a
//! [`FileSystemMapEvent`] pushed onto an [`EventQueue`] that the owner drains
//! after each input dispatch, applies, and answers with a refreshed snapshot.
//!
//! Events emitted on the deferred lane are held back until the current
//! dispatch finishes, so an owner reacting to them never rebuilds the tree
//! while the edit that produced them is still being handled.

use serde::Serialize;
use std::collections::VecDeque;

use super::record::FileSystemConfig;

/// A mutation requested by the user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum FileSystemMapEvent {
    /// A new entry with this name should be created
    #[serde(rename = "file_system_added")]
    Added { name: String },
    /// The entry's configuration should be replaced
    #[serde(rename = "file_system_edited")]
    Edited {
        name: String,
        config: FileSystemConfig,
    },
    /// The entry should be removed
    #[serde(rename = "file_system_removed")]
    Removed { name: String },
    /// The entry should be renamed, keeping its position
    #[serde(rename = "file_system_renamed")]
    Renamed { old_name: String, new_name: String },
    /// `name` should move next to `relative_to` (before it when `before`)
    #[serde(rename = "file_system_reordered")]
    Reordered {
        name: String,
        relative_to: String,
        before: bool,
    },
    /// The search field gained focus
    FilterFocused,
    /// The search field lost focus
    FilterUnfocused,
}

impl FileSystemMapEvent {
    /// Stable signal name, as used in logs
    pub fn signal_name(&self) -> &'static str {
        match self {
            FileSystemMapEvent::Added { .. } => "file_system_added",
            FileSystemMapEvent::Edited { .. } => "file_system_edited",
            FileSystemMapEvent::Removed { .. } => "file_system_removed",
            FileSystemMapEvent::Renamed { .. } => "file_system_renamed",
            FileSystemMapEvent::Reordered { .. } => "file_system_reordered",
            FileSystemMapEvent::FilterFocused => "filter_focused",
            FileSystemMapEvent::FilterUnfocused => "filter_unfocused",
        }
    }
}

/// Outbound event queue with an end-of-dispatch lane
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<FileSystemMapEvent>,
    deferred: VecDeque<FileSystemMapEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an event immediately
    pub fn emit(&mut self, event: FileSystemMapEvent) {
        tracing::debug!(signal = event.signal_name(), "emit {:?}", event);
        self.pending.push_back(event);
    }

    /// Emit an event once the current dispatch finishes
    pub fn defer(&mut self, event: FileSystemMapEvent) {
        tracing::debug!(signal = event.signal_name(), "defer {:?}", event);
        self.deferred.push_back(event);
    }

    /// Deliver deferred events. Returns how many were moved.
    pub fn finish_dispatch(&mut self) -> usize {
        let count = self.deferred.len();
        self.pending.extend(self.deferred.drain(..));
        count
    }

    /// End the current cycle and take every delivered event
    pub fn drain(&mut self) -> Vec<FileSystemMapEvent> {
        self.finish_dispatch();
        self.pending.drain(..).collect()
    }

    /// Delivered events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &FileSystemMapEvent> {
        self.pending.iter()
    }

    /// Number of delivered events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of events waiting for the end of the dispatch
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }
}
