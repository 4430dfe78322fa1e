//! In-memory owner of the file system mapping
//!
//! Applies the editor's intent events to an ordered list of records. The
//! editor never sees this list directly; it receives a copy after each
//! change.

use std::fmt;

use crate::model::event::FileSystemMapEvent;
use crate::model::name::{validate_name, NameError};
use crate::model::record::{path_config, FileSystemConfig, FileSystemRecord};

/// Why an event could not be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    InvalidName(NameError),
    NotFound(String),
    /// Built-in entries cannot be renamed or removed
    BuiltIn(String),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidName(e) => write!(f, "{e}"),
            MapError::NotFound(name) => write!(f, "No file system named '{name}'."),
            MapError::BuiltIn(name) => {
                write!(f, "The built-in file system '{name}' cannot be changed this way.")
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::InvalidName(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NameError> for MapError {
    fn from(e: NameError) -> Self {
        MapError::InvalidName(e)
    }
}

/// Ordered file system records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapStore {
    records: Vec<FileSystemRecord>,
}

impl MapStore {
    /// Take ownership of `records`.
    ///
    /// Records without an initial config remember the one they were loaded
    /// with, so the editor can offer to revert later edits.
    pub fn new(records: Vec<FileSystemRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|mut record| {
                if record.initial.is_none() {
                    record.initial = Some(record.config.clone());
                }
                record
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[FileSystemRecord] {
        &self.records
    }

    /// Copy of the records, for the editor
    pub fn snapshot(&self) -> Vec<FileSystemRecord> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FileSystemRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    fn position(&self, name: &str) -> Result<usize, MapError> {
        self.records
            .iter()
            .position(|record| record.name == name)
            .ok_or_else(|| MapError::NotFound(name.to_string()))
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.name.as_str())
    }

    /// Apply one event. Returns whether the records changed.
    pub fn apply(&mut self, event: &FileSystemMapEvent) -> Result<bool, MapError> {
        match event {
            FileSystemMapEvent::Added { name } => self.add(name),
            FileSystemMapEvent::Edited { name, config } => self.edit(name, config),
            FileSystemMapEvent::Removed { name } => self.remove(name),
            FileSystemMapEvent::Renamed { old_name, new_name } => self.rename(old_name, new_name),
            FileSystemMapEvent::Reordered {
                name,
                relative_to,
                before,
            } => self.reorder(name, relative_to, *before),
            FileSystemMapEvent::FilterFocused | FileSystemMapEvent::FilterUnfocused => Ok(false),
        }
    }

    fn add(&mut self, name: &str) -> Result<bool, MapError> {
        validate_name(name, self.names())?;
        self.records.push(FileSystemRecord::new(name, path_config("")));
        Ok(true)
    }

    fn edit(&mut self, name: &str, config: &FileSystemConfig) -> Result<bool, MapError> {
        let index = self.position(name)?;
        let record = &mut self.records[index];
        if &record.config == config {
            return Ok(false);
        }
        record.config = config.clone();
        Ok(true)
    }

    fn remove(&mut self, name: &str) -> Result<bool, MapError> {
        let index = self.position(name)?;
        if !self.records[index].editable {
            return Err(MapError::BuiltIn(name.to_string()));
        }
        self.records.remove(index);
        Ok(true)
    }

    fn rename(&mut self, old_name: &str, new_name: &str) -> Result<bool, MapError> {
        let index = self.position(old_name)?;
        if old_name == new_name {
            return Ok(false);
        }
        if !self.records[index].editable {
            return Err(MapError::BuiltIn(old_name.to_string()));
        }
        validate_name(new_name, self.names())?;
        self.records[index].name = new_name.to_string();
        Ok(true)
    }

    fn reorder(&mut self, name: &str, relative_to: &str, before: bool) -> Result<bool, MapError> {
        let from = self.position(name)?;
        self.position(relative_to)?;
        if name == relative_to {
            return Ok(false);
        }

        let record = self.records.remove(from);
        let anchor = self.position(relative_to)?;
        let to = if before { anchor } else { anchor + 1 };
        self.records.insert(to, record);
        Ok(to != from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(names: &[&str]) -> MapStore {
        MapStore::new(
            names
                .iter()
                .map(|name| FileSystemRecord::with_path(*name, "/"))
                .collect(),
        )
    }

    fn names(store: &MapStore) -> Vec<&str> {
        store.records().iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_new_remembers_initial_config() {
        let store = MapStore::new(vec![
            FileSystemRecord::with_path("a", "/a"),
            FileSystemRecord::with_path("b", "/b").with_initial(path_config("/orig")),
        ]);
        assert_eq!(store.get("a").unwrap().initial, Some(path_config("/a")));
        assert_eq!(store.get("b").unwrap().initial, Some(path_config("/orig")));
    }

    #[test]
    fn test_add_appends_with_empty_path() {
        let mut store = store(&["a"]);
        let changed = store
            .apply(&FileSystemMapEvent::Added {
                name: "b".to_string(),
            })
            .unwrap();

        assert!(changed);
        assert_eq!(names(&store), vec!["a", "b"]);
        assert_eq!(store.get("b").unwrap().config, path_config(""));
        assert_eq!(store.get("b").unwrap().initial, None);

        let err = store
            .apply(&FileSystemMapEvent::Added {
                name: "a".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, MapError::InvalidName(NameError::Duplicate("a".to_string())));
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut store = store(&["a", "b", "c"]);
        store
            .apply(&FileSystemMapEvent::Renamed {
                old_name: "b".to_string(),
                new_name: "x".to_string(),
            })
            .unwrap();
        assert_eq!(names(&store), vec!["a", "x", "c"]);
    }

    #[test]
    fn test_builtins_cannot_be_removed_or_renamed() {
        let mut store = MapStore::new(vec![FileSystemRecord::builtin("default", path_config("/"))]);

        let removed = store.apply(&FileSystemMapEvent::Removed {
            name: "default".to_string(),
        });
        assert_eq!(removed, Err(MapError::BuiltIn("default".to_string())));

        let renamed = store.apply(&FileSystemMapEvent::Renamed {
            old_name: "default".to_string(),
            new_name: "other".to_string(),
        });
        assert_eq!(renamed, Err(MapError::BuiltIn("default".to_string())));

        // The path of a built-in stays editable
        let edited = store.apply(&FileSystemMapEvent::Edited {
            name: "default".to_string(),
            config: path_config("/srv"),
        });
        assert_eq!(edited, Ok(true));
    }

    #[test]
    fn test_edit_reports_unchanged_config() {
        let mut store = store(&["a"]);
        let event = FileSystemMapEvent::Edited {
            name: "a".to_string(),
            config: path_config("/"),
        };
        assert_eq!(store.apply(&event), Ok(false));

        let missing = FileSystemMapEvent::Edited {
            name: "zz".to_string(),
            config: path_config("/"),
        };
        assert_eq!(store.apply(&missing), Err(MapError::NotFound("zz".to_string())));
    }

    #[test]
    fn test_reorder() {
        let mut store = store(&["a", "b", "c", "d"]);

        let reorder = |name: &str, relative_to: &str, before: bool| FileSystemMapEvent::Reordered {
            name: name.to_string(),
            relative_to: relative_to.to_string(),
            before,
        };

        assert_eq!(store.apply(&reorder("d", "a", true)), Ok(true));
        assert_eq!(names(&store), vec!["d", "a", "b", "c"]);

        assert_eq!(store.apply(&reorder("d", "b", false)), Ok(true));
        assert_eq!(names(&store), vec!["a", "b", "d", "c"]);

        // Already in place
        assert_eq!(store.apply(&reorder("d", "c", true)), Ok(false));
        assert_eq!(store.apply(&reorder("a", "a", true)), Ok(false));
        assert_eq!(
            store.apply(&reorder("a", "zz", true)),
            Err(MapError::NotFound("zz".to_string()))
        );
    }

    #[test]
    fn test_filter_events_are_ignored() {
        let mut store = store(&["a"]);
        assert_eq!(store.apply(&FileSystemMapEvent::FilterFocused), Ok(false));
        assert_eq!(store.apply(&FileSystemMapEvent::FilterUnfocused), Ok(false));
    }
}
