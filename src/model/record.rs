//! File system records - the cached entries backing the map editor rows

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration dictionary of a file system.
///
/// Opaque to the editor except for the [`PATH_KEY`] entry, which is shown
/// and edited in the second column.
pub type FileSystemConfig = Map<String, Value>;

/// Key of the path entry inside a [`FileSystemConfig`]
pub const PATH_KEY: &str = "path";

/// A named file system entry as pushed by the owner of the mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FileSystemRecord {
    /// Unique name of the entry
    pub name: String,

    /// Configuration dictionary (conventionally contains "path")
    #[serde(default)]
    pub config: FileSystemConfig,

    /// False for built-in entries, which cannot be renamed or removed
    #[serde(default = "default_true")]
    pub editable: bool,

    /// Configuration the entry shipped with, used by the revert button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<FileSystemConfig>,
}

fn default_true() -> bool {
    true
}

impl FileSystemRecord {
    /// Create an editable record
    pub fn new(name: impl Into<String>, config: FileSystemConfig) -> Self {
        Self {
            name: name.into(),
            config,
            editable: true,
            initial: None,
        }
    }

    /// Create an editable record whose config only holds a path
    pub fn with_path(name: impl Into<String>, path: &str) -> Self {
        Self::new(name, path_config(path))
    }

    /// Create a built-in (non-editable) record
    pub fn builtin(name: impl Into<String>, config: FileSystemConfig) -> Self {
        Self {
            editable: false,
            ..Self::new(name, config)
        }
    }

    /// Attach the initial configuration, enabling revert
    pub fn with_initial(mut self, initial: FileSystemConfig) -> Self {
        self.initial = Some(initial);
        self
    }

    /// The raw path value, if any
    pub fn path(&self) -> Option<&Value> {
        self.config.get(PATH_KEY)
    }
}

/// Build a config containing only a path entry
pub fn path_config(path: &str) -> FileSystemConfig {
    let mut config = Map::new();
    config.insert(PATH_KEY.to_string(), Value::String(path.to_string()));
    config
}

/// Text shown in the path column for a config.
///
/// Strings are shown verbatim, a missing entry as empty text, anything else
/// in its JSON form.
pub fn path_display(config: &FileSystemConfig) -> String {
    match config.get(PATH_KEY) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
