//! Core data model: records, name validation and outbound events

pub mod event;
pub mod name;
pub mod record;

pub use event::{EventQueue, FileSystemMapEvent};
pub use name::{check_new_name, is_valid_name_text, validate_name, NameError};
pub use record::{path_config, path_display, FileSystemConfig, FileSystemRecord, PATH_KEY};
