//! View and UI layer
//!
//! This module contains all presentation and rendering components.

pub mod controls;
pub mod file_system_map;
pub mod message_dialog;
