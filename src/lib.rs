// File system map editor library - exposes all core modules for testing

pub mod app;
pub mod config;
pub mod config_io;
pub mod model;
pub mod services;
pub mod view;
