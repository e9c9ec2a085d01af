// Library module for storage-tui
// Re-exports modules for use in integration tests and the binary

pub mod app;
pub mod catalog;
pub mod config;
pub mod content;
pub mod details;
pub mod display;
pub mod events;
pub mod focus;
pub mod logging;
pub mod preview;
pub mod tree;
pub mod ui;
