//! PixShelf Core Domain Logic
//!
//! This crate contains:
//! - Image collection view-model (sort, focus, pins)
//! - Viewer controller and keyboard commands
//! - Configuration and settings persistence
//! - Todo list
//! - Error types

pub mod sort;
pub mod navigation;
pub mod selection;
pub mod prefs;
pub mod collection;
pub mod settings;
pub mod config;
pub mod command;
pub mod todo;
pub mod error;
pub mod viewer;

pub use sort::{compare_names, sort_images, SortBy, SortConfig, SortDirection};
pub use navigation::{navigate, Direction, Focus, FocusDomain};
pub use selection::{PinOutcome, PinnedSet, MAX_PINNED};
pub use prefs::{ImagePosition, ViewPrefs};
pub use collection::ImageCollection;
pub use settings::{FileSettingsStore, MemorySettingsStore, SettingsError, SettingsStore};
pub use config::{AppConfig, FilerConfig, GeneralConfig, MonitorConfig, ViewerConfig};
pub use command::{Command, CommandId, Keymap};
pub use todo::{Todo, TodoList};
pub use error::AppError;
pub use viewer::{KeyEffect, Viewer};
