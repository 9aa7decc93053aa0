//! Viewer controller
//!
//! Wires the [`ImageCollection`] view-model to its host collaborators: file
//! operations for scanning and deleting, and the settings store for the
//! preferences that survive restarts.

use crate::collection::ImageCollection;
use crate::command::{Command, CommandId, Keymap};
use crate::config::AppConfig;
use crate::prefs::{clamp_thumbnail_size, parse_thumbnail_size, ImagePosition, ViewPrefs};
use crate::selection::PinOutcome;
use crate::settings::{keys, SettingsStore};
use crate::sort::{SortBy, SortConfig};
use crate::AppError;
use app_fs::{ConfirmPrompt, DeleteOutcome, FileOperations, ImageEntry};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEffect {
    Navigated,
    Closed,
    /// Crop anchor changed; front-ends flash a short notice
    Position(ImagePosition),
    Ignored,
}

pub struct Viewer {
    collection: ImageCollection,
    prefs: ViewPrefs,
    keymap: Keymap,
    ops: Arc<dyn FileOperations>,
    settings: Arc<dyn SettingsStore>,
    remember_sort: bool,
    confirm_delete: bool,
}

impl Viewer {
    pub fn new(
        config: &AppConfig,
        ops: Arc<dyn FileOperations>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        let sort = SortConfig::default().with_natural(config.filer.natural_sort);

        Self {
            collection: ImageCollection::new().with_sort(sort),
            prefs: ViewPrefs {
                thumbnail_size: clamp_thumbnail_size(config.viewer.thumbnail_size),
                image_position: config.viewer.image_position,
            },
            keymap: Keymap::from_bindings(&config.keybindings),
            ops,
            settings,
            remember_sort: config.filer.remember_sort,
            confirm_delete: config.filer.confirm_delete,
        }
    }

    /// Read stored preferences and find the directory to reopen
    ///
    /// A stored directory that no longer exists is forgotten.
    pub fn restore(&mut self) -> Option<PathBuf> {
        if let Some(size) = self.settings.get(keys::THUMBNAIL_SIZE).as_deref().and_then(parse_thumbnail_size) {
            self.prefs.thumbnail_size = size;
        }

        if let Some(raw) = self.settings.get(keys::IMAGE_POSITION) {
            match raw.parse::<ImagePosition>() {
                Ok(position) => self.prefs.image_position = position,
                Err(e) => tracing::warn!("Ignoring stored image position: {}", e),
            }
        }

        if self.remember_sort {
            if let Some(raw) = self.settings.get(keys::SORT_CONFIG) {
                match serde_json::from_str::<SortConfig>(&raw) {
                    Ok(stored) => {
                        let natural = self.collection.sort().natural;
                        self.collection.set_sort(stored.with_natural(natural));
                    }
                    Err(e) => tracing::warn!("Ignoring stored sort order: {}", e),
                }
            }
        }

        let last = self.settings.get(keys::LAST_OPENED_DIRECTORY)?;
        let last = PathBuf::from(last);

        if self.ops.directory_exists(&last) {
            Some(last)
        } else {
            tracing::info!("Last directory {} is gone, forgetting it", last.display());
            self.forget(keys::LAST_OPENED_DIRECTORY);
            None
        }
    }

    /// Scan `dir` and show it; returns the number of images
    pub fn open_directory(&mut self, dir: &Path) -> Result<usize, AppError> {
        if !self.ops.directory_exists(dir) {
            return Err(AppError::FileNotFound(dir.display().to_string()));
        }

        let images = self.ops.list_images(dir);
        Ok(self.apply_scan(dir.to_path_buf(), images))
    }

    /// Show the result of a scan done elsewhere (e.g. on the blocking pool)
    pub fn apply_scan(&mut self, dir: PathBuf, images: Vec<ImageEntry>) -> usize {
        self.persist(keys::LAST_OPENED_DIRECTORY, &dir.display().to_string());
        self.collection.load(dir, images);
        self.collection.len()
    }

    pub fn collection(&self) -> &ImageCollection {
        &self.collection
    }

    pub fn prefs(&self) -> ViewPrefs {
        self.prefs
    }

    /// Images in display order
    pub fn sorted(&self) -> Vec<ImageEntry> {
        self.collection.sorted()
    }

    // ===== Sort =====

    pub fn set_sort_by(&mut self, by: SortBy) {
        self.collection.set_sort_by(by);
        self.persist_sort();
    }

    pub fn toggle_direction(&mut self) {
        self.collection.toggle_direction();
        self.persist_sort();
    }

    fn persist_sort(&self) {
        if !self.remember_sort {
            return;
        }
        match serde_json::to_string(&self.collection.sort()) {
            Ok(raw) => self.persist(keys::SORT_CONFIG, &raw),
            Err(e) => tracing::warn!("Could not encode sort order: {}", e),
        }
    }

    // ===== Display preferences =====

    /// Returns the size actually applied after clamping
    pub fn set_thumbnail_size(&mut self, size: u32) -> u32 {
        let size = clamp_thumbnail_size(size);
        self.prefs.thumbnail_size = size;
        self.persist(keys::THUMBNAIL_SIZE, &size.to_string());
        size
    }

    pub fn set_image_position(&mut self, position: ImagePosition) {
        self.prefs.image_position = position;
        self.persist(keys::IMAGE_POSITION, position.as_str());
    }

    // ===== Focus & selection =====

    pub fn focus_grid(&mut self, path: &str) -> bool {
        self.collection.focus_grid(path)
    }

    pub fn focus_pinned(&mut self, path: &str) -> bool {
        self.collection.focus_pinned(path)
    }

    pub fn close_focus(&mut self) {
        self.collection.clear_focus();
    }

    pub fn next(&mut self) -> bool {
        self.collection.next()
    }

    pub fn prev(&mut self) -> bool {
        self.collection.prev()
    }

    pub fn toggle_pin(&mut self, path: &str) -> Option<PinOutcome> {
        self.collection.toggle_pin(path)
    }

    pub fn unpin(&mut self, path: &str) -> bool {
        self.collection.unpin(path)
    }

    // ===== Deletion =====

    /// Ask the host to delete `path` and apply the outcome
    pub fn delete(&mut self, path: &str, prompt: &dyn ConfirmPrompt) -> DeleteOutcome {
        let outcome = if self.confirm_delete {
            self.ops.delete_image(path, prompt)
        } else {
            self.ops.delete_image(path, &|_: &str, _: &str, _: &str| true)
        };

        self.collection.apply_delete(path, &outcome);
        outcome
    }

    // ===== Keyboard =====

    pub fn handle_key(&mut self, chord: &str) -> KeyEffect {
        let Some(command) = self.keymap.resolve(chord).cloned() else {
            return KeyEffect::Ignored;
        };
        self.execute(&command)
    }

    pub fn execute(&mut self, command: &Command) -> KeyEffect {
        match command.id.as_str() {
            CommandId::NAV_NEXT_ITEM if self.next() => KeyEffect::Navigated,
            CommandId::NAV_PREV_ITEM if self.prev() => KeyEffect::Navigated,
            CommandId::VIEW_CLOSE if self.collection.focus().is_some() => {
                self.close_focus();
                KeyEffect::Closed
            }
            CommandId::VIEW_POSITION => {
                match command.arg.as_deref().map(str::parse::<ImagePosition>) {
                    Some(Ok(position)) => {
                        self.set_image_position(position);
                        KeyEffect::Position(position)
                    }
                    _ => {
                        tracing::warn!("Bad position binding: {:?}", command.arg);
                        KeyEffect::Ignored
                    }
                }
            }
            _ => KeyEffect::Ignored,
        }
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.settings.set(key, value) {
            tracing::warn!("Could not save {}: {}", key, e);
        }
    }

    fn forget(&self, key: &str) {
        if let Err(e) = self.settings.remove(key) {
            tracing::warn!("Could not remove {}: {}", key, e);
        }
    }
}
