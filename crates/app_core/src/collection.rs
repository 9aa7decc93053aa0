//! Image collection view-model
//!
//! Owns the listing of one directory together with the sort order, the
//! focused entry and the pinned side-panel set. Derived values (the sorted
//! listing, navigation targets) are computed on demand; every mutation goes
//! through a method named after the UI event that triggers it.

use crate::navigation::{navigate, Direction, Focus, FocusDomain};
use crate::selection::{PinOutcome, PinnedSet};
use crate::sort::{sort_images, SortBy, SortConfig};
use app_fs::{DeleteOutcome, ImageEntry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageCollection {
    directory: Option<PathBuf>,
    images: Vec<ImageEntry>,
    sort: SortConfig,
    focus: Option<Focus>,
    pinned: PinnedSet,
    sidebar_open: bool,
}

impl ImageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = sort;
        self
    }

    /// Replace the listing with a fresh scan of `directory`
    ///
    /// Focus and pinned entries belong to the previous directory and are dropped.
    pub fn load(&mut self, directory: impl Into<PathBuf>, images: Vec<ImageEntry>) {
        let directory = directory.into();
        tracing::info!("Loaded {} images from {}", images.len(), directory.display());

        self.directory = Some(directory);
        self.images = images;
        self.focus = None;
        self.pinned.clear();
        self.sidebar_open = false;
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Entries in scan order
    pub fn images(&self) -> &[ImageEntry] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// No images: the front-end shows its empty state
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn find(&self, path: &str) -> Option<&ImageEntry> {
        self.images.iter().find(|e| e.path == path)
    }

    // ===== Sort =====

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.sort = sort;
    }

    pub fn set_sort_by(&mut self, by: SortBy) {
        self.sort.by = by;
    }

    pub fn toggle_direction(&mut self) {
        self.sort.direction = self.sort.direction.toggled();
    }

    /// The listing in display order
    pub fn sorted(&self) -> Vec<ImageEntry> {
        sort_images(&self.images, self.sort)
    }

    // ===== Focus =====

    pub fn focus(&self) -> Option<&Focus> {
        self.focus.as_ref()
    }

    /// The entry currently shown full-size
    pub fn focused(&self) -> Option<&ImageEntry> {
        let focus = self.focus.as_ref()?;
        match focus.domain {
            FocusDomain::Grid => self.find(&focus.path),
            FocusDomain::Pinned => self
                .pinned
                .entries()
                .iter()
                .find(|e| e.path == focus.path)
                .or_else(|| self.find(&focus.path)),
        }
    }

    /// Open an entry from the grid; unknown paths are ignored
    pub fn focus_grid(&mut self, path: &str) -> bool {
        if self.find(path).is_none() {
            return false;
        }
        self.focus = Some(Focus::new(path, FocusDomain::Grid));
        true
    }

    /// Open an entry from the side panel; it must be pinned
    pub fn focus_pinned(&mut self, path: &str) -> bool {
        if !self.pinned.contains(path) {
            return false;
        }
        self.focus = Some(Focus::new(path, FocusDomain::Pinned));
        true
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// Move focus within its domain; returns whether it moved
    pub fn step(&mut self, direction: Direction) -> bool {
        let Some(focus) = self.focus.as_ref() else {
            return false;
        };

        let target = match focus.domain {
            FocusDomain::Grid => {
                let sorted = self.sorted();
                navigate(&sorted, &focus.path, direction).map(|e| e.path.clone())
            }
            FocusDomain::Pinned => {
                navigate(self.pinned.entries(), &focus.path, direction).map(|e| e.path.clone())
            }
        };

        match (target, self.focus.as_mut()) {
            (Some(path), Some(focus)) => {
                focus.path = path;
                true
            }
            _ => false,
        }
    }

    pub fn next(&mut self) -> bool {
        self.step(Direction::Next)
    }

    pub fn prev(&mut self) -> bool {
        self.step(Direction::Prev)
    }

    // ===== Pinned set =====

    pub fn pinned(&self) -> &PinnedSet {
        &self.pinned
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn is_pinned(&self, path: &str) -> bool {
        self.pinned.contains(path)
    }

    /// Pin or unpin a listed entry; `None` when the path isn't listed
    pub fn toggle_pin(&mut self, path: &str) -> Option<PinOutcome> {
        let entry = self.find(path)?.clone();
        let outcome = self.pinned.toggle(&entry);

        match outcome {
            PinOutcome::Pinned => self.sidebar_open = true,
            PinOutcome::Unpinned => self.close_sidebar_if_empty(),
            PinOutcome::Full => {}
        }

        Some(outcome)
    }

    /// Close button in the side panel
    pub fn unpin(&mut self, path: &str) -> bool {
        let removed = self.pinned.remove(path);
        if removed {
            self.close_sidebar_if_empty();
        }
        removed
    }

    fn close_sidebar_if_empty(&mut self) {
        if self.pinned.is_empty() {
            self.sidebar_open = false;
        }
    }

    // ===== Deletion =====

    /// Apply the host's answer to a delete request for `path`
    ///
    /// Only a successful deletion changes state.
    pub fn apply_delete(&mut self, path: &str, outcome: &DeleteOutcome) -> bool {
        match outcome {
            DeleteOutcome::Deleted { .. } => {}
            DeleteOutcome::Canceled => return false,
            DeleteOutcome::Failed { error } => {
                tracing::warn!("Delete of {} failed: {}", path, error);
                return false;
            }
        }

        self.images.retain(|e| e.path != path);

        if self.focus.as_ref().map_or(false, |f| f.path == path) {
            self.focus = None;
        }

        self.unpin(path);
        true
    }
}
