//! Pinned entries shown in the side panel

use app_fs::ImageEntry;
use serde::{Deserialize, Serialize};

/// Most entries the side panel holds
pub const MAX_PINNED: usize = 3;

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutcome {
    Pinned,
    Unpinned,
    /// Already at [`MAX_PINNED`]; nothing changed
    Full,
}

/// Ordered set of at most [`MAX_PINNED`] entries, keyed by path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedSet {
    entries: Vec<ImageEntry>,
}

impl PinnedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unpin when pinned, otherwise append while there is room
    pub fn toggle(&mut self, entry: &ImageEntry) -> PinOutcome {
        if self.remove(&entry.path) {
            return PinOutcome::Unpinned;
        }

        if self.entries.len() >= MAX_PINNED {
            tracing::debug!("Pinned set full, ignoring {}", entry.name);
            return PinOutcome::Full;
        }

        self.entries.push(entry.clone());
        PinOutcome::Pinned
    }

    /// Remove by path; returns whether anything was removed
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.path != path);
        self.entries.len() != before
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
