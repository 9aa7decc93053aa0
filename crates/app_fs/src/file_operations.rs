//! File operations module
//! Provides the listing, existence and confirmed delete operations the viewer needs

use crate::{strip_file_scheme, ImageEntry};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File operation errors
#[derive(Debug, Error)]
pub enum FileOpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Trash error: {0}")]
    #[cfg(feature = "trash-support")]
    Trash(#[from] trash::Error),

    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, FileOpError>;

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The file is gone
    Deleted { path: PathBuf },
    /// The user declined the confirmation
    Canceled,
    /// Removal was attempted and failed
    Failed { error: String },
}

impl DeleteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }
}

/// Asks the user to confirm a destructive action
pub trait ConfirmPrompt {
    fn confirm(&self, title: &str, message: &str, detail: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str, &str, &str) -> bool,
{
    fn confirm(&self, title: &str, message: &str, detail: &str) -> bool {
        self(title, message, detail)
    }
}

/// Host-side file operations used by the image viewer
pub trait FileOperations: Send + Sync {
    /// List images in a directory; failures yield an empty list
    fn list_images(&self, dir: &Path) -> Vec<ImageEntry>;

    /// Whether the path is an existing directory
    fn directory_exists(&self, path: &Path) -> bool;

    /// Remove a file without asking
    fn remove(&self, path: &Path) -> Result<()>;

    /// Confirm with the user, then delete the image at `location`
    ///
    /// `location` may carry a `file://` marker.
    fn delete_image(&self, location: &str, prompt: &dyn ConfirmPrompt) -> DeleteOutcome {
        let path = strip_file_scheme(location);
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let confirmed = prompt.confirm(
            "Confirm deletion",
            "Do you really want to delete this file?",
            &format!("File: {}", file_name),
        );

        if !confirmed {
            tracing::debug!("Deletion canceled: {}", path.display());
            return DeleteOutcome::Canceled;
        }

        match self.remove(&path) {
            Ok(()) => DeleteOutcome::Deleted { path },
            Err(e) => {
                tracing::warn!("Error deleting file {}: {}", path.display(), e);
                DeleteOutcome::Failed { error: e.to_string() }
            }
        }
    }
}

/// Default implementation of file operations
pub struct DefaultFileOperations {
    use_trash: bool,
}

impl DefaultFileOperations {
    pub fn new() -> Self {
        Self { use_trash: true }
    }

    /// Choose between the recycle bin and permanent deletion
    pub fn with_trash(mut self, use_trash: bool) -> Self {
        self.use_trash = use_trash;
        self
    }
}

impl Default for DefaultFileOperations {
    fn default() -> Self {
        Self::new()
    }
}

impl FileOperations for DefaultFileOperations {
    fn list_images(&self, dir: &Path) -> Vec<ImageEntry> {
        crate::scan_images(dir)
    }

    fn directory_exists(&self, path: &Path) -> bool {
        crate::directory_exists(path)
    }

    #[cfg(feature = "trash-support")]
    fn remove(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(FileOpError::NotFound(path.to_path_buf()));
        }

        if path.is_dir() {
            return Err(FileOpError::InvalidOperation(format!(
                "Refusing to delete directory: {}",
                path.display()
            )));
        }

        if self.use_trash {
            trash::delete(path)?;
            tracing::info!("Moved to trash: {}", path.display());
        } else {
            std::fs::remove_file(path)?;
            tracing::warn!("Permanently deleted: {}", path.display());
        }

        Ok(())
    }

    #[cfg(not(feature = "trash-support"))]
    fn remove(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(FileOpError::NotFound(path.to_path_buf()));
        }

        if path.is_dir() {
            return Err(FileOpError::InvalidOperation(format!(
                "Refusing to delete directory: {}",
                path.display()
            )));
        }

        if self.use_trash {
            tracing::debug!("Trash support not compiled in, deleting permanently");
        }
        std::fs::remove_file(path)?;
        tracing::warn!("Permanently deleted: {}", path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_file_uri;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    fn permanent() -> DefaultFileOperations {
        DefaultFileOperations::new().with_trash(false)
    }

    #[test]
    fn test_delete_confirmed_strips_scheme() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.png");
        fs::write(&file, b"x").unwrap();

        let outcome = permanent().delete_image(&to_file_uri(&file), &|_: &str, _: &str, _: &str| true);

        assert_eq!(outcome, DeleteOutcome::Deleted { path: file.clone() });
        assert!(!file.exists());
    }

    #[test]
    fn test_delete_canceled_keeps_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.png");
        fs::write(&file, b"x").unwrap();

        let asked = Cell::new(false);
        let prompt = |_: &str, _: &str, detail: &str| {
            assert_eq!(detail, "File: a.png");
            asked.set(true);
            false
        };

        let outcome = permanent().delete_image(file.to_str().unwrap(), &prompt);

        assert!(asked.get());
        assert_eq!(outcome, DeleteOutcome::Canceled);
        assert!(file.exists());
    }

    #[test]
    fn test_delete_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("missing.png");

        let outcome = permanent().delete_image(&to_file_uri(&file), &|_: &str, _: &str, _: &str| true);

        assert!(matches!(outcome, DeleteOutcome::Failed { .. }));
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_delete_refuses_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("folder.png");
        fs::create_dir(&dir).unwrap();

        let outcome = permanent().delete_image(dir.to_str().unwrap(), &|_: &str, _: &str, _: &str| true);

        assert!(matches!(outcome, DeleteOutcome::Failed { .. }));
        assert!(dir.exists());
    }
}
