//! Image directory scanning

use crate::{to_file_uri, FsError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Extensions recognised as images (lower case, without the dot)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "avif"];

/// One image discovered by a directory scan
///
/// `path` is a `file://` URI and is the unique key within a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    pub name: String,
    pub path: String,
    /// Epoch milliseconds, used only for ordering
    pub last_modified: i64,
    pub last_modified_date: DateTime<Utc>,
}

impl ImageEntry {
    /// Create an entry from its parts, deriving `name` from the path
    pub fn new<P: AsRef<Path>>(path: P, last_modified: i64) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            name,
            path: to_file_uri(path),
            last_modified,
            last_modified_date: DateTime::<Utc>::from_timestamp_millis(last_modified)
                .unwrap_or_default(),
        }
    }

    /// Read an entry from file system metadata
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;

        let last_modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        Ok(Self::new(path, last_modified))
    }

    /// Plain file system path of this entry
    pub fn fs_path(&self) -> PathBuf {
        crate::strip_file_scheme(&self.path)
    }
}

/// Check the extension against the allow-list, ignoring case
pub fn is_image_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .map_or(false, |ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// List the images directly inside `dir`, in directory order
///
/// Sub-directories are skipped, even when named like an image. Entries whose metadata can't be
/// read are skipped.
pub fn list_images<P: AsRef<Path>>(dir: P) -> Result<Vec<ImageEntry>> {
    let dir = dir.as_ref();

    if !dir.exists() {
        return Err(FsError::NotFound(dir.display().to_string()));
    }

    if !dir.is_dir() {
        return Err(FsError::InvalidPath(format!("Not a directory: {}", dir.display())));
    }

    let read_dir = fs::read_dir(dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => FsError::AccessDenied(dir.display().to_string()),
        _ => FsError::Io(e),
    })?;

    let mut entries = Vec::new();

    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();

        if !is_image_file(&path) || !path.is_file() {
            continue;
        }

        match ImageEntry::from_path(&path) {
            Ok(image) => entries.push(image),
            Err(e) => tracing::debug!("Skipping {}: {}", path.display(), e),
        }
    }

    tracing::debug!("Found {} images in {}", entries.len(), dir.display());
    Ok(entries)
}

/// Scan collaborator: like [`list_images`] but never fails
///
/// Unreadable directories are logged and yield an empty listing.
pub fn scan_images<P: AsRef<Path>>(dir: P) -> Vec<ImageEntry> {
    let dir = dir.as_ref();
    match list_images(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Error reading directory {}: {}", dir.display(), e);
            Vec::new()
        }
    }
}

/// Run [`scan_images`] on the blocking pool
pub async fn scan_images_async(dir: PathBuf) -> Vec<ImageEntry> {
    let shown = dir.display().to_string();
    match tokio::task::spawn_blocking(move || scan_images(&dir)).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Directory scan of {} aborted: {}", shown, e);
            Vec::new()
        }
    }
}

/// Whether `path` names an existing directory
pub fn directory_exists<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return false;
    }
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"img").unwrap();
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file("a.PNG"));
        assert!(is_image_file("b.jpeg"));
        assert!(is_image_file("c.Avif"));
        assert!(!is_image_file("d.tiff"));
        assert!(!is_image_file("noext"));
    }

    #[test]
    fn test_list_images_filters_extensions() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "one.jpg");
        touch(temp.path(), "two.WEBP");
        touch(temp.path(), "readme.txt");
        fs::create_dir(temp.path().join("nested.png")).unwrap();

        let mut names: Vec<_> = list_images(temp.path())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["one.jpg", "two.WEBP"]);
    }

    #[test]
    fn test_entry_fields() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.png");

        let entries = list_images(temp.path()).unwrap();
        assert_eq!(entries.len(), 1);

        let entry = &entries[0];
        assert_eq!(entry.name, "a.png");
        assert!(entry.path.starts_with("file://"));
        assert_eq!(entry.fs_path(), temp.path().join("a.png"));
        assert!(entry.last_modified > 0);
        assert_eq!(entry.last_modified_date.timestamp_millis(), entry.last_modified);
    }

    #[test]
    fn test_scan_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");

        assert!(matches!(list_images(&missing), Err(FsError::NotFound(_))));
        assert!(scan_images(&missing).is_empty());
    }

    #[test]
    fn test_directory_exists() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "file.png");

        assert!(directory_exists(temp.path()));
        assert!(!directory_exists(temp.path().join("file.png")));
        assert!(!directory_exists(temp.path().join("missing")));
        assert!(!directory_exists(""));
    }

    #[test]
    fn test_serialized_shape() {
        let entry = ImageEntry::new("/p/b.png", 200);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["name"], "b.png");
        assert_eq!(json["path"], "file:///p/b.png");
        assert_eq!(json["lastModified"], 200);
        assert!(json["lastModifiedDate"].as_str().unwrap().starts_with("1970-01-01T00:00:00.200"));
    }

    #[tokio::test]
    async fn test_scan_async() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "x.gif");

        let entries = scan_images_async(temp.path().to_path_buf()).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "x.gif");
    }
}
