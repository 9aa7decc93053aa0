//! `file://` URI helpers
//!
//! Listings identify images by a `file://` URI so the display layer can load
//! them directly. Host operations need the plain path back.

use std::path::{Path, PathBuf};

/// Scheme prefix used for image locations
pub const FILE_SCHEME: &str = "file://";

/// Build a `file://` URI from a file system path
pub fn to_file_uri<P: AsRef<Path>>(path: P) -> String {
    format!("{}{}", FILE_SCHEME, path.as_ref().display())
}

/// Strip a leading `file://` marker, leaving plain paths untouched
pub fn strip_file_scheme(location: &str) -> PathBuf {
    PathBuf::from(location.strip_prefix(FILE_SCHEME).unwrap_or(location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let uri = to_file_uri("/photos/a.png");
        assert_eq!(uri, "file:///photos/a.png");
        assert_eq!(strip_file_scheme(&uri), PathBuf::from("/photos/a.png"));
    }

    #[test]
    fn test_plain_path_untouched() {
        assert_eq!(strip_file_scheme("/photos/a.png"), PathBuf::from("/photos/a.png"));
        // Only a leading marker is stripped
        assert_eq!(
            strip_file_scheme("/x/file:///a.png"),
            PathBuf::from("/x/file:///a.png")
        );
    }
}
