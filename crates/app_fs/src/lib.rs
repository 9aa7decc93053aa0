//! PixShelf File System Abstraction Layer
//!
//! Provides the host-side collaborators the image view-model relies on:
//! - Image directory scanning with an extension allow-list
//! - Directory existence checks
//! - `file://` URI conversion
//! - Confirmed file deletion (recycle bin or permanent)

mod uri;
mod browser;
mod file_operations;

pub use uri::{to_file_uri, strip_file_scheme, FILE_SCHEME};
pub use browser::{
    ImageEntry, IMAGE_EXTENSIONS, is_image_file, list_images, scan_images, scan_images_async,
    directory_exists,
};
pub use file_operations::{
    ConfirmPrompt, DeleteOutcome, DefaultFileOperations, FileOpError, FileOperations,
};

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, FsError>;
