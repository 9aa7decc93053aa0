//! Application error types

use app_fs::DeleteOutcome;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Recoverable Errors (notify user, continue) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Network error: {0}")]
    Network(String),

    // ===== Fatal Errors (application termination) =====
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl AppError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::FileNotFound(_)
                | AppError::AccessDenied(_)
                | AppError::InvalidPath(_)
                | AppError::Delete(_)
                | AppError::Settings(_)
                | AppError::Network(_)
        )
    }

    /// Failed deletion as an error; `None` when the file went away or the
    /// user declined
    pub fn from_delete(outcome: &DeleteOutcome) -> Option<Self> {
        match outcome {
            DeleteOutcome::Failed { error } => Some(AppError::Delete(error.clone())),
            DeleteOutcome::Deleted { .. } | DeleteOutcome::Canceled => None,
        }
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::FileNotFound(path) => format!("File not found: {}", path),
            AppError::AccessDenied(path) => format!("Access denied: {}", path),
            AppError::Delete(msg) => format!("Could not delete the file: {}", msg),
            AppError::Network(msg) => format!("Could not reach the rate service: {}", msg),
            _ => self.to_string(),
        }
    }
}

impl From<app_fs::FsError> for AppError {
    fn from(e: app_fs::FsError) -> Self {
        match e {
            app_fs::FsError::NotFound(p) => AppError::FileNotFound(p),
            app_fs::FsError::AccessDenied(p) => AppError::AccessDenied(p),
            app_fs::FsError::InvalidPath(p) => AppError::InvalidPath(p),
            app_fs::FsError::Io(e) => AppError::Io(e),
        }
    }
}

impl From<crate::settings::SettingsError> for AppError {
    fn from(e: crate::settings::SettingsError) -> Self {
        AppError::Settings(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(AppError::Delete("busy".into()).is_recoverable());
        assert!(AppError::Network("timeout".into()).is_recoverable());
        assert!(!AppError::Config("bad".into()).is_recoverable());
        assert!(!AppError::Init("no log dir".into()).is_recoverable());
    }

    #[test]
    fn test_from_delete() {
        let failed = DeleteOutcome::Failed { error: "file is busy".into() };
        let err = AppError::from_delete(&failed).unwrap();
        assert_eq!(err.user_message(), "Could not delete the file: file is busy");

        assert!(AppError::from_delete(&DeleteOutcome::Canceled).is_none());
        let deleted = DeleteOutcome::Deleted { path: "/pics/a.png".into() };
        assert!(AppError::from_delete(&deleted).is_none());
    }

    #[test]
    fn test_fs_conversion() {
        let err: AppError = app_fs::FsError::NotFound("/x".into()).into();
        assert!(matches!(err, AppError::FileNotFound(ref p) if p == "/x"));
        assert_eq!(err.user_message(), "File not found: /x");
    }
}
