//! Error types for fileaudit

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a run. Per-entry access problems during traversal are
/// not represented here; the walker logs and skips them.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("'{}' does not exist or is not a directory", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("invalid {kind} filter '{value}': {reason}")]
    InvalidFilter {
        kind: &'static str,
        value: String,
        reason: String,
    },

    #[error("cannot write report to '{}': {source}", .path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl AuditError {
    pub(crate) fn invalid_filter(
        kind: &'static str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        AuditError::InvalidFilter {
            kind,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_message() {
        let err = AuditError::invalid_filter("size", "*100", "unknown operator '*'");
        assert_eq!(
            err.to_string(),
            "invalid size filter '*100': unknown operator '*'"
        );
    }

    #[test]
    fn test_invalid_directory_message() {
        let err = AuditError::InvalidDirectory(PathBuf::from("/no/such/dir"));
        assert!(err.to_string().contains("/no/such/dir"));
    }
}
