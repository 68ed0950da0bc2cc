//! Storage Error Taxonomy
//!
//! Classified failures for the certificate storage layer. Callers branch on
//! [`StorageError::NotExist`] ("no data yet, proceed to issue") versus the
//! transient variants ("retry later"); the distinction is load-bearing for
//! the host TLS engine, so not-found conditions are always classified, never
//! surfaced as raw adapter errors.

use std::io::{Error as IoError, ErrorKind};

/// Error type for storage and lock operations.
#[derive(Debug)]
pub enum StorageError {
    /// The requested key has no stored object. Expected during normal
    /// operation; callers use it as a branch condition, not a fault.
    NotExist,
    /// Object store failure other than not-found. Surfaced verbatim;
    /// retry policy belongs to the caller.
    Io(IoError),
    /// Stored payload could not be parsed into the expected record shape.
    /// Fatal to that read; never coerced into a zero-valued record.
    Decode(serde_json::Error),
    /// `unlock` was called for a name that holds no claim. Indicates a
    /// caller bug, not a transient condition.
    NoSuchLock(String),
}

impl StorageError {
    /// True iff this is the not-exists classification.
    pub fn is_not_exist(&self) -> bool {
        matches!(self, StorageError::NotExist)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::NotExist => write!(f, "Data does not exist"),
            StorageError::Io(e) => write!(f, "I/O error: {}", e),
            StorageError::Decode(e) => write!(f, "Decode error: {}", e),
            StorageError::NoSuchLock(name) => {
                write!(f, "No lock to release for {}", name)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IoError> for StorageError {
    fn from(e: IoError) -> Self {
        if e.kind() == ErrorKind::NotFound {
            StorageError::NotExist
        } else {
            StorageError::Io(e)
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Decode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_io_classifies_as_not_exist() {
        let err: StorageError = IoError::new(ErrorKind::NotFound, "no such key").into();
        assert!(err.is_not_exist());
    }

    #[test]
    fn test_other_io_stays_io() {
        let err: StorageError = IoError::new(ErrorKind::ConnectionReset, "reset").into();
        assert!(!err.is_not_exist());
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_decode_error_classification() {
        let json_err = serde_json::from_str::<serde_json::Value>("").unwrap_err();
        let err: StorageError = json_err.into();
        assert!(matches!(err, StorageError::Decode(_)));
    }

    #[test]
    fn test_display_names_the_lock() {
        let err = StorageError::NoSuchLock("example.com".to_string());
        assert_eq!(err.to_string(), "No lock to release for example.com");
    }
}
