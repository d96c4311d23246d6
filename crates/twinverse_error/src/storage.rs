//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Connection or pool could not be established
    #[display("Connection error: {}", _0)]
    Connection(String),
    /// Record not found
    #[display("Not found: {}", _0)]
    NotFound(String),
    /// Query failed
    #[display("Query failed: {}", _0)]
    Query(String),
    /// Stored payload could not be (de)serialized
    #[display("Serialization error: {}", _0)]
    Serialization(String),
    /// Schema migration failed
    #[display("Migration failed: {}", _0)]
    Migration(String),
    /// Pool has been closed and no longer hands out connections
    #[display("Storage pool is closed")]
    Closed,
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use twinverse_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("reality 42".to_string()));
/// assert!(format!("{}", err).contains("Not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(feature = "database")]
impl From<diesel::result::Error> for StorageError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => {
                StorageError::new(StorageErrorKind::NotFound(err.to_string()))
            }
            other => StorageError::new(StorageErrorKind::Query(other.to_string())),
        }
    }
}

#[cfg(feature = "database")]
impl From<diesel::ConnectionError> for StorageError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        StorageError::new(StorageErrorKind::Connection(err.to_string()))
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
