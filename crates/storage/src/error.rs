//! Error types for storage operations.

use thiserror::Error;

/// Error codes that identify a missing bucket or object.
const NOT_FOUND_CODES: &[&str] = &["404", "NotFound", "NoSuchBucket", "NoSuchKey"];

/// Error codes worth retrying.
const RETRYABLE_CODES: &[&str] = &[
    "500",
    "503",
    "InternalError",
    "RequestTimeout",
    "ServiceUnavailable",
    "SlowDown",
];

/// A client error as reported by the storage service.
///
/// Carries the machine-readable error code, the human-readable message and
/// the name of the operation that produced it. Errors synthesized on the
/// client side use the same shape so callers handle both uniformly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("An error occurred ({code}) when calling the {operation} operation: {message}")]
pub struct ClientError {
    /// Error code (e.g. "404", "NoSuchKey", "AccessDenied").
    pub code: String,
    /// Error message.
    pub message: String,
    /// Name of the operation that failed (e.g. "ListBuckets").
    pub operation: String,
}

impl ClientError {
    /// Create a new client error.
    ///
    /// # Arguments
    /// * `code` - Machine-readable error code
    /// * `message` - Human-readable message
    /// * `operation` - Name of the originating operation
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        operation: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            operation: operation.into(),
        }
    }

    /// Check if the code identifies a missing bucket or object.
    pub fn is_not_found(&self) -> bool {
        NOT_FOUND_CODES.contains(&self.code.as_str())
    }

    /// Check if the code identifies a transient server-side failure.
    pub fn is_retryable(&self) -> bool {
        RETRYABLE_CODES.contains(&self.code.as_str())
    }
}

/// Errors that can occur during storage operations.
#[derive(Error, Debug, Clone)]
pub enum StorageError {
    /// Error returned by (or emulated for) the storage service.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Network error.
    #[error("Network error: {message}")]
    NetworkError { message: String, retryable: bool },

    /// Local I/O error.
    #[error("I/O error for {path}: {message}")]
    IoError { path: String, message: String },

    /// Operation cancelled by user.
    #[error("Operation cancelled")]
    Cancelled,

    /// Invalid configuration or request parameters.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl StorageError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            StorageError::Client(err) => err.is_retryable(),
            StorageError::NetworkError { retryable, .. } => *retryable,
            StorageError::IoError { .. } => false,
            StorageError::Cancelled => false,
            StorageError::InvalidConfig { .. } => false,
        }
    }

    /// Check if this error reports a missing bucket or object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Client(err) if err.is_not_found())
    }

    /// The service error code, if this is a client error.
    pub fn code(&self) -> Option<&str> {
        match self {
            StorageError::Client(err) => Some(err.code.as_str()),
            _ => None,
        }
    }

    /// Create an I/O error for a path.
    ///
    /// # Arguments
    /// * `path` - Path where the error occurred
    /// * `err` - The underlying I/O error
    pub fn io(path: impl Into<String>, err: std::io::Error) -> Self {
        StorageError::IoError {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::IoError {
            path: String::new(),
            message: err.to_string(),
        }
    }
}
