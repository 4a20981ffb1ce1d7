//! Error types for CRT storage operations.

use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use rusty_resources_storage::{ClientError, StorageError};
use thiserror::Error;

/// Errors specific to the CRT storage client.
#[derive(Error, Debug)]
pub enum CrtError {
    /// AWS SDK error without a service error code (transport, timeout, body).
    #[error("AWS SDK error: {message}")]
    SdkError { message: String, retryable: bool },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<CrtError> for StorageError {
    fn from(err: CrtError) -> Self {
        match err {
            CrtError::SdkError { message, retryable } => {
                StorageError::NetworkError { message, retryable }
            }
            CrtError::ConfigError(message) => StorageError::InvalidConfig { message },
        }
    }
}

/// Convert an SDK error into a `StorageError`.
///
/// Errors carrying a service error code become [`ClientError`]s tagged with
/// `operation`; everything else becomes a network error.
///
/// # Arguments
/// * `operation` - Service operation name (e.g. "ListBuckets")
/// * `err` - The SDK error
pub(crate) fn sdk_error<E, R>(operation: &str, err: SdkError<E, R>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if let Some(code) = err.code() {
        let message: &str = err.message().unwrap_or_default();
        return ClientError::new(code, message, operation).into();
    }

    let retryable: bool = matches!(
        err,
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_)
    );
    CrtError::SdkError {
        message: DisplayErrorContext(&err).to_string(),
        retryable,
    }
    .into()
}
