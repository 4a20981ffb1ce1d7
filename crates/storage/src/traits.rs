//! Storage traits/interfaces for S3 operations.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{BucketInfo, ExtraArgs, TransferProgress};

/// Callback trait for transfer progress reporting.
///
/// Implemented for any `Fn(&TransferProgress) -> bool` closure.
pub trait TransferCallback: Send + Sync {
    /// Called with progress updates.
    /// Returns false to cancel the transfer.
    fn on_progress(&self, progress: &TransferProgress) -> bool;
}

impl<F> TransferCallback for F
where
    F: Fn(&TransferProgress) -> bool + Send + Sync,
{
    fn on_progress(&self, progress: &TransferProgress) -> bool {
        self(progress)
    }
}

/// A callback that ignores progress and never cancels.
pub struct NoOpCallback;

impl TransferCallback for NoOpCallback {
    fn on_progress(&self, _progress: &TransferProgress) -> bool {
        true
    }
}

/// Low-level S3 operations - implemented by each backend.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// List every bucket owned by the caller's account.
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>, StorageError>;

    /// Upload from file path to S3.
    ///
    /// # Returns
    /// Number of bytes uploaded.
    async fn put_object_from_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &str,
        extra_args: &ExtraArgs,
        progress: Option<&dyn TransferCallback>,
    ) -> Result<u64, StorageError>;

    /// Download object to file path, replacing any existing file.
    ///
    /// # Returns
    /// Number of bytes downloaded.
    async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &str,
        extra_args: &ExtraArgs,
        progress: Option<&dyn TransferCallback>,
    ) -> Result<u64, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OperationType;

    fn progress(bytes: u64) -> TransferProgress {
        TransferProgress {
            operation: OperationType::Uploading,
            key: "key".into(),
            bytes_amount: bytes,
            bytes_transferred: bytes,
            total_bytes: Some(100),
        }
    }

    #[test]
    fn test_closure_callback() {
        let callback = |p: &TransferProgress| p.bytes_transferred < 50;
        assert!(callback.on_progress(&progress(10)));
        assert!(!callback.on_progress(&progress(60)));
    }

    #[test]
    fn test_noop_callback() {
        assert!(NoOpCallback.on_progress(&progress(100)));
    }
}
