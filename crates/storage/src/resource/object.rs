//! Object resource.

use std::sync::Arc;

use crate::error::StorageError;
use crate::resource::Bucket;
use crate::traits::{StorageClient, TransferCallback};
use crate::transfer::{TransferConfig, TransferManagerFactory};
use crate::transfer_methods::{forward_download, forward_upload};
use crate::types::{ExtraArgs, TransferResult};

/// An object handle, identified by bucket name and key.
pub struct Object<C: StorageClient + ?Sized + 'static> {
    bucket_name: String,
    key: String,
    client: Arc<C>,
    transfers: Arc<dyn TransferManagerFactory<C>>,
}

impl<C: StorageClient + ?Sized + 'static> Object<C> {
    pub(crate) fn new(
        bucket_name: impl Into<String>,
        key: impl Into<String>,
        client: Arc<C>,
        transfers: Arc<dyn TransferManagerFactory<C>>,
    ) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            key: key.into(),
            client,
            transfers,
        }
    }

    /// Name of the bucket holding the object.
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Object key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Handle for the bucket holding the object (not loaded).
    pub fn bucket(&self) -> Bucket<C> {
        Bucket::new(
            self.bucket_name.clone(),
            Arc::clone(&self.client),
            Arc::clone(&self.transfers),
        )
    }

    /// Upload a local file to this object.
    pub async fn upload_file(
        &self,
        filename: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
        config: Option<TransferConfig>,
    ) -> Result<TransferResult, StorageError> {
        forward_upload(
            self.client.as_ref(),
            self.transfers.as_ref(),
            filename,
            &self.bucket_name,
            &self.key,
            extra_args,
            callback,
            config,
        )
        .await
    }

    /// Download this object to a local file.
    pub async fn download_file(
        &self,
        filename: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
        config: Option<TransferConfig>,
    ) -> Result<TransferResult, StorageError> {
        forward_download(
            self.client.as_ref(),
            self.transfers.as_ref(),
            &self.bucket_name,
            &self.key,
            filename,
            extra_args,
            callback,
            config,
        )
        .await
    }
}

impl<C: StorageClient + ?Sized + 'static> Clone for Object<C> {
    fn clone(&self) -> Self {
        Self {
            bucket_name: self.bucket_name.clone(),
            key: self.key.clone(),
            client: Arc::clone(&self.client),
            transfers: Arc::clone(&self.transfers),
        }
    }
}

impl<C: StorageClient + ?Sized + 'static> std::fmt::Debug for Object<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object")
            .field("bucket_name", &self.bucket_name)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::S3Resource;
    use crate::testing::{MockStorageClient, RecordedCall, RecordingFactory};
    use crate::types::BucketInfo;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_object_identity() {
        let resource = S3Resource::new(Arc::new(MockStorageClient::default()));
        let object = resource.bucket("logs").object("2024/01/app.log");
        assert_eq!(object.bucket_name(), "logs");
        assert_eq!(object.key(), "2024/01/app.log");
        assert_eq!(object.bucket().name(), "logs");
        assert!(!object.bucket().is_loaded());
    }

    #[tokio::test]
    async fn test_object_transfers_forward_bucket_and_key() {
        let factory = RecordingFactory::new();
        let resource = S3Resource::new(Arc::new(MockStorageClient::default()))
            .with_transfer_factory(Arc::new(factory.clone()));
        let object = resource.bucket("logs").object("app.log");
        let args = ExtraArgs::new().with_param("VersionId", "3");

        object.upload_file("/var/log/app.log", None, None, None).await.unwrap();
        object
            .download_file("/tmp/app.log", Some(&args), None, None)
            .await
            .unwrap();

        let mut download = RecordedCall::download("logs", "app.log", "/tmp/app.log");
        download.extra_args = Some(args);
        assert_eq!(
            factory.calls(),
            vec![
                RecordedCall::upload("/var/log/app.log", "logs", "app.log"),
                download
            ]
        );
    }

    #[tokio::test]
    async fn test_object_roundtrip_through_default_manager() {
        let temp_dir: TempDir = TempDir::new().unwrap();
        let source: PathBuf = temp_dir.path().join("source.txt");
        let dest: PathBuf = temp_dir.path().join("dest.txt");
        std::fs::write(&source, "contents").unwrap();

        let client = Arc::new(MockStorageClient::with_buckets(vec![BucketInfo::new("docs")]));
        let resource = S3Resource::new(Arc::clone(&client));
        let object = resource.bucket("docs").object("source.txt");

        object
            .upload_file(source.to_str().unwrap(), None, None, None)
            .await
            .unwrap();
        let result: TransferResult = object
            .download_file(dest.to_str().unwrap(), None, None, None)
            .await
            .unwrap();

        assert_eq!(result.bytes_transferred, 8);
        assert_eq!(std::fs::read(&dest).unwrap(), b"contents");
        assert_eq!(client.object("docs", "source.txt").unwrap(), b"contents");
    }
}
