//! Service resource: the entry point for bucket and object handles.

use std::sync::Arc;

use crate::error::StorageError;
use crate::resource::Bucket;
use crate::traits::StorageClient;
use crate::transfer::{S3TransferFactory, TransferManagerFactory};
use crate::transfer_methods::TransferMethods;
use crate::types::BucketInfo;

/// Entry point owning the low-level client and the transfer-manager factory.
///
/// # Example
///
/// ```ignore
/// let resource = S3Resource::new(Arc::new(client));
///
/// let mut bucket = resource.bucket("my-bucket");
/// bucket.load().await?;
/// println!("created at {:?}", bucket.creation_date());
///
/// resource
///     .upload_file("/tmp/report.csv", "my-bucket", "report.csv", None, None, None)
///     .await?;
/// ```
pub struct S3Resource<C: StorageClient + ?Sized + 'static> {
    /// The storage client for S3 operations.
    client: Arc<C>,
    /// Builds transfer managers for file transfers.
    transfers: Arc<dyn TransferManagerFactory<C>>,
}

impl<C: StorageClient + ?Sized + 'static> S3Resource<C> {
    /// Create a resource using the bundled transfer manager.
    ///
    /// # Arguments
    /// * `client` - Storage client shared by every handle
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            transfers: Arc::new(S3TransferFactory),
        }
    }

    /// Use a different transfer-manager factory for file transfers.
    ///
    /// # Arguments
    /// * `factory` - Factory handed to every handle created afterwards
    pub fn with_transfer_factory(mut self, factory: Arc<dyn TransferManagerFactory<C>>) -> Self {
        self.transfers = factory;
        self
    }

    /// Handle for a bucket by name. Performs no I/O.
    pub fn bucket(&self, name: impl Into<String>) -> Bucket<C> {
        Bucket::new(name, Arc::clone(&self.client), Arc::clone(&self.transfers))
    }

    /// List every bucket in the account as loaded handles.
    pub async fn buckets(&self) -> Result<Vec<Bucket<C>>, StorageError> {
        let infos: Vec<BucketInfo> = self.client.list_buckets().await?;
        Ok(infos
            .into_iter()
            .map(|info| {
                Bucket::from_info(info, Arc::clone(&self.client), Arc::clone(&self.transfers))
            })
            .collect())
    }
}

impl<C: StorageClient + ?Sized + 'static> Clone for S3Resource<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            transfers: Arc::clone(&self.transfers),
        }
    }
}

impl<C: StorageClient + ?Sized + 'static> TransferMethods for S3Resource<C> {
    type Client = C;

    fn client(&self) -> &C {
        self.client.as_ref()
    }

    fn transfer_factory(&self) -> &dyn TransferManagerFactory<C> {
        self.transfers.as_ref()
    }
}
