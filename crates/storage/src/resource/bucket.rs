//! Bucket resource and the list-and-scan metadata loader.

use std::sync::Arc;

use crate::error::{ClientError, StorageError};
use crate::resource::{Object, ResourceMeta};
use crate::traits::{StorageClient, TransferCallback};
use crate::transfer::{TransferConfig, TransferManagerFactory};
use crate::transfer_methods::{forward_download, forward_upload};
use crate::types::{BucketInfo, ExtraArgs, TransferResult};

/// Operation name reported by errors from the bucket scan.
pub const LIST_BUCKETS_OPERATION: &str = "ListBuckets";

/// Find a bucket's attributes by listing every bucket in the account.
///
/// The service has no call that describes a single bucket, so this lists all
/// buckets and scans for `name`. Cost is one list request and O(n) in the
/// number of buckets the account owns. Nothing is cached.
///
/// # Arguments
/// * `client` - Storage client used for the listing
/// * `name` - Bucket name to look for
///
/// # Returns
/// The matching list entry, or a client error with code `"404"` when no
/// bucket has that name.
pub async fn find_bucket_by_name<C: StorageClient + ?Sized>(
    client: &C,
    name: &str,
) -> Result<BucketInfo, StorageError> {
    let buckets: Vec<BucketInfo> = client.list_buckets().await?;
    log::debug!("Scanning {} buckets for {}", buckets.len(), name);

    buckets
        .into_iter()
        .find(|bucket| bucket.name == name)
        .ok_or_else(|| ClientError::new("404", "NotFound", LIST_BUCKETS_OPERATION).into())
}

/// A bucket handle.
///
/// Metadata is empty until [`Bucket::load`] succeeds and is replaced as a
/// whole on every successful load.
pub struct Bucket<C: StorageClient + ?Sized + 'static> {
    /// Bucket name.
    name: String,
    /// The storage client for S3 operations.
    client: Arc<C>,
    /// Builds transfer managers for file transfers.
    transfers: Arc<dyn TransferManagerFactory<C>>,
    /// Cached bucket attributes.
    meta: ResourceMeta<BucketInfo>,
}

impl<C: StorageClient + ?Sized + 'static> Bucket<C> {
    pub(crate) fn new(
        name: impl Into<String>,
        client: Arc<C>,
        transfers: Arc<dyn TransferManagerFactory<C>>,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            transfers,
            meta: ResourceMeta::default(),
        }
    }

    /// Build an already loaded handle from a list entry.
    pub(crate) fn from_info(
        info: BucketInfo,
        client: Arc<C>,
        transfers: Arc<dyn TransferManagerFactory<C>>,
    ) -> Self {
        let mut bucket = Self::new(info.name.clone(), client, transfers);
        bucket.meta.replace(info);
        bucket
    }

    /// Bucket name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Metadata cache.
    pub fn meta(&self) -> &ResourceMeta<BucketInfo> {
        &self.meta
    }

    /// Loaded attributes, if any.
    pub fn data(&self) -> Option<&BucketInfo> {
        self.meta.data()
    }

    /// True once [`Bucket::load`] has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.meta.is_loaded()
    }

    /// Creation timestamp (Unix epoch seconds) from loaded metadata.
    pub fn creation_date(&self) -> Option<i64> {
        self.meta.data().and_then(|info| info.creation_date)
    }

    /// Region from loaded metadata.
    pub fn region(&self) -> Option<&str> {
        self.meta.data().and_then(|info| info.region.as_deref())
    }

    /// Load bucket attributes.
    ///
    /// Emulated with [`find_bucket_by_name`]: one list request per call.
    /// On failure the previous metadata is left as it was.
    pub async fn load(&mut self) -> Result<(), StorageError> {
        let info: BucketInfo = find_bucket_by_name(self.client.as_ref(), &self.name).await?;
        self.meta.replace(info);
        Ok(())
    }

    /// Handle for an object in this bucket.
    pub fn object(&self, key: impl Into<String>) -> Object<C> {
        Object::new(
            self.name.clone(),
            key,
            Arc::clone(&self.client),
            Arc::clone(&self.transfers),
        )
    }

    /// Upload a local file to `key` in this bucket.
    ///
    /// # Arguments
    /// * `filename` - Local file to upload
    /// * `key` - Destination object key
    /// * `extra_args` - Request parameters passed through to the manager
    /// * `callback` - Progress callback passed through to the manager
    /// * `config` - Manager configuration; `None` uses the manager's default
    pub async fn upload_file(
        &self,
        filename: &str,
        key: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
        config: Option<TransferConfig>,
    ) -> Result<TransferResult, StorageError> {
        forward_upload(
            self.client.as_ref(),
            self.transfers.as_ref(),
            filename,
            &self.name,
            key,
            extra_args,
            callback,
            config,
        )
        .await
    }

    /// Download `key` from this bucket to a local file.
    ///
    /// # Arguments
    /// * `key` - Source object key
    /// * `filename` - Local destination path
    /// * `extra_args` - Request parameters passed through to the manager
    /// * `callback` - Progress callback passed through to the manager
    /// * `config` - Manager configuration; `None` uses the manager's default
    pub async fn download_file(
        &self,
        key: &str,
        filename: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
        config: Option<TransferConfig>,
    ) -> Result<TransferResult, StorageError> {
        forward_download(
            self.client.as_ref(),
            self.transfers.as_ref(),
            &self.name,
            key,
            filename,
            extra_args,
            callback,
            config,
        )
        .await
    }
}

impl<C: StorageClient + ?Sized + 'static> Clone for Bucket<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            client: Arc::clone(&self.client),
            transfers: Arc::clone(&self.transfers),
            meta: self.meta.clone(),
        }
    }
}

impl<C: StorageClient + ?Sized + 'static> std::fmt::Debug for Bucket<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &self.name)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}
