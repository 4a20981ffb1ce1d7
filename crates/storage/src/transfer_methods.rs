//! `upload_file` / `download_file` for resource types.
//!
//! A resource type gains both methods by implementing [`TransferMethods`],
//! which only asks for the client and the transfer-manager factory:
//!
//! ```ignore
//! impl<C: StorageClient + ?Sized + 'static> TransferMethods for S3Resource<C> {
//!     type Client = C;
//!     fn client(&self) -> &C { &self.client }
//!     fn transfer_factory(&self) -> &dyn TransferManagerFactory<C> { self.transfers.as_ref() }
//! }
//! ```
//!
//! Each call builds a fresh manager and forwards its arguments untouched.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::traits::{StorageClient, TransferCallback};
use crate::transfer::{TransferConfig, TransferManager, TransferManagerFactory};
use crate::types::{ExtraArgs, TransferResult};

/// File transfer methods shared by resource types.
#[async_trait]
pub trait TransferMethods: Send + Sync {
    /// Low-level client type.
    type Client: StorageClient + ?Sized + 'static;

    /// The client transfers are bound to.
    fn client(&self) -> &Self::Client;

    /// Factory used to build a manager per call.
    fn transfer_factory(&self) -> &dyn TransferManagerFactory<Self::Client>;

    /// Upload a local file to `bucket/key`.
    ///
    /// # Arguments
    /// * `filename` - Local file to upload
    /// * `bucket` - Destination bucket
    /// * `key` - Destination object key
    /// * `extra_args` - Request parameters passed through to the manager
    /// * `callback` - Progress callback passed through to the manager
    /// * `config` - Manager configuration; `None` uses the manager's default
    ///
    /// # Returns
    /// Whatever the transfer manager returns.
    async fn upload_file(
        &self,
        filename: &str,
        bucket: &str,
        key: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
        config: Option<TransferConfig>,
    ) -> Result<TransferResult, StorageError> {
        forward_upload(
            self.client(),
            self.transfer_factory(),
            filename,
            bucket,
            key,
            extra_args,
            callback,
            config,
        )
        .await
    }

    /// Download `bucket/key` to a local file.
    ///
    /// # Arguments
    /// * `bucket` - Source bucket
    /// * `key` - Source object key
    /// * `filename` - Local destination path
    /// * `extra_args` - Request parameters passed through to the manager
    /// * `callback` - Progress callback passed through to the manager
    /// * `config` - Manager configuration; `None` uses the manager's default
    ///
    /// # Returns
    /// Whatever the transfer manager returns.
    async fn download_file(
        &self,
        bucket: &str,
        key: &str,
        filename: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
        config: Option<TransferConfig>,
    ) -> Result<TransferResult, StorageError> {
        forward_download(
            self.client(),
            self.transfer_factory(),
            bucket,
            key,
            filename,
            extra_args,
            callback,
            config,
        )
        .await
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) async fn forward_upload<C: StorageClient + ?Sized>(
    client: &C,
    factory: &dyn TransferManagerFactory<C>,
    filename: &str,
    bucket: &str,
    key: &str,
    extra_args: Option<&ExtraArgs>,
    callback: Option<&dyn TransferCallback>,
    config: Option<TransferConfig>,
) -> Result<TransferResult, StorageError> {
    let transfer: Box<dyn TransferManager + '_> = factory.create(client, config);
    transfer
        .upload_file(filename, bucket, key, extra_args, callback)
        .await
}

#[allow(clippy::too_many_arguments)]
pub(crate) async fn forward_download<C: StorageClient + ?Sized>(
    client: &C,
    factory: &dyn TransferManagerFactory<C>,
    bucket: &str,
    key: &str,
    filename: &str,
    extra_args: Option<&ExtraArgs>,
    callback: Option<&dyn TransferCallback>,
    config: Option<TransferConfig>,
) -> Result<TransferResult, StorageError> {
    let transfer: Box<dyn TransferManager + '_> = factory.create(client, config);
    transfer
        .download_file(bucket, key, filename, extra_args, callback)
        .await
}
