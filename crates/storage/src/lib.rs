//! Resource handles for S3-compatible object storage.
//!
//! This crate provides typed, client-side handles for remote buckets and
//! objects on top of a backend-agnostic [`StorageClient`]:
//!
//! - **Resources** - [`S3Resource`], [`Bucket`] and [`Object`] handles
//! - **Bucket metadata** - [`Bucket::load`], emulated by listing buckets and
//!   scanning by name ([`find_bucket_by_name`])
//! - **File transfers** - `upload_file` / `download_file` on every handle,
//!   forwarded to a [`TransferManager`] built per call by a
//!   [`TransferManagerFactory`]
//!
//! The bundled [`S3Transfer`] manager performs single-request transfers;
//! multipart or parallel engines plug in through the factory.
//!
//! # Errors
//!
//! Service failures surface as [`StorageError::Client`] carrying a
//! [`ClientError`] (code, message, operation). A bucket that `load` cannot
//! find is reported the same way, with code `"404"`.

mod error;
pub mod resource;
mod traits;
pub mod transfer;
mod transfer_methods;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ClientError, StorageError};
pub use resource::{find_bucket_by_name, Bucket, Object, ResourceMeta, S3Resource};
pub use traits::{NoOpCallback, StorageClient, TransferCallback};
pub use transfer::{
    validate_extra_args, S3Transfer, S3TransferFactory, TransferConfig, TransferManager,
    TransferManagerFactory, ALLOWED_DOWNLOAD_ARGS, ALLOWED_UPLOAD_ARGS,
};
pub use transfer_methods::TransferMethods;
pub use types::{
    AwsCredentials, BucketInfo, ExtraArgs, OperationType, RetrySettings, StorageSettings,
    TransferProgress, TransferResult, DEFAULT_REGION,
};
