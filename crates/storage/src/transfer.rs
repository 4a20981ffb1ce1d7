//! Single-file transfer manager.
//!
//! A [`TransferManager`] moves one local file to or from one object. Resource
//! handles never talk to it directly: they ask a [`TransferManagerFactory`]
//! for a fresh manager bound to their client on every call, so alternative
//! engines (multipart, parallel) plug in by supplying another factory.
//!
//! [`S3Transfer`] is the bundled implementation. It validates extra
//! arguments, issues a single request per transfer, retries transient
//! download failures and writes downloads through a temporary sibling file
//! so a failed transfer never leaves a truncated destination behind.
//!
//! # Example
//!
//! ```ignore
//! use rusty_resources_storage::{S3Transfer, TransferConfig, TransferManager};
//!
//! let transfer = S3Transfer::new(&client, Some(TransferConfig::default()));
//! transfer
//!     .upload_file("/tmp/report.csv", "my-bucket", "reports/report.csv", None, None)
//!     .await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::traits::{StorageClient, TransferCallback};
use crate::types::{ExtraArgs, RetrySettings, TransferResult};

/// Parameters accepted by uploads.
pub const ALLOWED_UPLOAD_ARGS: &[&str] = &[
    "ACL",
    "CacheControl",
    "ChecksumAlgorithm",
    "ContentDisposition",
    "ContentEncoding",
    "ContentLanguage",
    "ContentType",
    "ExpectedBucketOwner",
    "GrantFullControl",
    "GrantRead",
    "GrantReadACP",
    "GrantWriteACP",
    "Metadata",
    "RequestPayer",
    "SSECustomerAlgorithm",
    "SSECustomerKey",
    "SSECustomerKeyMD5",
    "SSEKMSKeyId",
    "ServerSideEncryption",
    "StorageClass",
    "Tagging",
    "WebsiteRedirectLocation",
];

/// Parameters accepted by downloads.
pub const ALLOWED_DOWNLOAD_ARGS: &[&str] = &[
    "ChecksumMode",
    "ExpectedBucketOwner",
    "RequestPayer",
    "SSECustomerAlgorithm",
    "SSECustomerKey",
    "SSECustomerKeyMD5",
    "VersionId",
];

/// Length of the random suffix appended to temporary download files.
const TEMP_SUFFIX_LEN: usize = 8;

/// Configuration for a transfer manager.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferConfig {
    /// Retry settings for downloads.
    pub download_retry: RetrySettings,
    /// Download into a temporary sibling file and rename on success.
    pub atomic_download: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            download_retry: RetrySettings::default(),
            atomic_download: true,
        }
    }
}

impl TransferConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of download attempts.
    pub fn with_download_attempts(mut self, max_attempts: u32) -> Self {
        self.download_retry.max_attempts = max_attempts;
        self
    }

    /// Set download retry settings.
    pub fn with_download_retry(mut self, retry: RetrySettings) -> Self {
        self.download_retry = retry;
        self
    }

    /// Enable or disable downloading through a temporary file.
    pub fn with_atomic_download(mut self, atomic: bool) -> Self {
        self.atomic_download = atomic;
        self
    }
}

/// Moves a single file to or from a single object.
#[async_trait]
pub trait TransferManager: Send + Sync {
    /// Upload a local file to `bucket/key`.
    async fn upload_file(
        &self,
        filename: &str,
        bucket: &str,
        key: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
    ) -> Result<TransferResult, StorageError>;

    /// Download `bucket/key` to a local file.
    async fn download_file(
        &self,
        bucket: &str,
        key: &str,
        filename: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
    ) -> Result<TransferResult, StorageError>;
}

/// Builds a transfer manager bound to a client for a single call.
pub trait TransferManagerFactory<C: StorageClient + ?Sized>: Send + Sync {
    /// Create a manager.
    ///
    /// # Arguments
    /// * `client` - Client the manager issues requests through
    /// * `config` - Caller-supplied configuration; `None` means the manager's default
    fn create<'a>(
        &self,
        client: &'a C,
        config: Option<TransferConfig>,
    ) -> Box<dyn TransferManager + 'a>;
}

/// Factory for [`S3Transfer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct S3TransferFactory;

impl<C: StorageClient + ?Sized> TransferManagerFactory<C> for S3TransferFactory {
    fn create<'a>(
        &self,
        client: &'a C,
        config: Option<TransferConfig>,
    ) -> Box<dyn TransferManager + 'a> {
        Box::new(S3Transfer::new(client, config))
    }
}

/// Transfer manager issuing one request per transfer through a `StorageClient`.
pub struct S3Transfer<'a, C: StorageClient + ?Sized> {
    /// The storage client for S3 operations.
    client: &'a C,
    /// Transfer configuration.
    config: TransferConfig,
}

impl<'a, C: StorageClient + ?Sized> S3Transfer<'a, C> {
    /// Create a new transfer manager.
    ///
    /// # Arguments
    /// * `client` - Storage client for S3 operations
    /// * `config` - Transfer configuration, defaults when `None`
    pub fn new(client: &'a C, config: Option<TransferConfig>) -> Self {
        Self {
            client,
            config: config.unwrap_or_default(),
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Download with retries into `target`.
    async fn download_with_retries(
        &self,
        bucket: &str,
        key: &str,
        target: &str,
        extra_args: &ExtraArgs,
        callback: Option<&dyn TransferCallback>,
    ) -> Result<u64, StorageError> {
        let retry: &RetrySettings = &self.config.download_retry;
        let max_attempts: u32 = retry.max_attempts.max(1);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match self
                .client
                .get_object_to_file(bucket, key, target, extra_args, callback)
                .await
            {
                Ok(bytes) => return Ok(bytes),
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    let delay: u64 = retry.backoff_ms(attempt);
                    log::warn!(
                        "Download of s3://{}/{} failed (attempt {}/{}), retrying in {}ms: {}",
                        bucket,
                        key,
                        attempt,
                        max_attempts,
                        delay,
                        err
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl<'a, C: StorageClient + ?Sized> TransferManager for S3Transfer<'a, C> {
    async fn upload_file(
        &self,
        filename: &str,
        bucket: &str,
        key: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
    ) -> Result<TransferResult, StorageError> {
        let default_args = ExtraArgs::default();
        let extra_args: &ExtraArgs = extra_args.unwrap_or(&default_args);
        validate_extra_args(extra_args, ALLOWED_UPLOAD_ARGS)?;

        let is_file: bool = tokio::fs::metadata(filename)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(StorageError::IoError {
                path: filename.to_string(),
                message: "File not found".to_string(),
            });
        }

        log::debug!("Uploading {} to s3://{}/{}", filename, bucket, key);
        let bytes_transferred: u64 = self
            .client
            .put_object_from_file(bucket, key, filename, extra_args, callback)
            .await?;

        Ok(TransferResult {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes_transferred,
        })
    }

    async fn download_file(
        &self,
        bucket: &str,
        key: &str,
        filename: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
    ) -> Result<TransferResult, StorageError> {
        let default_args = ExtraArgs::default();
        let extra_args: &ExtraArgs = extra_args.unwrap_or(&default_args);
        validate_extra_args(extra_args, ALLOWED_DOWNLOAD_ARGS)?;

        let target: String = if self.config.atomic_download {
            temp_download_path(filename)
        } else {
            filename.to_string()
        };

        log::debug!("Downloading s3://{}/{} to {}", bucket, key, target);
        let outcome: Result<u64, StorageError> = self
            .download_with_retries(bucket, key, &target, extra_args, callback)
            .await;

        let bytes_transferred: u64 = match outcome {
            Ok(bytes) => bytes,
            Err(err) => {
                if self.config.atomic_download {
                    remove_quietly(&target).await;
                }
                return Err(err);
            }
        };

        if self.config.atomic_download {
            if let Err(e) = tokio::fs::rename(&target, filename).await {
                remove_quietly(&target).await;
                return Err(StorageError::io(filename, e));
            }
        }

        Ok(TransferResult {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes_transferred,
        })
    }
}

/// Reject extra arguments that are not in the allow-list.
///
/// # Arguments
/// * `extra_args` - Arguments supplied by the caller
/// * `allowed` - Names accepted by the operation
pub fn validate_extra_args(extra_args: &ExtraArgs, allowed: &[&str]) -> Result<(), StorageError> {
    // User metadata travels in its own map, never as a plain parameter.
    if extra_args.get(ExtraArgs::METADATA).is_some() {
        return Err(StorageError::InvalidConfig {
            message: format!(
                "'{}' must be set with ExtraArgs::with_metadata, not as a parameter",
                ExtraArgs::METADATA
            ),
        });
    }

    for name in extra_args.names() {
        if !allowed.contains(&name) {
            return Err(StorageError::InvalidConfig {
                message: format!(
                    "Invalid extra_args key '{}', must be one of: {}",
                    name,
                    allowed.join(", ")
                ),
            });
        }
    }
    Ok(())
}

/// Temporary sibling path used while a download is in flight.
fn temp_download_path(filename: &str) -> String {
    let id: String = uuid::Uuid::new_v4().simple().to_string();
    format!("{}.{}", filename, &id[..TEMP_SUFFIX_LEN])
}

async fn remove_quietly(path: &str) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            log::warn!("Failed to remove temporary file {}: {}", path, e);
        }
    }
}
