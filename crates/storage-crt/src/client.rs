//! AWS SDK S3 client implementation.

use std::path::Path;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use rusty_resources_storage::{
    BucketInfo, ExtraArgs, OperationType, StorageClient, StorageError, StorageSettings,
    TransferCallback, TransferProgress,
};

use crate::args::{apply_get_args, apply_put_args};
use crate::error::{sdk_error, CrtError};

/// StorageClient implementation using AWS SDK for Rust.
///
/// This client provides S3 operations with automatic retry, connection
/// pooling, and streaming support for large files.
#[derive(Debug, Clone)]
pub struct CrtStorageClient {
    /// The underlying S3 client.
    s3_client: S3Client,
    /// Expected bucket owner for security validation.
    expected_bucket_owner: Option<String>,
}

impl CrtStorageClient {
    /// Create a new CRT storage client with default credential chain.
    ///
    /// # Arguments
    /// * `settings` - Storage settings including region and optional credentials
    ///
    /// # Returns
    /// A new CRT storage client.
    pub async fn new(settings: StorageSettings) -> Result<Self, StorageError> {
        if settings.region.trim().is_empty() {
            return Err(CrtError::ConfigError("region must not be empty".into()).into());
        }

        let mut config_loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(settings.region.clone()));

        if let Some(ref creds) = settings.credentials {
            let credentials = Credentials::new(
                &creds.access_key_id,
                &creds.secret_access_key,
                creds.session_token.clone(),
                None,
                "rusty-resources",
            );
            config_loader = config_loader.credentials_provider(credentials);
        }

        if let Some(ref endpoint_url) = settings.endpoint_url {
            config_loader = config_loader.endpoint_url(endpoint_url);
        }

        let sdk_config = config_loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.force_path_style)
            .build();

        log::debug!(
            "Created S3 client for region {} (endpoint: {})",
            settings.region,
            settings.endpoint_url.as_deref().unwrap_or("default")
        );

        Ok(Self {
            s3_client: S3Client::from_conf(s3_config),
            expected_bucket_owner: settings.expected_bucket_owner,
        })
    }

    /// Create a client from an existing S3Client (for testing).
    ///
    /// # Arguments
    /// * `s3_client` - Pre-configured S3 client
    /// * `expected_bucket_owner` - Optional expected bucket owner
    pub fn from_client(s3_client: S3Client, expected_bucket_owner: Option<String>) -> Self {
        Self {
            s3_client,
            expected_bucket_owner,
        }
    }
}

#[async_trait]
impl StorageClient for CrtStorageClient {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>, StorageError> {
        let mut buckets: Vec<BucketInfo> = Vec::new();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self.s3_client.list_buckets();

            if let Some(ref token) = continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|err| sdk_error("ListBuckets", err))?;

            for bucket in response.buckets() {
                let creation_date: Option<i64> = bucket
                    .creation_date()
                    .and_then(|dt| dt.to_millis().ok())
                    .map(|ms| ms / 1000);

                buckets.push(BucketInfo {
                    name: bucket.name().unwrap_or_default().to_string(),
                    creation_date,
                    region: bucket.bucket_region().map(|r| r.to_string()),
                });
            }

            match response.continuation_token() {
                Some(token) if !token.is_empty() => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(buckets)
    }

    async fn put_object_from_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &str,
        extra_args: &ExtraArgs,
        progress: Option<&dyn TransferCallback>,
    ) -> Result<u64, StorageError> {
        let size: u64 = tokio::fs::metadata(file_path)
            .await
            .map_err(|e| StorageError::io(file_path, e))?
            .len();

        let body = ByteStream::from_path(Path::new(file_path))
            .await
            .map_err(|e| StorageError::IoError {
                path: file_path.to_string(),
                message: e.to_string(),
            })?;

        let request = self
            .s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body);
        let request = apply_put_args(request, extra_args, self.expected_bucket_owner.as_deref())?;

        request
            .send()
            .await
            .map_err(|err| sdk_error("PutObject", err))?;

        // Single request: the upload is already complete, so the return value
        // cannot cancel anything.
        if let Some(cb) = progress {
            cb.on_progress(&TransferProgress {
                operation: OperationType::Uploading,
                key: key.to_string(),
                bytes_amount: size,
                bytes_transferred: size,
                total_bytes: Some(size),
            });
        }

        Ok(size)
    }

    async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &str,
        extra_args: &ExtraArgs,
        progress: Option<&dyn TransferCallback>,
    ) -> Result<u64, StorageError> {
        let request = self.s3_client.get_object().bucket(bucket).key(key);
        let request = apply_get_args(request, extra_args, self.expected_bucket_owner.as_deref())?;

        let response = request
            .send()
            .await
            .map_err(|err| sdk_error("GetObject", err))?;
        let total_bytes: Option<u64> = response.content_length().map(|l| l as u64);

        // Create parent directories if needed
        if let Some(parent) = Path::new(file_path).parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::io(parent.display().to_string(), e))?;
        }

        let mut file = File::create(file_path)
            .await
            .map_err(|e| StorageError::io(file_path, e))?;

        let mut bytes_transferred: u64 = 0;
        let mut body = response.body;
        while let Some(chunk) = body.try_next().await.map_err(|e| CrtError::SdkError {
            message: e.to_string(),
            retryable: true,
        })? {
            file.write_all(&chunk)
                .await
                .map_err(|e| StorageError::io(file_path, e))?;
            bytes_transferred += chunk.len() as u64;

            if let Some(cb) = progress {
                let update = TransferProgress {
                    operation: OperationType::Downloading,
                    key: key.to_string(),
                    bytes_amount: chunk.len() as u64,
                    bytes_transferred,
                    total_bytes,
                };
                if !cb.on_progress(&update) {
                    return Err(StorageError::Cancelled);
                }
            }
        }

        file.flush()
            .await
            .map_err(|e| StorageError::io(file_path, e))?;

        Ok(bytes_transferred)
    }
}
