//! Shared data structures for storage operations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default AWS region used when none is configured.
pub const DEFAULT_REGION: &str = "us-west-2";

/// Configuration settings for the low-level storage client.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    /// AWS region.
    pub region: String,
    /// AWS credentials (access key, secret key, session token).
    pub credentials: Option<AwsCredentials>,
    /// Custom endpoint for S3-compatible services.
    pub endpoint_url: Option<String>,
    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`.
    pub force_path_style: bool,
    /// Expected bucket owner, sent with every object request.
    pub expected_bucket_owner: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.into(),
            credentials: None,
            endpoint_url: None,
            force_path_style: false,
            expected_bucket_owner: None,
        }
    }
}

impl StorageSettings {
    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Set static credentials instead of the default provider chain.
    pub fn with_credentials(mut self, credentials: AwsCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Point the client at an S3-compatible endpoint.
    ///
    /// # Arguments
    /// * `endpoint_url` - Endpoint URL, e.g. `http://localhost:9000`
    /// * `force_path_style` - Use path-style bucket addressing
    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>, force_path_style: bool) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self.force_path_style = force_path_style;
        self
    }

    /// Set the expected bucket owner.
    pub fn with_expected_bucket_owner(mut self, owner: impl Into<String>) -> Self {
        self.expected_bucket_owner = Some(owner.into());
        self
    }
}

/// AWS credentials.
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

/// Retry settings for transfer operations.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrySettings {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Initial backoff delay in milliseconds.
    pub initial_backoff_ms: u64,
    /// Maximum backoff delay in milliseconds.
    pub max_backoff_ms: u64,
    /// Backoff multiplier (exponential backoff).
    pub backoff_multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 100,
            max_backoff_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetrySettings {
    /// Backoff delay to wait after the given (1-based) failed attempt.
    pub fn backoff_ms(&self, attempt: u32) -> u64 {
        let exponent: i32 = attempt.saturating_sub(1).min(32) as i32;
        let delay: f64 = self.initial_backoff_ms as f64 * self.backoff_multiplier.powi(exponent);
        (delay as u64).min(self.max_backoff_ms)
    }
}

/// Bucket attributes as returned by a list-buckets record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name.
    pub name: String,
    /// Creation timestamp (Unix epoch seconds).
    pub creation_date: Option<i64>,
    /// Region the bucket lives in, when the service reports it.
    pub region: Option<String>,
}

impl BucketInfo {
    /// Create bucket info with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creation_date: None,
            region: None,
        }
    }

    /// Set the creation timestamp.
    pub fn with_creation_date(mut self, epoch_seconds: i64) -> Self {
        self.creation_date = Some(epoch_seconds);
        self
    }

    /// Set the bucket region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

/// Opaque request parameters forwarded to the transfer manager.
///
/// Parameter names use the service's request field names (`ContentType`,
/// `StorageClass`, `VersionId`, ...). User metadata is kept apart from the
/// scalar parameters and is addressed by the `Metadata` name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraArgs {
    params: BTreeMap<String, String>,
    metadata: BTreeMap<String, String>,
}

impl ExtraArgs {
    /// Name under which user metadata is addressed.
    pub const METADATA: &'static str = "Metadata";

    /// Create an empty set of extra arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a request parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Add a user metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Get a request parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Iterate over request parameters in name order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// User metadata entries.
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Names of everything set, with `Metadata` standing in for user metadata.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let metadata: Option<&str> = if self.metadata.is_empty() {
            None
        } else {
            Some(Self::METADATA)
        };
        self.params.keys().map(String::as_str).chain(metadata)
    }

    /// True when no parameters or metadata are set.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.metadata.is_empty()
    }
}

/// Progress update for a single file transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferProgress {
    /// Type of transfer in progress.
    pub operation: OperationType,
    /// Object key being transferred.
    pub key: String,
    /// Bytes moved since the previous update.
    pub bytes_amount: u64,
    /// Bytes moved so far.
    pub bytes_transferred: u64,
    /// Total size, when known.
    pub total_bytes: Option<u64>,
}

/// Type of operation in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Uploading,
    Downloading,
}

/// Result of a completed file transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferResult {
    /// Bucket the object lives in.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Bytes transferred.
    pub bytes_transferred: u64,
}
