//! In-memory `StorageClient` and a recording transfer manager for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{ClientError, StorageError};
use crate::traits::{StorageClient, TransferCallback};
use crate::transfer::{TransferConfig, TransferManager, TransferManagerFactory};
use crate::types::{BucketInfo, ExtraArgs, OperationType, TransferProgress, TransferResult};

/// Records calls and serves objects from memory.
#[derive(Default)]
pub(crate) struct MockStorageClient {
    buckets: Mutex<Vec<BucketInfo>>,
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    download_failures: Mutex<VecDeque<StorageError>>,
    put_args: Mutex<Vec<ExtraArgs>>,
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
}

impl MockStorageClient {
    pub(crate) fn with_buckets(buckets: Vec<BucketInfo>) -> Self {
        let client = Self::default();
        client.set_buckets(buckets);
        client
    }

    pub(crate) fn set_buckets(&self, buckets: Vec<BucketInfo>) {
        *self.buckets.lock().unwrap() = buckets;
    }

    pub(crate) fn insert_object(&self, bucket: &str, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data.to_vec());
    }

    pub(crate) fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Queue an error for the next download; the partial file is left behind.
    pub(crate) fn fail_next_download(&self, err: StorageError) {
        self.download_failures.lock().unwrap().push_back(err);
    }

    pub(crate) fn last_put_args(&self) -> Option<ExtraArgs> {
        self.put_args.lock().unwrap().last().cloned()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

/// Report a whole transfer as one update; returns the callback's verdict.
fn report(
    progress: Option<&dyn TransferCallback>,
    operation: OperationType,
    key: &str,
    bytes: u64,
) -> bool {
    progress.map_or(true, |cb| {
        cb.on_progress(&TransferProgress {
            operation,
            key: key.to_string(),
            bytes_amount: bytes,
            bytes_transferred: bytes,
            total_bytes: Some(bytes),
        })
    })
}

#[async_trait]
impl StorageClient for MockStorageClient {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>, StorageError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.buckets.lock().unwrap().clone())
    }

    async fn put_object_from_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &str,
        extra_args: &ExtraArgs,
        progress: Option<&dyn TransferCallback>,
    ) -> Result<u64, StorageError> {
        let data: Vec<u8> = tokio::fs::read(file_path)
            .await
            .map_err(|e| StorageError::io(file_path, e))?;
        let size: u64 = data.len() as u64;
        self.put_args.lock().unwrap().push(extra_args.clone());
        self.insert_object(bucket, key, &data);
        // The object is already stored, so the verdict cannot cancel anything.
        report(progress, OperationType::Uploading, key, size);
        Ok(size)
    }

    async fn get_object_to_file(
        &self,
        bucket: &str,
        key: &str,
        file_path: &str,
        _extra_args: &ExtraArgs,
        progress: Option<&dyn TransferCallback>,
    ) -> Result<u64, StorageError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);

        let failure: Option<StorageError> = self.download_failures.lock().unwrap().pop_front();
        if let Some(err) = failure {
            tokio::fs::write(file_path, b"partial")
                .await
                .map_err(|e| StorageError::io(file_path, e))?;
            return Err(err);
        }

        let data: Vec<u8> = self.object(bucket, key).ok_or_else(|| {
            StorageError::from(ClientError::new(
                "NoSuchKey",
                "The specified key does not exist.",
                "GetObject",
            ))
        })?;
        tokio::fs::write(file_path, &data)
            .await
            .map_err(|e| StorageError::io(file_path, e))?;
        if !report(progress, OperationType::Downloading, key, data.len() as u64) {
            return Err(StorageError::Cancelled);
        }
        Ok(data.len() as u64)
    }
}

/// Arguments a `RecordingManager` received, plus the config its factory got.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub(crate) operation: OperationType,
    pub(crate) filename: String,
    pub(crate) bucket: String,
    pub(crate) key: String,
    pub(crate) extra_args: Option<ExtraArgs>,
    pub(crate) config: Option<TransferConfig>,
    pub(crate) had_callback: bool,
}

impl RecordedCall {
    pub(crate) fn upload(filename: &str, bucket: &str, key: &str) -> Self {
        Self {
            operation: OperationType::Uploading,
            filename: filename.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
            extra_args: None,
            config: None,
            had_callback: false,
        }
    }

    pub(crate) fn download(bucket: &str, key: &str, filename: &str) -> Self {
        Self {
            operation: OperationType::Downloading,
            ..Self::upload(filename, bucket, key)
        }
    }
}

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<RecordedCall>>,
    created: AtomicUsize,
    failure: Option<StorageError>,
}

/// Factory whose managers record their arguments instead of transferring.
#[derive(Clone, Default)]
pub(crate) struct RecordingFactory {
    recorder: Arc<Recorder>,
}

impl RecordingFactory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Managers return `err` from every call.
    pub(crate) fn failing(err: StorageError) -> Self {
        Self {
            recorder: Arc::new(Recorder {
                failure: Some(err),
                ..Default::default()
            }),
        }
    }

    /// The result every successful manager call returns.
    pub(crate) fn result(&self) -> TransferResult {
        TransferResult {
            bucket: "recorded-bucket".to_string(),
            key: "recorded-key".to_string(),
            bytes_transferred: 1234,
        }
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.recorder.calls.lock().unwrap().clone()
    }

    pub(crate) fn managers_created(&self) -> usize {
        self.recorder.created.load(Ordering::SeqCst)
    }
}

impl<C: StorageClient + ?Sized> TransferManagerFactory<C> for RecordingFactory {
    fn create<'a>(
        &self,
        _client: &'a C,
        config: Option<TransferConfig>,
    ) -> Box<dyn TransferManager + 'a> {
        self.recorder.created.fetch_add(1, Ordering::SeqCst);
        Box::new(RecordingManager {
            factory: self.clone(),
            config,
        })
    }
}

struct RecordingManager {
    factory: RecordingFactory,
    config: Option<TransferConfig>,
}

impl RecordingManager {
    fn record(
        &self,
        mut call: RecordedCall,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
    ) -> Result<TransferResult, StorageError> {
        call.extra_args = extra_args.cloned();
        call.config = self.config.clone();
        call.had_callback = callback.is_some();
        if let Some(cb) = callback {
            let update = TransferProgress {
                operation: call.operation,
                key: call.key.clone(),
                bytes_amount: 0,
                bytes_transferred: 0,
                total_bytes: None,
            };
            cb.on_progress(&update);
        }
        self.factory.recorder.calls.lock().unwrap().push(call);

        match self.factory.recorder.failure {
            Some(ref err) => Err(err.clone()),
            None => Ok(self.factory.result()),
        }
    }
}

#[async_trait]
impl TransferManager for RecordingManager {
    async fn upload_file(
        &self,
        filename: &str,
        bucket: &str,
        key: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
    ) -> Result<TransferResult, StorageError> {
        self.record(RecordedCall::upload(filename, bucket, key), extra_args, callback)
    }

    async fn download_file(
        &self,
        bucket: &str,
        key: &str,
        filename: &str,
        extra_args: Option<&ExtraArgs>,
        callback: Option<&dyn TransferCallback>,
    ) -> Result<TransferResult, StorageError> {
        self.record(RecordedCall::download(bucket, key, filename), extra_args, callback)
    }
}
