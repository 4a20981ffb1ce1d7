//! AWS SDK S3 backend for rusty-resources storage.
//!
//! This crate provides a `StorageClient` implementation using the AWS SDK for Rust.
//! It supports the bucket listing and single-file transfers that resource
//! handles rely on.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use rusty_resources_storage::{S3Resource, StorageSettings};
//! use rusty_resources_storage_crt::CrtStorageClient;
//!
//! let settings = StorageSettings::default().with_region("us-east-1");
//! let client = CrtStorageClient::new(settings).await?;
//!
//! let resource = S3Resource::new(Arc::new(client));
//! let mut bucket = resource.bucket("my-bucket");
//! bucket.load().await?;
//! ```

mod args;
mod client;
mod error;

pub use client::CrtStorageClient;
pub use error::CrtError;
