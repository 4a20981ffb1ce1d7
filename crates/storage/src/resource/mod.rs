//! Client-side resource handles.
//!
//! - [`S3Resource`] - entry point owning the client and the transfer factory
//! - [`Bucket`] - a bucket by name, with lazily loaded metadata
//! - [`Object`] - an object by bucket and key
//!
//! Handles share the client and factory through `Arc`, so creating them is
//! cheap and performs no I/O.

mod bucket;
mod object;
mod service;

pub use bucket::{find_bucket_by_name, Bucket, LIST_BUCKETS_OPERATION};
pub use object::Object;
pub use service::S3Resource;

/// Metadata cache held by a resource handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMeta<T> {
    data: Option<T>,
}

impl<T> Default for ResourceMeta<T> {
    fn default() -> Self {
        Self { data: None }
    }
}

impl<T> ResourceMeta<T> {
    /// Cached data, if loaded.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Replace the cached data wholesale.
    pub fn replace(&mut self, data: T) {
        self.data = Some(data);
    }

    /// True once data has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }
}
