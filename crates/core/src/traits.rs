//! ObjectStore and StoreProvider trait definitions
//!
//! These traits define the interface for S3-compatible storage operations.
//! They allow the CLI to be decoupled from the specific S3 SDK implementation.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::locator::StorageLocator;

/// Metadata for an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,

    /// Human-readable size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_human: Option<String>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Storage class
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for an object of known size
    pub fn file(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: Some(size),
            size_human: Some(humansize::format_size(size.max(0) as u64, humansize::BINARY)),
            last_modified: None,
            etag: None,
            storage_class: None,
            content_type: None,
        }
    }
}

/// Result of a list operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResult {
    /// Listed objects
    pub items: Vec<ObjectInfo>,

    /// Whether the service holds more keys than were returned
    pub truncated: bool,
}

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `data` as a single request to `target.bucket`/`target.key`
    async fn put_object(
        &self,
        target: &StorageLocator,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo>;

    /// List the first page of objects in the bucket of `bucket`
    async fn list_objects(&self, bucket: &StorageLocator) -> Result<ListResult>;

    /// Delete the object at `target.bucket`/`target.key`
    async fn delete_object(&self, target: &StorageLocator) -> Result<()>;
}

/// Hands out a store able to serve a given locator
///
/// Locators from different regions need different service endpoints, so
/// each operation asks the provider for a store per locator.
#[async_trait]
pub trait StoreProvider: Send + Sync {
    /// Get a store connected to the endpoint serving `locator`
    async fn store_for(&self, locator: &StorageLocator) -> Result<Arc<dyn ObjectStore>>;
}
