//! Store provider backed by aws-sdk-s3
//!
//! Holds the process-wide credentials and provider settings, and builds an
//! [`S3Client`] for the endpoint each locator points at.

use std::sync::Arc;

use async_trait::async_trait;

use spc_core::{Credentials, ObjectStore, ProviderConfig, Result, StorageLocator, StoreProvider};

use crate::client::S3Client;

/// Builds S3 clients from explicit configuration
#[derive(Debug, Clone)]
pub struct S3Provider {
    credentials: Credentials,
    provider: ProviderConfig,
}

impl S3Provider {
    /// Create a provider from resolved credentials and provider settings
    pub fn new(credentials: Credentials, provider: ProviderConfig) -> Self {
        Self {
            credentials,
            provider,
        }
    }

    /// Endpoint a client for `locator` would use
    pub fn endpoint_for(&self, locator: &StorageLocator) -> String {
        locator.endpoint(&self.provider.domain)
    }
}

#[async_trait]
impl StoreProvider for S3Provider {
    async fn store_for(&self, locator: &StorageLocator) -> Result<Arc<dyn ObjectStore>> {
        let endpoint = self.endpoint_for(locator);
        let client =
            S3Client::new(&endpoint, &locator.region, &self.credentials, &self.provider).await?;
        Ok(Arc::new(client))
    }
}
