//! spc-core: Core library for the spc Spaces CLI client
//!
//! This crate provides the core functionality for the spc CLI, including:
//! - Configuration management
//! - Credential resolution
//! - Decomposition of object URLs into storage locators
//! - ObjectStore and StoreProvider traits for S3 operations
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing the commands to be tested against mocked stores.

pub mod config;
pub mod credentials;
pub mod error;
pub mod locator;
pub mod traits;

pub use config::{Config, ConfigManager, ProviderConfig, TimeoutConfig};
pub use credentials::Credentials;
pub use error::{Error, Result};
pub use locator::{decompose, StorageLocator, DEFAULT_PROVIDER_DOMAIN};
pub use traits::{ListResult, ObjectInfo, ObjectStore, StoreProvider};
