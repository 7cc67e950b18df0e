//! spc-s3: S3 SDK adapter for the spc CLI client
//!
//! This crate provides the implementation of the ObjectStore and
//! StoreProvider traits using the aws-sdk-s3 crate. It is the only crate
//! that directly depends on the AWS SDK.

pub mod client;
pub mod provider;

pub use client::S3Client;
pub use provider::S3Provider;
