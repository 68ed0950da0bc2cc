//! Configuration for Certificate Storage
//!
//! Construction-time inputs for the storage backend. Everything here is
//! resolved once when the store is built; there is no hot-reload.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for certificate storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Object store backend.
    pub store_type: ObjectStoreType,
    /// Key prefix for all objects in the store.
    pub prefix: String,
    /// Local filesystem path (for LocalFs store).
    pub local_path: Option<PathBuf>,
    /// S3 configuration (for S3 store).
    #[cfg(feature = "s3")]
    pub s3: Option<S3Config>,
}

impl StorageConfig {
    /// Config for a given ACME CA host; the prefix keeps data from different
    /// CAs (e.g. staging vs production) apart.
    pub fn for_ca_host(host: &str) -> Self {
        StorageConfig {
            store_type: ObjectStoreType::InMemory,
            prefix: format!("acme/{}", host),
            local_path: None,
            #[cfg(feature = "s3")]
            s3: None,
        }
    }

    /// Config for local development.
    pub fn local(path: PathBuf) -> Self {
        StorageConfig {
            store_type: ObjectStoreType::LocalFs,
            prefix: "acme/local".to_string(),
            local_path: Some(path),
            #[cfg(feature = "s3")]
            s3: None,
        }
    }

    /// Config for testing (in-memory).
    pub fn test() -> Self {
        StorageConfig {
            store_type: ObjectStoreType::InMemory,
            prefix: "acme/test".to_string(),
            local_path: None,
            #[cfg(feature = "s3")]
            s3: None,
        }
    }
}

/// Type of object store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectStoreType {
    /// In-memory store (for tests).
    InMemory,
    /// Local filesystem.
    LocalFs,
    /// Amazon S3 or compatible.
    #[cfg(feature = "s3")]
    S3,
}

/// S3 configuration.
///
/// Credentials are resolved from the AWS environment at construction, not
/// carried in the config.
#[cfg(feature = "s3")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket name.
    pub bucket: String,
    /// AWS region.
    pub region: String,
    /// Custom endpoint (for S3-compatible services like MinIO).
    pub endpoint: Option<String>,
}
