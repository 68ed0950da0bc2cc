//! S3 Object Store Implementation
//!
//! Production backend for certificate storage, built on the `object_store`
//! crate from the Arrow ecosystem.
//!
//! Supports:
//! - AWS S3
//! - S3-compatible services (MinIO, LocalStack, etc.)
//! - Custom endpoints
//!
//! All writes request AES256 server-side encryption, so certificate private
//! keys are encrypted at rest. Note that S3 itself treats deletion of a
//! missing key as success, so `delete` through this backend is effectively
//! idempotent even though the facade makes no such promise.

use crate::storage::config::S3Config;
use crate::storage::object_store::ObjectStore;
use object_store::aws::{AmazonS3Builder, AmazonS3ConfigKey};
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore as ObjectStoreTrait;
use std::future::Future;
use std::io::{Error as IoError, ErrorKind, Result as IoResult};
use std::pin::Pin;
use std::sync::Arc;

/// S3 object store for production deployments.
#[derive(Clone)]
pub struct S3ObjectStore {
    store: Arc<dyn ObjectStoreTrait>,
}

impl S3ObjectStore {
    /// Create a new S3 object store.
    ///
    /// Credentials come from the environment:
    /// - AWS_ACCESS_KEY_ID
    /// - AWS_SECRET_ACCESS_KEY
    pub fn new(config: &S3Config) -> IoResult<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region);

        // Use custom endpoint for S3-compatible services (MinIO)
        if let Some(endpoint) = &config.endpoint {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }

        builder = builder
            .with_access_key_id(std::env::var("AWS_ACCESS_KEY_ID").unwrap_or_default())
            .with_secret_access_key(std::env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default());

        // Request at-rest encryption on every write
        let sse_key: AmazonS3ConfigKey = "aws_server_side_encryption"
            .parse()
            .map_err(|e| IoError::new(ErrorKind::InvalidInput, format!("SSE config: {}", e)))?;
        builder = builder.with_config(sse_key, "AES256");

        let store = builder.build().map_err(|e| {
            IoError::new(
                ErrorKind::InvalidInput,
                format!("Failed to create S3 store: {}", e),
            )
        })?;

        tracing::info!(bucket = %config.bucket, region = %config.region, "S3 store ready");

        Ok(S3ObjectStore {
            store: Arc::new(store),
        })
    }

    /// Create from an existing object store (for testing).
    pub fn from_store(store: Arc<dyn ObjectStoreTrait>) -> Self {
        S3ObjectStore { store }
    }

    /// Convert object_store errors to IoError, keeping the not-found
    /// classification the facade depends on.
    fn map_error(err: object_store::Error) -> IoError {
        match &err {
            object_store::Error::NotFound { .. } => {
                IoError::new(ErrorKind::NotFound, err.to_string())
            }
            object_store::Error::AlreadyExists { .. } => {
                IoError::new(ErrorKind::AlreadyExists, err.to_string())
            }
            object_store::Error::Precondition { .. } => {
                IoError::new(ErrorKind::InvalidInput, err.to_string())
            }
            _ => IoError::new(ErrorKind::Other, err.to_string()),
        }
    }
}

impl std::fmt::Debug for S3ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ObjectStore").finish()
    }
}

impl ObjectStore for S3ObjectStore {
    fn put<'a>(
        &'a self,
        key: &'a str,
        data: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = IoResult<()>> + Send + 'a>> {
        Box::pin(async move {
            let path = ObjectPath::from(key);
            self.store
                .put(&path, bytes::Bytes::copy_from_slice(data).into())
                .await
                .map_err(Self::map_error)?;
            Ok(())
        })
    }

    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            let path = ObjectPath::from(key);
            let result = self.store.get(&path).await.map_err(Self::map_error)?;
            let data = result.bytes().await.map_err(Self::map_error)?;
            Ok(data.to_vec())
        })
    }

    fn exists<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<bool>> + Send + 'a>> {
        Box::pin(async move {
            let path = ObjectPath::from(key);
            match self.store.head(&path).await {
                Ok(_) => Ok(true),
                Err(object_store::Error::NotFound { .. }) => Ok(false),
                Err(e) => Err(Self::map_error(e)),
            }
        })
    }

    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<()>> + Send + 'a>> {
        Box::pin(async move {
            let path = ObjectPath::from(key);
            self.store.delete(&path).await.map_err(Self::map_error)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::object_store::ObjectStore as _;

    // Exercises this backend's trait impl against the crate's wrapping of
    // an in-memory object_store, without a network dependency.
    #[tokio::test]
    async fn test_s3_backend_over_memory_store() {
        let inner = Arc::new(object_store::memory::InMemory::new());
        let store = S3ObjectStore::from_store(inner);

        store.put("acme/ca/domain/a.com", b"payload").await.unwrap();
        assert!(store.exists("acme/ca/domain/a.com").await.unwrap());
        assert_eq!(store.get("acme/ca/domain/a.com").await.unwrap(), b"payload");

        store.delete("acme/ca/domain/a.com").await.unwrap();
        assert!(!store.exists("acme/ca/domain/a.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_key_maps_to_not_found() {
        let inner = Arc::new(object_store::memory::InMemory::new());
        let store = S3ObjectStore::from_store(inner);

        let err = store.get("acme/ca/domain/a.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
