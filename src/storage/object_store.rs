//! Object Store Abstraction
//!
//! Trait-based capability surface over the external object store. The
//! certificate store only ever needs four operations (put, get, exists,
//! delete), so that is the whole trait; keeping it narrow lets the facade be
//! tested against an in-memory fake without a network dependency.
//!
//! Implementations:
//! - `InMemoryObjectStore`: for unit tests
//! - `LocalFsObjectStore`: for development and local testing
//! - `S3ObjectStore`: for production (feature-gated, see `s3_store`)
//!
//! ## Error contract
//!
//! Absence must be reported as `ErrorKind::NotFound`, distinguishable from
//! every other failure. The facade's not-exists classification depends on
//! this; a backend that folds not-found into a generic error breaks the
//! "doesn't exist yet, proceed to issue" branch upstream.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;
use std::io::{Error as IoError, ErrorKind, Result as IoResult};
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

/// Object store capability trait.
pub trait ObjectStore: Send + Sync + 'static {
    /// Put an object (create or overwrite).
    fn put<'a>(
        &'a self,
        key: &'a str,
        data: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = IoResult<()>> + Send + 'a>>;

    /// Get an object's contents. Absence is `ErrorKind::NotFound`.
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<Vec<u8>>> + Send + 'a>>;

    /// Check if an object exists without downloading it.
    fn exists<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<bool>> + Send + 'a>>;

    /// Delete an object.
    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<()>> + Send + 'a>>;
}

// ============================================================================
// InMemoryObjectStore - For tests
// ============================================================================

/// In-memory object store for unit tests.
#[derive(Debug)]
pub struct InMemoryObjectStore {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryObjectStore {
    /// Create a new in-memory object store.
    pub fn new() -> Self {
        InMemoryObjectStore {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the number of stored objects (for testing).
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if empty (for testing).
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Clear all objects (for testing).
    pub fn clear(&self) {
        self.data.write().clear();
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryObjectStore {
    fn clone(&self) -> Self {
        // Clones share the backing map, so a clone handed to the facade can
        // still be inspected by the test that created it.
        InMemoryObjectStore {
            data: Arc::clone(&self.data),
        }
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn put<'a>(
        &'a self,
        key: &'a str,
        data: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = IoResult<()>> + Send + 'a>> {
        Box::pin(async move {
            self.data.write().insert(key.to_string(), data.to_vec());
            Ok(())
        })
    }

    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            self.data
                .read()
                .get(key)
                .cloned()
                .ok_or_else(|| IoError::new(ErrorKind::NotFound, format!("Key not found: {}", key)))
        })
    }

    fn exists<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<bool>> + Send + 'a>> {
        Box::pin(async move { Ok(self.data.read().contains_key(key)) })
    }

    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<()>> + Send + 'a>> {
        Box::pin(async move {
            self.data.write().remove(key);
            Ok(())
        })
    }
}

// ============================================================================
// LocalFsObjectStore - For development
// ============================================================================

/// Local filesystem object store for development and testing.
#[derive(Debug, Clone)]
pub struct LocalFsObjectStore {
    base_path: PathBuf,
}

impl LocalFsObjectStore {
    /// Create a new local filesystem object store.
    pub fn new(base_path: PathBuf) -> Self {
        LocalFsObjectStore { base_path }
    }

    /// Get the full path for a key.
    fn full_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    /// Ensure parent directories exist.
    fn ensure_parent(&self, path: &PathBuf) -> IoResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Get the base path (for testing).
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl ObjectStore for LocalFsObjectStore {
    fn put<'a>(
        &'a self,
        key: &'a str,
        data: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = IoResult<()>> + Send + 'a>> {
        Box::pin(async move {
            let path = self.full_path(key);
            self.ensure_parent(&path)?;
            tokio::fs::write(&path, data).await
        })
    }

    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            let path = self.full_path(key);
            tokio::fs::read(&path).await
        })
    }

    fn exists<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<bool>> + Send + 'a>> {
        Box::pin(async move {
            let path = self.full_path(key);
            Ok(path.exists())
        })
    }

    fn delete<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = IoResult<()>> + Send + 'a>> {
        Box::pin(async move {
            let path = self.full_path(key);
            tokio::fs::remove_file(&path).await
        })
    }
}
