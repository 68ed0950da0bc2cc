//! Certificate Storage Facade
//!
//! The public contract consumed by the host TLS engine: existence checks,
//! load/store/delete for site and user records, the most-recent-user
//! pointer, and the advisory named locks guarding issuance.
//!
//! Every adapter not-found on a site/user read is classified as
//! [`StorageError::NotExist`]; the host branches on that to decide between
//! "proceed to issue" and "transient failure, retry". No retries happen in
//! this layer and nothing is logged on the error path, with the single
//! documented exception of [`CertStorage::most_recent_user_email`].

use crate::storage::config::{ObjectStoreType, StorageConfig};
use crate::storage::error::StorageError;
use crate::storage::keys::KeyNamespace;
use crate::storage::locks::{LockTable, Waiter};
use crate::storage::object_store::{InMemoryObjectStore, LocalFsObjectStore, ObjectStore};
use crate::storage::records::{SiteRecord, UserRecord};
use std::io::{Error as IoError, ErrorKind};
use std::sync::Arc;

/// Object-store-backed persistence for ACME certificate management.
pub struct CertStorage {
    store: Arc<dyn ObjectStore>,
    keys: KeyNamespace,
    locks: LockTable,
}

impl CertStorage {
    /// Create a storage facade over the given backend and key namespace.
    pub fn new(store: Arc<dyn ObjectStore>, keys: KeyNamespace) -> Self {
        CertStorage {
            store,
            keys,
            locks: LockTable::new(),
        }
    }

    /// Build the backend named by `config` and wrap it.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let keys = KeyNamespace::new(config.prefix.clone());
        let store: Arc<dyn ObjectStore> = match config.store_type {
            ObjectStoreType::InMemory => Arc::new(InMemoryObjectStore::new()),
            ObjectStoreType::LocalFs => {
                let path = config.local_path.clone().ok_or_else(|| {
                    StorageError::Io(IoError::new(
                        ErrorKind::InvalidInput,
                        "LocalFs store requires local_path",
                    ))
                })?;
                Arc::new(LocalFsObjectStore::new(path))
            }
            #[cfg(feature = "s3")]
            ObjectStoreType::S3 => {
                let s3 = config.s3.as_ref().ok_or_else(|| {
                    StorageError::Io(IoError::new(
                        ErrorKind::InvalidInput,
                        "S3 store requires s3 config",
                    ))
                })?;
                Arc::new(crate::storage::s3_store::S3ObjectStore::new(s3).map_err(StorageError::Io)?)
            }
        };
        Ok(CertStorage::new(store, keys))
    }

    /// True iff certificate data currently exists for `domain`.
    ///
    /// Side-effect free; fails only on adapter errors other than not-found.
    pub async fn site_exists(&self, domain: &str) -> Result<bool, StorageError> {
        let key = self.keys.domain_key(domain);
        self.store
            .exists(&key)
            .await
            .map_err(StorageError::from)
    }

    /// Load the certificate bundle for `domain`.
    ///
    /// Fails with [`StorageError::NotExist`] when no data is stored; a
    /// decode failure never yields a partially populated record.
    pub async fn load_site(&self, domain: &str) -> Result<SiteRecord, StorageError> {
        let key = self.keys.domain_key(domain);
        let data = self.store.get(&key).await?;
        Ok(SiteRecord::decode(&data)?)
    }

    /// Persist the certificate bundle for `domain`, overwriting any prior
    /// value in full. Durability of the prior object on partial-write
    /// failure is the backend's concern, not guaranteed here.
    pub async fn store_site(&self, domain: &str, record: &SiteRecord) -> Result<(), StorageError> {
        let key = self.keys.domain_key(domain);
        let data = record.encode()?;
        self.store.put(&key, &data).await?;
        Ok(())
    }

    /// Delete the certificate bundle for `domain`.
    ///
    /// Adapter errors pass through unchanged, including whatever the
    /// backend reports for an absent key; callers wanting idempotent
    /// delete should check [`CertStorage::site_exists`] first.
    pub async fn delete_site(&self, domain: &str) -> Result<(), StorageError> {
        let key = self.keys.domain_key(domain);
        self.store.delete(&key).await?;
        Ok(())
    }

    /// Load the ACME account stored for `email`.
    pub async fn load_user(&self, email: &str) -> Result<UserRecord, StorageError> {
        let key = self.keys.user_key(email);
        let data = self.store.get(&key).await?;
        Ok(UserRecord::decode(&data)?)
    }

    /// Persist the ACME account for `email`, then update the
    /// most-recent-user pointer.
    ///
    /// The two writes are independent, with no atomicity between them. On a
    /// pointer-write failure the error surfaces even though the record
    /// write already succeeded; callers must treat that as "record may be
    /// stored, pointer may be stale".
    pub async fn store_user(&self, email: &str, record: &UserRecord) -> Result<(), StorageError> {
        let key = self.keys.user_key(email);
        let data = record.encode()?;
        self.store.put(&key, &data).await?;

        let pointer = self.keys.recent_user_key();
        self.store.put(&pointer, email.as_bytes()).await?;
        Ok(())
    }

    /// Email of the most recently stored account, or the empty string if
    /// none was ever stored.
    ///
    /// The one operation that flattens every failure mode to "no value";
    /// "no recent user" and "error reading recent user" are deliberately
    /// indistinguishable for this informational accessor.
    pub async fn most_recent_user_email(&self) -> String {
        let pointer = self.keys.recent_user_key();
        match self.store.get(&pointer).await {
            Ok(data) => String::from_utf8(data).unwrap_or_else(|e| {
                tracing::debug!(error = %e, "recent-user pointer is not valid UTF-8");
                String::new()
            }),
            Err(e) => {
                tracing::debug!(error = %e, "failed to read recent-user pointer");
                String::new()
            }
        }
    }

    /// Attempt to claim the named issuance lock.
    ///
    /// `None` means the caller now holds the claim; `Some(Waiter)` lets the
    /// caller wait for the current holder to release, after which it should
    /// call `try_lock` again. Never blocks.
    pub fn try_lock(&self, name: &str) -> Option<Waiter> {
        self.locks.try_lock(name)
    }

    /// Release the named issuance lock, waking anyone waiting on it.
    pub fn unlock(&self, name: &str) -> Result<(), StorageError> {
        self.locks.unlock(name)
    }
}

impl std::fmt::Debug for CertStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CertStorage")
            .field("prefix", &self.keys.prefix())
            .finish()
    }
}
