//! Certificate Storage
//!
//! Pluggable persistence for a TLS certificate-management subsystem: ACME
//! account data and per-domain certificate bundles live in an object store,
//! and an advisory named-lock table coordinates issuance within one process.
//!
//! ## Architecture
//!
//! ```text
//! caller → CertStorage → KeyNamespace → ObjectStore → record codec
//!              ↓
//!          LockTable (orthogonal, never touches the store)
//! ```
//!
//! ## Key Properties
//!
//! - **Not-found classification**: adapter not-found becomes
//!   `StorageError::NotExist`, so callers can branch on "issue" vs "retry"
//! - **Swappable backends**: in-memory for tests, local filesystem for
//!   development, S3 for production (`s3` feature)
//! - **Interoperable layout**: keys and JSON payload shape match data
//!   already in storage

pub mod config;
pub mod error;
pub mod keys;
pub mod locks;
pub mod object_store;
pub mod records;
pub mod store;
#[cfg(feature = "s3")]
pub mod s3_store;

pub use config::{ObjectStoreType, StorageConfig};
pub use error::StorageError;
pub use keys::KeyNamespace;
pub use locks::{LockTable, Waiter};
pub use object_store::{InMemoryObjectStore, LocalFsObjectStore, ObjectStore};
pub use records::{SiteRecord, UserRecord};
pub use store::CertStorage;
#[cfg(feature = "s3")]
pub use config::S3Config;
#[cfg(feature = "s3")]
pub use s3_store::S3ObjectStore;
