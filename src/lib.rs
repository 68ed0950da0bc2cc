pub mod storage;

pub use storage::{
    CertStorage, InMemoryObjectStore, KeyNamespace, LocalFsObjectStore, ObjectStore, SiteRecord,
    StorageConfig, StorageError, UserRecord, Waiter,
};
