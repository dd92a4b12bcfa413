//! Per-origin key-value storage areas.
//!
//! A storage area holds string values under string keys, the same contract a
//! browser gives each origin. Entity stores keep one serialized JSON document
//! per key in it.
//!
//! Two backends are provided:
//! - `MemoryStorage`: shared in-process map with an optional byte quota
//! - `FileStorage`: one `<key>.json` file per key under a directory

pub mod error;
pub mod file;
pub mod memory;

pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

pub trait StorageArea: Send + Sync {
    /// Returns `None` when the key has never been written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    fn keys(&self) -> Result<Vec<String>, StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}
