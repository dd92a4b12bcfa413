use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{StorageArea, StorageError};

/// In-process storage area. Wrap it in an `Arc` and hand clones to every
/// session that should see the same origin.
#[derive(Debug)]
pub struct MemoryStorage {
    items: RwLock<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
    available: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            quota_bytes: None,
            available: true,
        }
    }

    /// Storage that rejects writes once keys plus values exceed `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota_bytes: Some(limit),
            ..Self::new()
        }
    }

    /// Storage where every operation fails, as in a private-browsing window
    /// or a context with no storage at all.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, String>>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable("storage is disabled".to_string()));
        }
        self.items
            .read()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, String>>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable("storage is disabled".to_string()));
        }
        self.items
            .write()
            .map_err(|_| StorageError::Unavailable("storage lock poisoned".to_string()))
    }
}

impl StorageArea for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.write()?;

        if let Some(limit) = self.quota_bytes {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.write()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.read()?.keys().cloned().collect())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.write()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("feedbacks").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        storage.set_item("holidays", "[]").unwrap();
        assert_eq!(storage.get_item("holidays").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.keys().unwrap(), vec!["holidays".to_string()]);

        storage.remove_item("holidays").unwrap();
        assert_eq!(storage.get_item("holidays").unwrap(), None);
        // Removing again is fine
        storage.remove_item("holidays").unwrap();
    }

    #[test]
    fn test_quota_exceeded() {
        // "audits" (6) + "[]" (2) fits, a longer value does not
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("audits", "[]").unwrap();

        let err = storage.set_item("audits", "[1,2,3,4,5]").unwrap_err();
        match err {
            StorageError::QuotaExceeded { key, needed, limit } => {
                assert_eq!(key, "audits");
                assert_eq!(needed, 17);
                assert_eq!(limit, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Previous value survives a rejected write
        assert_eq!(storage.get_item("audits").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "123456789").unwrap();
        // Replacing the same key does not count the old value
        storage.set_item("k", "987654321").unwrap();
    }

    #[test]
    fn test_unavailable_storage_fails_everything() {
        let storage = MemoryStorage::unavailable();
        assert!(matches!(
            storage.get_item("logo"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.set_item("logo", "{}").is_err());
        assert!(storage.keys().is_err());
        assert!(storage.clear().is_err());
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::new();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        storage.clear().unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }
}
