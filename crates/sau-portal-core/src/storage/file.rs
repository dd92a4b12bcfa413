use std::path::{Path, PathBuf};

use tracing::debug;

use super::{StorageArea, StorageError};

const FILE_EXTENSION: &str = "json";

/// Storage area backed by a directory, one `<key>.json` file per key.
///
/// Keys map directly onto file names, so only ASCII letters, digits, `-`
/// and `_` are accepted; any other key fails with `StorageError::InvalidKey`.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// reader never sees a half-written document.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            quota_bytes: None,
        })
    }

    pub fn with_quota(mut self, limit: usize) -> Self {
        self.quota_bytes = Some(limit);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.{}", key, FILE_EXTENSION)))
    }

    fn entries(&self) -> Result<Vec<(String, PathBuf)>, StorageError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                entries.push((stem.to_string(), path.clone()));
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn usage_excluding(&self, key: &str) -> Result<usize, StorageError> {
        let mut total = 0;
        for (stem, path) in self.entries()? {
            if stem == key {
                continue;
            }
            total += stem.len() + std::fs::metadata(&path)?.len() as usize;
        }
        Ok(total)
    }
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

impl StorageArea for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.item_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        if let Some(limit) = self.quota_bytes {
            let needed = self.usage_excluding(key)? + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        debug!(key, bytes = value.len(), "Wrote storage item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.item_path(key)?;
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries()?.into_iter().map(|(stem, _)| stem).collect())
    }

    fn clear(&self) -> Result<(), StorageError> {
        for (_, path) in self.entries()? {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
