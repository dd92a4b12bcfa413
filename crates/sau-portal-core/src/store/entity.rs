use serde::{de::DeserializeOwned, Serialize};

use super::Record;

/// A record type kept as one JSON array under a well-known storage key.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + 'static {
    const STORAGE_KEY: &'static str;

    /// Records written the first time the collection is read and its key is
    /// absent. Most collections start empty.
    fn seed() -> Vec<Record<Self>> {
        Vec::new()
    }

    /// Ordering applied to the in-memory view on every load and mutation.
    fn sort(_records: &mut [Record<Self>]) {}

    /// Short human-readable label for listings.
    fn title(&self) -> String;
}
