use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use super::StoreContext;
use crate::bus::Subscription;

/// A single value stored under a well-known key, such as the portal logo or
/// the signed-in user.
pub trait SlotValue: Serialize + DeserializeOwned + Clone + Send + 'static {
    const STORAGE_KEY: &'static str;
}

/// Get/set/clear over one JSON value, with the same notify-and-refresh
/// behaviour as an entity store.
pub struct ValueSlot<T: SlotValue> {
    ctx: StoreContext,
    subscription: Subscription,
    value: Option<T>,
}

impl<T: SlotValue> ValueSlot<T> {
    pub fn open(ctx: StoreContext) -> Self {
        let value = Self::load_with(&ctx);
        let subscription = ctx.bus().subscribe(T::STORAGE_KEY);
        Self {
            ctx,
            subscription,
            value,
        }
    }

    pub fn key(&self) -> &'static str {
        T::STORAGE_KEY
    }

    /// Current in-memory value.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Read the persisted value. Missing, unreadable or malformed data all
    /// read as `None`.
    pub fn load(&self) -> Option<T> {
        Self::load_with(&self.ctx)
    }

    pub fn set(&mut self, value: T) {
        match serde_json::to_string(&value) {
            Ok(json) => {
                let old_value = self.raw();
                self.ctx.persist(T::STORAGE_KEY, old_value, json);
            }
            Err(e) => warn!(key = T::STORAGE_KEY, error = %e, "Failed to serialize value"),
        }
        self.value = Some(value);
    }

    pub fn clear(&mut self) {
        let old_value = self.raw();
        self.ctx.remove(T::STORAGE_KEY, old_value);
        self.value = None;
    }

    /// Reload if the key changed since the last call.
    pub fn refresh(&mut self) -> bool {
        if self.subscription.drain() {
            self.value = self.load();
            true
        } else {
            false
        }
    }

    fn raw(&self) -> Option<String> {
        match self.ctx.storage().get_item(T::STORAGE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = T::STORAGE_KEY, error = %e, "Failed to read previous value");
                None
            }
        }
    }

    fn load_with(ctx: &StoreContext) -> Option<T> {
        let raw = match ctx.storage().get_item(T::STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = T::STORAGE_KEY, error = %e, "Failed to read value");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = T::STORAGE_KEY, error = %e, "Failed to parse value");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde::Deserialize;

    use super::*;
    use crate::bus::ChangeBus;
    use crate::clock::SystemClock;
    use crate::storage::{MemoryStorage, StorageArea};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Banner {
        text: String,
    }

    impl SlotValue for Banner {
        const STORAGE_KEY: &'static str = "banner";
    }

    fn ctx(storage: Arc<MemoryStorage>) -> StoreContext {
        StoreContext::new(storage, ChangeBus::new(), Arc::new(SystemClock))
    }

    #[test]
    fn test_set_get_clear() {
        let storage = Arc::new(MemoryStorage::new());
        let mut slot = ValueSlot::<Banner>::open(ctx(storage.clone()));
        assert!(slot.get().is_none());

        let banner = Banner {
            text: "Social audit calendar released".to_string(),
        };
        slot.set(banner.clone());
        assert_eq!(slot.get(), Some(&banner));
        assert_eq!(slot.load(), Some(banner));

        slot.clear();
        assert!(slot.get().is_none());
        assert_eq!(storage.get_item("banner").unwrap(), None);
    }

    #[test]
    fn test_malformed_value_reads_none() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("banner", "[1,2]").unwrap();
        let slot = ValueSlot::<Banner>::open(ctx(storage));
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_clear_reaches_other_session() {
        let storage = Arc::new(MemoryStorage::new());
        let base = ctx(storage);
        let mut tab_a = ValueSlot::<Banner>::open(base.fork());
        tab_a.set(Banner {
            text: "hello".to_string(),
        });

        let mut tab_b = ValueSlot::<Banner>::open(base.fork());
        assert!(tab_b.get().is_some());

        tab_a.clear();
        assert!(tab_b.refresh());
        assert!(tab_b.get().is_none());
    }

    #[test]
    fn test_unreadable_storage_keeps_session_value() {
        let ctx = StoreContext::new(
            Arc::new(MemoryStorage::unavailable()),
            ChangeBus::new(),
            Arc::new(SystemClock),
        );
        let mut slot = ValueSlot::<Banner>::open(ctx);
        let banner = Banner {
            text: "offline".to_string(),
        };
        slot.set(banner.clone());
        assert_eq!(slot.get(), Some(&banner));
        assert!(slot.load().is_none());

        slot.clear();
        assert!(slot.get().is_none());
    }
}
