use std::sync::Arc;

use tracing::{debug, warn};

use crate::bus::{ChangeBus, SessionId, StorageChange};
use crate::clock::Clock;
use crate::storage::StorageArea;

/// Everything a session needs to open stores: the shared storage area, the
/// shared change bus, a clock, and this session's own id.
///
/// The context is the only publisher on the bus; every successful write made
/// through it is announced.
#[derive(Clone)]
pub struct StoreContext {
    storage: Arc<dyn StorageArea>,
    bus: ChangeBus,
    clock: Arc<dyn Clock>,
    session: SessionId,
}

impl StoreContext {
    pub fn new(storage: Arc<dyn StorageArea>, bus: ChangeBus, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            bus,
            clock,
            session: SessionId::random(),
        }
    }

    /// A new session (another tab) over the same storage, bus and clock.
    pub fn fork(&self) -> Self {
        Self {
            session: SessionId::random(),
            ..self.clone()
        }
    }

    pub fn storage(&self) -> &Arc<dyn StorageArea> {
        &self.storage
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Write `new_value` under `key` and announce it. Returns false if the
    /// storage area rejected the write, in which case nothing is published.
    pub(crate) fn persist(&self, key: &str, old_value: Option<String>, new_value: String) -> bool {
        if let Err(e) = self.storage.set_item(key, &new_value) {
            warn!(key, session = %self.session, error = %e, "Failed to persist to storage");
            return false;
        }
        debug!(key, session = %self.session, bytes = new_value.len(), "Persisted");
        self.bus.publish(StorageChange {
            key: Some(key.to_string()),
            old_value,
            new_value: Some(new_value),
            origin: self.session,
        });
        true
    }

    /// Remove `key` and announce it.
    pub(crate) fn remove(&self, key: &str, old_value: Option<String>) -> bool {
        if let Err(e) = self.storage.remove_item(key) {
            warn!(key, session = %self.session, error = %e, "Failed to remove from storage");
            return false;
        }
        self.bus.publish(StorageChange {
            key: Some(key.to_string()),
            old_value,
            new_value: None,
            origin: self.session,
        });
        true
    }

    /// Clear the whole storage area and announce it to every key.
    pub fn clear_storage(&self) -> bool {
        if let Err(e) = self.storage.clear() {
            warn!(session = %self.session, error = %e, "Failed to clear storage");
            return false;
        }
        self.bus.publish(StorageChange {
            key: None,
            old_value: None,
            new_value: None,
            origin: self.session,
        });
        true
    }
}

impl std::fmt::Debug for StoreContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreContext")
            .field("session", &self.session)
            .field("subscribers", &self.bus.subscriber_count())
            .finish()
    }
}
