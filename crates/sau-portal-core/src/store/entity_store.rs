use tracing::{debug, warn};

use super::{Entity, Record, RecordId, StoreContext};
use crate::bus::{StorageChange, Subscription};

/// Add/update/delete/list over one JSON-serialized collection, kept in step
/// with every other session on the same bus.
///
/// Every mutation re-reads the full collection from storage rather than
/// trusting the in-memory view, applies the change, writes the whole array
/// back and publishes the change. There is no version check between that
/// read and write, so concurrent writers race and the last write wins.
pub struct EntityStore<T: Entity> {
    ctx: StoreContext,
    subscription: Subscription,
    items: Vec<Record<T>>,
}

impl<T: Entity> EntityStore<T> {
    /// Load the current snapshot, then subscribe to changes for this key.
    pub fn open(ctx: StoreContext) -> Self {
        let items = Self::load_with(&ctx);
        let subscription = ctx.bus().subscribe(T::STORAGE_KEY);
        Self {
            ctx,
            subscription,
            items,
        }
    }

    pub fn key(&self) -> &'static str {
        T::STORAGE_KEY
    }

    pub fn context(&self) -> &StoreContext {
        &self.ctx
    }

    /// Read the persisted collection. Never fails: missing data yields the
    /// seed, unreadable or malformed data yields an empty collection.
    pub fn load(&self) -> Vec<Record<T>> {
        Self::load_with(&self.ctx)
    }

    /// The in-memory view.
    pub fn list(&self) -> &[Record<T>] {
        &self.items
    }

    pub fn get(&self, id: RecordId) -> Option<&Record<T>> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Create a record with `id` set to the current time in milliseconds.
    pub fn add(&mut self, fields: T) -> Record<T> {
        let record = Record::new(RecordId(self.ctx.clock().now_millis()), fields);
        let (old_value, mut records) = Self::read_collection(&self.ctx);
        records.push(record.clone());
        self.commit(old_value, records);
        record
    }

    /// Replace the record whose id matches. An unknown id changes nothing.
    pub fn update(&mut self, record: Record<T>) {
        let (old_value, records) = Self::read_collection(&self.ctx);
        if !records.iter().any(|r| r.id == record.id) {
            debug!(key = T::STORAGE_KEY, id = %record.id, "Update for unknown record id");
        }
        let records = records
            .into_iter()
            .map(|r| if r.id == record.id { record.clone() } else { r })
            .collect();
        self.commit(old_value, records);
    }

    /// Remove the record whose id matches. An unknown id changes nothing.
    pub fn delete(&mut self, id: RecordId) {
        let (old_value, mut records) = Self::read_collection(&self.ctx);
        records.retain(|r| r.id != id);
        self.commit(old_value, records);
    }

    /// Reload the view if any change for this key arrived since the last
    /// call. Returns whether a reload happened.
    pub fn refresh(&mut self) -> bool {
        if self.subscription.drain() {
            self.items = self.load();
            true
        } else {
            false
        }
    }

    /// Wait for the next change to this key, then reload the view.
    pub async fn changed(&mut self) -> Option<StorageChange> {
        let change = self.subscription.recv().await?;
        // Anything queued behind it is folded into this reload
        self.subscription.drain();
        self.items = self.load();
        Some(change)
    }

    fn load_with(ctx: &StoreContext) -> Vec<Record<T>> {
        let (_, mut records) = Self::read_collection(ctx);
        T::sort(&mut records);
        records
    }

    /// Raw stored value plus the parsed records, in stored order.
    fn read_collection(ctx: &StoreContext) -> (Option<String>, Vec<Record<T>>) {
        let raw = match ctx.storage().get_item(T::STORAGE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = T::STORAGE_KEY, error = %e, "Failed to read collection, treating as empty");
                return (None, Vec::new());
            }
        };

        let Some(json) = raw.as_deref() else {
            return (None, Self::seed_collection(ctx));
        };

        match serde_json::from_str::<Vec<Record<T>>>(json) {
            Ok(records) => (raw, records),
            Err(e) => {
                warn!(key = T::STORAGE_KEY, error = %e, "Failed to parse collection, treating as empty");
                (raw, Vec::new())
            }
        }
    }

    /// Write the seed the first time an absent collection is read.
    fn seed_collection(ctx: &StoreContext) -> Vec<Record<T>> {
        let seed = T::seed();
        if seed.is_empty() {
            return seed;
        }
        match serde_json::to_string(&seed) {
            Ok(json) => {
                debug!(key = T::STORAGE_KEY, count = seed.len(), "Seeding collection");
                ctx.persist(T::STORAGE_KEY, None, json);
            }
            Err(e) => warn!(key = T::STORAGE_KEY, error = %e, "Failed to serialize seed"),
        }
        seed
    }

    /// Persist the full collection and adopt it as the view. The view is
    /// updated even when the write fails.
    fn commit(&mut self, old_value: Option<String>, mut records: Vec<Record<T>>) {
        match serde_json::to_string(&records) {
            Ok(json) => {
                self.ctx.persist(T::STORAGE_KEY, old_value, json);
            }
            Err(e) => warn!(key = T::STORAGE_KEY, error = %e, "Failed to serialize collection"),
        }
        T::sort(&mut records);
        self.items = records;
    }
}
