//! Entity stores: load a collection snapshot, mutate it, persist it and
//! notify every session.
//!
//! - `EntityStore<T>`: a JSON array of `Record<T>` under `T::STORAGE_KEY`
//! - `ValueSlot<T>`: a single JSON value under `T::STORAGE_KEY`
//! - `StoreContext`: the storage area, change bus and clock a session uses
//!
//! Storage failures never surface to callers. Unreadable data loads as an
//! empty (or seeded) collection and a failed write leaves the change in the
//! session's in-memory view only; both are logged.

pub mod context;
pub mod entity;
pub mod entity_store;
pub mod record;
pub mod slot;

pub use context::StoreContext;
pub use entity::Entity;
pub use entity_store::EntityStore;
pub use record::{Record, RecordId};
pub use slot::{SlotValue, ValueSlot};
