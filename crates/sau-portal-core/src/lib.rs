//! Core library for the social audit unit portal.
//!
//! Every portal collection (feedback, holidays, audits, ...) is one JSON
//! array stored under one well-known key in a per-origin [`StorageArea`].
//! An [`EntityStore`] loads that snapshot, applies add/update/delete against
//! a fresh read of the full collection, writes it back and publishes a
//! [`StorageChange`] on the [`ChangeBus`] so every open session reloads.
//!
//! The crate also carries the small in-memory [`OtpService`] used for email
//! verification, and [`Portal`], the context object that wires storage, bus,
//! clock and OTP together for a process.

pub mod bus;
pub mod clock;
pub mod config;
pub mod models;
pub mod otp;
pub mod portal;
pub mod storage;
pub mod store;
pub mod utils;

pub use bus::{ChangeBus, SessionId, StorageChange, Subscription};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use otp::{IssuedCode, LogDelivery, OtpDelivery, OtpError, OtpService, VerifyOutcome};
pub use portal::Portal;
pub use storage::{FileStorage, MemoryStorage, StorageArea, StorageError};
pub use store::{Entity, EntityStore, Record, RecordId, SlotValue, StoreContext, ValueSlot};
