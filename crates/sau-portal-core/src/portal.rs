//! The portal context: one per process, passed by reference to whatever
//! needs a store.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::bus::ChangeBus;
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::otp::OtpService;
use crate::storage::{FileStorage, MemoryStorage, StorageArea};
use crate::store::{Entity, EntityStore, SlotValue, StoreContext, ValueSlot};

pub struct Portal {
    ctx: StoreContext,
    otp: Arc<OtpService>,
}

impl Portal {
    pub fn new(storage: Arc<dyn StorageArea>, clock: Arc<dyn Clock>) -> Self {
        let otp = Arc::new(OtpService::new(clock.clone()));
        Self {
            ctx: StoreContext::new(storage, ChangeBus::new(), clock),
            otp,
        }
    }

    /// A portal over a fresh in-memory storage area and the wall clock.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), Arc::new(SystemClock))
    }

    /// A portal over file storage in the configured data directory.
    pub fn from_config(config: &Config) -> Result<Self> {
        let dir = config.data_dir()?;
        let mut storage = FileStorage::new(&dir)
            .with_context(|| format!("Failed to open data directory: {}", dir.display()))?;
        if let Some(limit) = config.storage_quota_bytes {
            storage = storage.with_quota(limit);
        }
        info!(data_dir = %dir.display(), "Opened portal storage");

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let otp = OtpService::new(clock.clone()).with_validity(config.otp_validity());
        Ok(Self {
            ctx: StoreContext::new(Arc::new(storage), ChangeBus::new(), clock),
            otp: Arc::new(otp),
        })
    }

    pub fn with_otp(mut self, otp: OtpService) -> Self {
        self.otp = Arc::new(otp);
        self
    }

    /// Another session over the same storage, bus and OTP state, as a second
    /// browser tab would be.
    pub fn session(&self) -> Portal {
        Portal {
            ctx: self.ctx.fork(),
            otp: Arc::clone(&self.otp),
        }
    }

    pub fn open<T: Entity>(&self) -> EntityStore<T> {
        EntityStore::open(self.ctx.clone())
    }

    pub fn slot<T: SlotValue>(&self) -> ValueSlot<T> {
        ValueSlot::open(self.ctx.clone())
    }

    pub fn otp(&self) -> &OtpService {
        &self.otp
    }

    pub fn context(&self) -> &StoreContext {
        &self.ctx
    }

    /// Clear every key in the storage area and tell every session.
    pub fn clear_storage(&self) -> bool {
        self.ctx.clear_storage()
    }
}
