//! Change bus shared by every session that looks at the same storage area.
//!
//! Each write an entity store makes is followed by a [`StorageChange`] on the
//! bus, shaped like a browser storage event (key, old value, new value).
//! Sessions subscribe per key and reload their snapshot when a change for
//! their key arrives, including changes they published themselves.
//!
//! Delivery is a tokio broadcast channel: every subscriber sees every change.
//! A subscriber that falls behind loses the oldest changes, which is fine
//! because a change only ever triggers a full reload.

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{trace, warn};

/// Broadcast channel capacity.
pub const CHANNEL_CAPACITY: usize = 64;

/// Identifies the session (browser tab) that published a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    /// Origin of a change synthesized by the bus itself rather than
    /// published by a session.
    pub const UNKNOWN: SessionId = SessionId(0);

    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageChange {
    /// `None` when the whole storage area was cleared.
    pub key: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub origin: SessionId,
}

impl StorageChange {
    /// Stands in for changes a lagging subscriber lost. Like a clear, it
    /// carries no key and so affects every key.
    pub fn lost() -> Self {
        Self {
            key: None,
            old_value: None,
            new_value: None,
            origin: SessionId::UNKNOWN,
        }
    }

    /// A cleared storage area affects every key.
    pub fn affects(&self, key: &str) -> bool {
        self.key.as_deref().map_or(true, |k| k == key)
    }
}

#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<StorageChange>,
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::with_capacity(CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Returns the number of subscribers the change reached.
    pub fn publish(&self, change: StorageChange) -> usize {
        let key = change.key.clone();
        match self.tx.send(change) {
            Ok(receivers) => {
                trace!(key = ?key, receivers, "Published storage change");
                receivers
            }
            // No subscribers is a normal state, e.g. a one-shot CLI write
            Err(_) => 0,
        }
    }

    /// Subscribe to changes for one storage key. Dropping the subscription
    /// unsubscribes.
    pub fn subscribe(&self, key: impl Into<String>) -> Subscription {
        Subscription {
            key: key.into(),
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

pub struct Subscription {
    key: String,
    rx: broadcast::Receiver<StorageChange>,
}

impl Subscription {
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Next pending change for this key, without waiting.
    pub fn try_next(&mut self) -> Option<StorageChange> {
        loop {
            match self.rx.try_recv() {
                Ok(change) if change.affects(&self.key) => return Some(change),
                Ok(_) => continue,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(key = %self.key, skipped, "Subscriber lagged, changes dropped");
                    continue;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }

    /// Consume every pending change and report whether a reload is due:
    /// true if any change for this key arrived, or if changes were dropped
    /// because the subscriber lagged.
    pub fn drain(&mut self) -> bool {
        let mut stale = false;
        loop {
            match self.rx.try_recv() {
                Ok(change) => stale |= change.affects(&self.key),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(key = %self.key, skipped, "Subscriber lagged, forcing reload");
                    stale = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return stale,
            }
        }
    }

    /// Wait for the next change for this key. Returns `None` once every
    /// bus handle has been dropped. If changes were dropped because the
    /// subscriber lagged, returns `StorageChange::lost()` so the caller
    /// reloads.
    pub async fn recv(&mut self) -> Option<StorageChange> {
        loop {
            match self.rx.recv().await {
                Ok(change) if change.affects(&self.key) => return Some(change),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(key = %self.key, skipped, "Subscriber lagged, forcing reload");
                    return Some(StorageChange::lost());
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(key: Option<&str>, value: &str, origin: SessionId) -> StorageChange {
        StorageChange {
            key: key.map(str::to_string),
            old_value: None,
            new_value: Some(value.to_string()),
            origin,
        }
    }

    #[test]
    fn test_subscription_filters_by_key() {
        let bus = ChangeBus::new();
        let origin = SessionId::random();
        let mut holidays = bus.subscribe("holidays");

        bus.publish(change(Some("audits"), "[]", origin));
        bus.publish(change(Some("holidays"), "[1]", origin));

        let got = holidays.try_next().unwrap();
        assert_eq!(got.key.as_deref(), Some("holidays"));
        assert_eq!(got.new_value.as_deref(), Some("[1]"));
        assert!(holidays.try_next().is_none());
    }

    #[test]
    fn test_clear_reaches_every_key() {
        let bus = ChangeBus::new();
        let mut audits = bus.subscribe("audits");
        bus.publish(StorageChange {
            key: None,
            old_value: None,
            new_value: None,
            origin: SessionId::random(),
        });
        assert!(audits.drain());
    }

    #[test]
    fn test_drain_ignores_other_keys() {
        let bus = ChangeBus::new();
        let mut feedback = bus.subscribe("feedbacks");
        bus.publish(change(Some("logo"), "{}", SessionId::random()));
        assert!(!feedback.drain());
    }

    #[test]
    fn test_lagged_subscriber_forces_reload() {
        let bus = ChangeBus::with_capacity(2);
        let mut audits = bus.subscribe("audits");
        let origin = SessionId::random();
        // Only other keys, but enough to overflow the channel
        for i in 0..5 {
            bus.publish(change(Some("logo"), &i.to_string(), origin));
        }
        assert!(audits.drain());
    }

    #[test]
    fn test_dropped_subscription_unsubscribes() {
        let bus = ChangeBus::new();
        let sub = bus.subscribe("audits");
        assert_eq!(bus.subscriber_count(), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(change(Some("audits"), "[]", SessionId::random())), 0);
    }

    #[tokio::test]
    async fn test_recv_reports_lost_changes_after_lag() {
        let bus = ChangeBus::with_capacity(2);
        let mut audits = bus.subscribe("audits");
        let origin = SessionId::random();
        bus.publish(change(Some("audits"), "[1]", origin));
        for i in 0..5 {
            bus.publish(change(Some("logo"), &i.to_string(), origin));
        }

        let got = audits.recv().await.unwrap();
        assert_eq!(got, StorageChange::lost());
        assert!(got.affects("audits"));
    }

    #[tokio::test]
    async fn test_recv_waits_for_matching_change() {
        let bus = ChangeBus::new();
        let mut sub = bus.subscribe("tourDiary");
        let publisher = bus.clone();
        let origin = SessionId::random();

        tokio::spawn(async move {
            publisher.publish(change(Some("audits"), "[]", origin));
            publisher.publish(change(Some("tourDiary"), "[2]", origin));
        });

        let got = sub.recv().await.unwrap();
        assert_eq!(got.new_value.as_deref(), Some("[2]"));
        assert_eq!(got.origin, origin);
    }
}
