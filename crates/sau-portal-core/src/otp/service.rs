use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::debug;

use super::{LogDelivery, OtpDelivery, OtpError};
use crate::clock::{Clock, SystemClock};

/// How long an issued code stays valid.
pub const OTP_VALIDITY_MINUTES: i64 = 10;

/// Codes are drawn from this range, so they are always six digits.
const CODE_RANGE: std::ops::Range<u32> = 100_000..1_000_000;

#[derive(Debug, Clone)]
struct PendingCode {
    code: String,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Verified,
    NotFound,
    Expired,
    Mismatch,
}

impl std::fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyOutcome::Verified => write!(f, "Verified"),
            VerifyOutcome::NotFound => write!(f, "No code pending for this email"),
            VerifyOutcome::Expired => write!(f, "Code expired"),
            VerifyOutcome::Mismatch => write!(f, "Incorrect code"),
        }
    }
}

pub struct OtpService {
    pending: Mutex<HashMap<String, PendingCode>>,
    clock: Arc<dyn Clock>,
    validity: Duration,
    delivery: Arc<dyn OtpDelivery>,
}

impl Default for OtpService {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl OtpService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            clock,
            validity: Duration::minutes(OTP_VALIDITY_MINUTES),
            delivery: Arc::new(LogDelivery),
        }
    }

    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn with_delivery(mut self, delivery: Arc<dyn OtpDelivery>) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a new code for `email`, replacing any code still pending.
    pub fn send(&self, email: &str) -> Result<IssuedCode, OtpError> {
        let email = normalize_email(email)
            .ok_or_else(|| OtpError::InvalidEmail(email.to_string()))?;

        let code = rand::thread_rng().gen_range(CODE_RANGE).to_string();
        let expires_at = self.clock.now() + self.validity;
        let issued = IssuedCode {
            email: email.clone(),
            code: code.clone(),
            expires_at,
        };

        self.delivery.deliver(&issued)?;
        self.lock().insert(email, PendingCode { code, expires_at });
        Ok(issued)
    }

    /// Check `code` against the pending code for `email`. A correct code is
    /// consumed; an expired one is discarded; a wrong one stays pending.
    pub fn verify(&self, email: &str, code: &str) -> VerifyOutcome {
        let Some(email) = normalize_email(email) else {
            return VerifyOutcome::NotFound;
        };

        let mut pending = self.lock();
        let Some(entry) = pending.get(&email) else {
            return VerifyOutcome::NotFound;
        };

        if self.clock.now() > entry.expires_at {
            pending.remove(&email);
            debug!(email = %email, "OTP expired");
            return VerifyOutcome::Expired;
        }

        if entry.code != code.trim() {
            return VerifyOutcome::Mismatch;
        }

        pending.remove(&email);
        VerifyOutcome::Verified
    }

    /// Drop every expired code. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut pending = self.lock();
        let before = pending.len();
        pending.retain(|_, entry| entry.expires_at >= now);
        before - pending.len()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, PendingCode>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim();
    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.is_empty() {
        return None;
    }
    Some(email.to_ascii_lowercase())
}
