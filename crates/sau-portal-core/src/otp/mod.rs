//! One-time password flow for email verification.
//!
//! Codes are six digits, valid for 10 minutes and single use. Pending codes
//! live only in process memory and are lost on restart.

pub mod delivery;
pub mod service;

pub use delivery::{LogDelivery, OtpDelivery};
pub use service::{IssuedCode, OtpService, VerifyOutcome};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OtpError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Failed to deliver code: {0}")]
    Delivery(String),
}
