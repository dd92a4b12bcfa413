use tracing::info;

use super::{IssuedCode, OtpError};

/// Hands an issued code to the user, normally by email.
pub trait OtpDelivery: Send + Sync {
    fn deliver(&self, code: &IssuedCode) -> Result<(), OtpError>;
}

/// Delivery stand-in that only logs the send. The code itself is not logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDelivery;

impl OtpDelivery for LogDelivery {
    fn deliver(&self, code: &IssuedCode) -> Result<(), OtpError> {
        info!(email = %code.email, expires_at = %code.expires_at, "OTP issued");
        Ok(())
    }
}
