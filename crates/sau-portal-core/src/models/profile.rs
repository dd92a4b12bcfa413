use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::SlotValue;

/// Logo uploaded by an administrator, shown in the portal header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PortalLogo {
    pub file_name: String,
    /// Image encoded as a data URL.
    pub data_url: String,
    pub uploaded_at: DateTime<Utc>,
}

impl SlotValue for PortalLogo {
    const STORAGE_KEY: &'static str = "logo";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Staff,
    Public,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct SignedInUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub signed_in_at: DateTime<Utc>,
}

impl SignedInUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl SlotValue for SignedInUser {
    const STORAGE_KEY: &'static str = "currentUser";
}
