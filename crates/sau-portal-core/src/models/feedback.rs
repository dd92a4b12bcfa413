use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    #[default]
    Suggestion,
    Complaint,
    Appreciation,
}

/// A message submitted through the public feedback form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub category: FeedbackCategory,
    pub subject: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

impl Entity for Feedback {
    const STORAGE_KEY: &'static str = "feedbacks";

    fn title(&self) -> String {
        format!("{} ({})", self.subject, self.name)
    }
}
