use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// An uploaded social audit calendar document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CalendarFile {
    pub title: String,
    /// e.g. `2025-26`
    pub financial_year: String,
    pub file_name: String,
    /// Data URL or link to the uploaded file.
    pub file_url: String,
    pub uploaded_on: NaiveDate,
}

impl Entity for CalendarFile {
    const STORAGE_KEY: &'static str = "calendars";

    fn title(&self) -> String {
        format!("{} [{}]", self.title, self.financial_year)
    }
}
