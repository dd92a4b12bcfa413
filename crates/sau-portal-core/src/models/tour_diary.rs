use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{Entity, Record};

/// One day's field visit in an officer's tour diary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct TourDiaryEntry {
    pub officer: String,
    pub date: NaiveDate,
    pub place: String,
    pub purpose: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl Entity for TourDiaryEntry {
    const STORAGE_KEY: &'static str = "tourDiary";

    /// Latest visit first.
    fn sort(records: &mut [Record<Self>]) {
        records.sort_by(|a, b| b.date.cmp(&a.date));
    }

    fn title(&self) -> String {
        format!("{} {} - {}", self.date, self.place, self.purpose)
    }
}
