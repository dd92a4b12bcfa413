use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{Entity, Record};

/// Prefix of case study serial numbers.
pub const SERIAL_PREFIX: &str = "CS-";
const SERIAL_WIDTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub serial: String,
    pub title: String,
    pub district: String,
    pub summary: String,
    #[serde(default)]
    pub attachment_url: Option<String>,
    pub published_on: NaiveDate,
}

impl CaseStudy {
    /// Serial for the next case study given the ones already stored.
    pub fn next_serial(existing: &[Record<CaseStudy>]) -> String {
        crate::utils::next_serial(
            existing.iter().map(|r| r.serial.as_str()),
            SERIAL_PREFIX,
            SERIAL_WIDTH,
        )
    }
}

impl Entity for CaseStudy {
    const STORAGE_KEY: &'static str = "caseStudies";

    fn title(&self) -> String {
        format!("{} {}", self.serial, self.title)
    }
}
