use serde::{Deserialize, Serialize};

use crate::store::{Entity, Record};

/// Prefix of PMAY-G issue serial numbers.
pub const SERIAL_PREFIX: &str = "PMAYG-";
const SERIAL_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub enum IssueStatus {
    #[default]
    Open,
    UnderReview,
    Resolved,
}

/// An issue raised against a PMAY-G (rural housing) beneficiary case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct PmaygIssue {
    pub serial: String,
    pub district: String,
    pub block: String,
    pub beneficiary: String,
    pub issue: String,
    #[serde(default)]
    pub status: IssueStatus,
}

impl PmaygIssue {
    pub fn next_serial(existing: &[Record<PmaygIssue>]) -> String {
        crate::utils::next_serial(
            existing.iter().map(|r| r.serial.as_str()),
            SERIAL_PREFIX,
            SERIAL_WIDTH,
        )
    }
}

impl Entity for PmaygIssue {
    const STORAGE_KEY: &'static str = "pmaygIssues";

    fn title(&self) -> String {
        format!("{} {} - {}", self.serial, self.beneficiary, self.issue)
    }
}
