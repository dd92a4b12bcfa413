use serde::{Deserialize, Serialize};

use crate::store::{Entity, Record, RecordId};

/// Social audit outcome for MGNREGS works in one gram panchayat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct MgnregsEntry {
    pub district: String,
    pub block: String,
    pub gram_panchayat: String,
    pub financial_year: String,
    pub works_audited: u32,
    pub issues_raised: u32,
    /// Amount recovered, in rupees.
    pub amount_recovered: f64,
}

impl Entity for MgnregsEntry {
    const STORAGE_KEY: &'static str = "mgnregsData";

    fn seed() -> Vec<Record<Self>> {
        vec![Record::new(
            RecordId(1),
            MgnregsEntry {
                district: "Khordha".to_string(),
                block: "Balianta".to_string(),
                gram_panchayat: "Jaripada".to_string(),
                financial_year: "2024-25".to_string(),
                works_audited: 42,
                issues_raised: 7,
                amount_recovered: 18_500.0,
            },
        )]
    }

    fn title(&self) -> String {
        format!(
            "{} {} / {} ({} works, {} issues)",
            self.financial_year, self.block, self.gram_panchayat, self.works_audited, self.issues_raised
        )
    }
}
