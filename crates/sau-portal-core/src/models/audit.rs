use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{Entity, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub enum AuditStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

/// A social audit conducted in a gram panchayat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub district: String,
    pub block: String,
    pub gram_panchayat: String,
    /// Scheme audited, e.g. `MGNREGS` or `PMAY-G`.
    pub scheme: String,
    pub audit_date: NaiveDate,
    #[serde(default)]
    pub status: AuditStatus,
    #[serde(default)]
    pub findings: Option<String>,
}

impl Audit {
    pub fn financial_year(&self) -> String {
        crate::utils::financial_year(self.audit_date)
    }
}

impl Entity for Audit {
    const STORAGE_KEY: &'static str = "audits";

    /// Most recent audit first.
    fn sort(records: &mut [Record<Self>]) {
        records.sort_by(|a, b| b.audit_date.cmp(&a.audit_date));
    }

    fn title(&self) -> String {
        format!(
            "{} {} / {} / {}",
            self.audit_date, self.scheme, self.block, self.gram_panchayat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordId;

    fn audit(date: (i32, u32, u32)) -> Audit {
        Audit {
            district: "Khordha".to_string(),
            block: "Jatni".to_string(),
            gram_panchayat: "Benapanjari".to_string(),
            scheme: "MGNREGS".to_string(),
            audit_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            status: AuditStatus::Completed,
            findings: None,
        }
    }

    #[test]
    fn test_sort_descending_by_date() {
        let mut records = vec![
            Record::new(RecordId(1), audit((2024, 5, 1))),
            Record::new(RecordId(2), audit((2025, 2, 10))),
            Record::new(RecordId(3), audit((2024, 11, 20))),
        ];
        Audit::sort(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_status_defaults_when_missing() {
        let json = r#"{"id":1,"district":"Puri","block":"Gop","gramPanchayat":"Konark",
            "scheme":"PMAY-G","auditDate":"2025-01-15"}"#;
        let record: Record<Audit> = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, AuditStatus::Scheduled);
        assert_eq!(record.financial_year(), "2024-25");
    }
}
