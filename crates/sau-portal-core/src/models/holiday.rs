use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{Entity, Record, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    Gazetted,
    Restricted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub name: String,
    pub date: NaiveDate,
    pub kind: HolidayKind,
}

/// Holidays shown before anyone has edited the list.
const SEED: &[(i64, &str, (i32, u32, u32), HolidayKind)] = &[
    (1, "Republic Day", (2025, 1, 26), HolidayKind::Gazetted),
    (2, "Holi", (2025, 3, 14), HolidayKind::Gazetted),
    (3, "Good Friday", (2025, 4, 18), HolidayKind::Gazetted),
    (4, "Independence Day", (2025, 8, 15), HolidayKind::Gazetted),
    (5, "Gandhi Jayanti", (2025, 10, 2), HolidayKind::Gazetted),
    (6, "Diwali", (2025, 10, 20), HolidayKind::Gazetted),
    (7, "Christmas Day", (2025, 12, 25), HolidayKind::Gazetted),
];

impl Entity for Holiday {
    const STORAGE_KEY: &'static str = "holidays";

    fn seed() -> Vec<Record<Self>> {
        SEED.iter()
            .filter_map(|&(id, name, (y, m, d), kind)| {
                let date = NaiveDate::from_ymd_opt(y, m, d)?;
                Some(Record::new(
                    RecordId(id),
                    Holiday {
                        name: name.to_string(),
                        date,
                        kind,
                    },
                ))
            })
            .collect()
    }

    fn sort(records: &mut [Record<Self>]) {
        records.sort_by_key(|r| r.date);
    }

    fn title(&self) -> String {
        format!("{} - {}", crate::utils::format_date(self.date), self.name)
    }
}
