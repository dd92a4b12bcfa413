use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum LibraryCategory {
    Act,
    Rule,
    Guideline,
    Circular,
    Report,
}

/// A document in the resource library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub title: String,
    pub category: LibraryCategory,
    pub file_name: String,
    pub file_url: String,
    pub added_on: NaiveDate,
}

impl Entity for LibraryItem {
    const STORAGE_KEY: &'static str = "libraryItems";

    fn title(&self) -> String {
        self.title.clone()
    }
}
