use std::str::FromStr;

use crate::store::Entity;

use super::{
    Audit, CalendarFile, CaseStudy, Feedback, Holiday, LibraryItem, MgnregsEntry, PmaygIssue,
    TourDiaryEntry,
};

/// The portal's collections, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Feedback,
    Holidays,
    Calendars,
    Audits,
    CaseStudies,
    Library,
    Mgnregs,
    Pmayg,
    TourDiary,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 9] = [
        CollectionKind::Feedback,
        CollectionKind::Holidays,
        CollectionKind::Calendars,
        CollectionKind::Audits,
        CollectionKind::CaseStudies,
        CollectionKind::Library,
        CollectionKind::Mgnregs,
        CollectionKind::Pmayg,
        CollectionKind::TourDiary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Feedback => "feedback",
            CollectionKind::Holidays => "holidays",
            CollectionKind::Calendars => "calendars",
            CollectionKind::Audits => "audits",
            CollectionKind::CaseStudies => "case-studies",
            CollectionKind::Library => "library",
            CollectionKind::Mgnregs => "mgnregs",
            CollectionKind::Pmayg => "pmayg",
            CollectionKind::TourDiary => "tour-diary",
        }
    }

    pub fn storage_key(&self) -> &'static str {
        match self {
            CollectionKind::Feedback => Feedback::STORAGE_KEY,
            CollectionKind::Holidays => Holiday::STORAGE_KEY,
            CollectionKind::Calendars => CalendarFile::STORAGE_KEY,
            CollectionKind::Audits => Audit::STORAGE_KEY,
            CollectionKind::CaseStudies => CaseStudy::STORAGE_KEY,
            CollectionKind::Library => LibraryItem::STORAGE_KEY,
            CollectionKind::Mgnregs => MgnregsEntry::STORAGE_KEY,
            CollectionKind::Pmayg => PmaygIssue::STORAGE_KEY,
            CollectionKind::TourDiary => TourDiaryEntry::STORAGE_KEY,
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    /// Accepts the collection name or its storage key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        CollectionKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s) || kind.storage_key() == s)
            .ok_or_else(|| {
                let names: Vec<_> = CollectionKind::ALL.iter().map(|k| k.name()).collect();
                format!("Unknown collection '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_name_and_key() {
        assert_eq!("tour-diary".parse::<CollectionKind>(), Ok(CollectionKind::TourDiary));
        assert_eq!("caseStudies".parse::<CollectionKind>(), Ok(CollectionKind::CaseStudies));
        assert_eq!("AUDITS".parse::<CollectionKind>(), Ok(CollectionKind::Audits));
        assert!("payroll".parse::<CollectionKind>().is_err());
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        let mut keys: Vec<_> = CollectionKind::ALL.iter().map(|k| k.storage_key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), CollectionKind::ALL.len());
    }
}
