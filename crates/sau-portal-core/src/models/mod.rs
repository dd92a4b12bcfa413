//! Portal record types.
//!
//! Each collection type implements [`Entity`](crate::store::Entity) with the
//! storage key the portal front-end uses:
//!
//! - `Feedback`, `Holiday`, `CalendarFile`, `Audit`, `CaseStudy`
//! - `LibraryItem`, `MgnregsEntry`, `PmaygIssue`, `TourDiaryEntry`
//!
//! Single values (`PortalLogo`, `SignedInUser`) implement
//! [`SlotValue`](crate::store::SlotValue).

pub mod audit;
pub mod calendar;
pub mod case_study;
pub mod feedback;
pub mod holiday;
pub mod kind;
pub mod library;
pub mod mgnregs;
pub mod pmayg;
pub mod profile;
pub mod tour_diary;

pub use audit::{Audit, AuditStatus};
pub use calendar::CalendarFile;
pub use case_study::CaseStudy;
pub use feedback::{Feedback, FeedbackCategory};
pub use holiday::{Holiday, HolidayKind};
pub use kind::CollectionKind;
pub use library::{LibraryCategory, LibraryItem};
pub use mgnregs::MgnregsEntry;
pub use pmayg::{IssueStatus, PmaygIssue};
pub use profile::{PortalLogo, SignedInUser, UserRole};
pub use tour_diary::TourDiaryEntry;
