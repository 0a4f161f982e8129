pub mod auth;
pub mod equipment;
pub mod checklist;
pub mod report;

pub use auth::{LoginRequest, TokenResponse, User, UserRole};
pub use equipment::{Equipment, Sector};
pub use checklist::{
    Answer, Checklist, ChecklistSubmission, ResponseEntry, ValidationSubmission,
    DEFAULT_QUESTIONS,
};
pub use report::{ExportFormat, ReportFilter};
