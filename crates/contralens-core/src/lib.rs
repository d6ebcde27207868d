//! Contract records, list filtering and pagination, and display helpers.

pub mod filter;
pub mod format;
pub mod stats;
pub mod types;
pub mod upload;
pub mod view;

pub use filter::{ALL, ContractPage, DEFAULT_PAGE_SIZE, FilterCriteria, FilterError, ListEngine, clamp_page};
pub use format::{format_date, format_file_size};
pub use stats::DashboardStats;
pub use types::{Clause, ContractDetail, ContractSummary, Evidence, Insight, RiskLevel, StatusKind, percent};
pub use upload::{
    ACCEPTED_EXTENSIONS, ProgressStepper, ScriptedStepper, SeededStepper, UploadQueue, UploadStatus, UploadedFile,
    is_accepted_document,
};
pub use view::ListView;
