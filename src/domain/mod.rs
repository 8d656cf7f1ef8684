pub mod article;
pub mod history;
pub mod job;

pub use article::{format_timestamp, ArticleResult, ImageDescriptor, UNKNOWN};
pub use history::{HistoryEntry, HistoryResponse};
pub use job::{clamp_progress, JobStatus, ScrapeRequest, SubmitResponse, GENERIC_FAILURE};
