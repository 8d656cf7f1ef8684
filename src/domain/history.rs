use serde::{Deserialize, Serialize};

use crate::domain::article::format_timestamp;

/// One previously exported file on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub filename: String,
    pub size: u64,
    pub modified: String,
}

impl HistoryEntry {
    /// Size in kilobytes with one decimal, e.g. `1.5`.
    pub fn size_kb(&self) -> String {
        format!("{:.1}", self.size as f64 / 1024.0)
    }

    pub fn display_modified(&self) -> String {
        format_timestamp(&self.modified)
    }
}

/// Reply to `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<HistoryEntry>,
    #[serde(default)]
    pub message: Option<String>,
}
