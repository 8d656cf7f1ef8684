use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::app::{GleanerError, Result};
use crate::client::ScrapeApi;
use crate::domain::HistoryEntry;

pub const NO_HISTORY: &str = "No scrape history yet";
pub const LOAD_FAILED: &str = "Failed to load history";

/// Outcome of fetching the export history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryView {
    Entries(Vec<HistoryEntry>),
    Empty,
    /// The service answered `success: false`.
    Refused(Option<String>),
    /// The request itself failed.
    Failed(String),
}

impl HistoryView {
    pub fn entries(&self) -> &[HistoryEntry] {
        match self {
            HistoryView::Entries(entries) => entries,
            _ => &[],
        }
    }
}

/// Lists previously exported files and hands them out for download.
pub struct HistoryLister {
    api: Arc<dyn ScrapeApi + Send + Sync>,
}

impl HistoryLister {
    pub fn new(api: Arc<dyn ScrapeApi + Send + Sync>) -> Self {
        Self { api }
    }

    /// Fetch the history. Never cached; every call asks the service.
    pub async fn load(&self) -> HistoryView {
        match self.api.history().await {
            Ok(reply) if !reply.success => {
                warn!("History refused: {:?}", reply.message);
                HistoryView::Refused(reply.message.filter(|m| !m.is_empty()))
            }
            Ok(reply) if reply.data.is_empty() => HistoryView::Empty,
            Ok(reply) => {
                info!("Loaded {} history entries", reply.data.len());
                HistoryView::Entries(reply.data)
            }
            Err(e) => {
                warn!("History request failed: {}", e);
                HistoryView::Failed(e.to_string())
            }
        }
    }

    pub fn download_url(&self, filename: &str) -> Result<Url> {
        self.api.download_url(filename)
    }

    /// Open a history file in the system browser.
    pub fn open_download(&self, filename: &str) -> Result<Url> {
        let url = self.download_url(filename)?;
        open::that(url.as_str())?;
        info!("Opened {}", url);
        Ok(url)
    }

    /// Download a history file into `dir`, keeping only its final path component.
    pub async fn save_download(&self, filename: &str, dir: &Path) -> Result<PathBuf> {
        let local_name = Path::new(filename)
            .file_name()
            .ok_or_else(|| GleanerError::Other(format!("Invalid file name: {}", filename)))?;

        let body = self.api.download(filename).await?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(local_name);
        std::fs::write(&path, body)?;
        info!("Saved {} to {}", filename, path.display());
        Ok(path)
    }
}
