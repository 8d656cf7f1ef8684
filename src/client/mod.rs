pub mod http_client;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;
use crate::domain::{HistoryResponse, JobStatus, ScrapeRequest, SubmitResponse};

pub use http_client::HttpScrapeClient;

/// The four endpoints of the scraping service.
#[async_trait]
pub trait ScrapeApi {
    /// `POST /api/scrape`
    async fn submit(&self, request: &ScrapeRequest) -> Result<SubmitResponse>;

    /// `GET /api/status`
    async fn status(&self) -> Result<JobStatus>;

    /// `GET /api/history`
    async fn history(&self) -> Result<HistoryResponse>;

    /// `GET /api/download/:filename`, returning the raw file body.
    async fn download(&self, filename: &str) -> Result<Vec<u8>>;

    /// Address of a history file, for handing to a browser.
    fn download_url(&self, filename: &str) -> Result<Url>;
}
