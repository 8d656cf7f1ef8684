use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{GleanerError, Result};
use crate::client::{HttpScrapeClient, ScrapeApi};
use crate::config::Config;
use crate::controller::JobController;
use crate::export::Exporter;
use crate::history::HistoryLister;

/// Everything a front end needs, built once from the configuration.
pub struct AppContext {
    pub config: Arc<Config>,
    pub api: Arc<dyn ScrapeApi + Send + Sync>,
    pub history: HistoryLister,
    pub exporter: Exporter,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let client =
            HttpScrapeClient::new(&config.server.base_url, config.server.request_timeout())?;
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Build around any [`ScrapeApi`], e.g. a fake in tests.
    pub fn with_api(config: Config, api: Arc<dyn ScrapeApi + Send + Sync>) -> Self {
        let exporter = Exporter::new(
            config.export.resolve_directory(),
            config.document.clone(),
        );
        let history = HistoryLister::new(api.clone());

        Self {
            config: Arc::new(config),
            api,
            history,
            exporter,
        }
    }

    /// A fresh controller polling at the configured interval.
    pub fn job_controller(&self) -> JobController {
        JobController::with_interval(self.api.clone(), self.config.polling.interval())
    }

    /// Directory for the TUI log file: `<data dir>/gleaner`.
    pub fn log_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GleanerError::Config("Could not find data directory".into()))?;
        let log_dir = data_dir.join("gleaner");
        std::fs::create_dir_all(&log_dir)?;
        Ok(log_dir)
    }
}
