//! Scrape job lifecycle: submit a URL, poll the service, hold the result.
//!
//! ```text
//! idle → submitting → polling → (result | error) → idle
//! ```
//!
//! A [`JobController`] owns at most one poll task at a time. Submitting while
//! a job is in flight is refused with [`GleanerError::Busy`], which is how the
//! front ends keep a second poll loop from ever starting.

mod poller;

pub use poller::{spawn_poller, PollHandle};

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{info, warn};

use crate::app::{GleanerError, Result};
use crate::client::ScrapeApi;
use crate::domain::{ArticleResult, ScrapeRequest, GENERIC_FAILURE};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

const EVENT_BUFFER: usize = 32;

/// Something that happened to the running job.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    /// Sent on every poll tick, terminal or not.
    Progress { progress: f64, message: String },
    Completed(Box<ArticleResult>),
    Failed(JobFailure),
}

impl JobEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobEvent::Progress { .. })
    }
}

/// Why a job produced no article.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobFailure {
    /// The service refused the submission (`success: false`).
    #[error("{0}")]
    Rejected(String),

    /// The submission request itself failed.
    #[error("Network error: {0}")]
    Network(String),

    /// The job finished with an error, or with neither error nor result.
    #[error("{0}")]
    Job(String),

    /// A status poll request failed.
    #[error("Status query failed: {0}")]
    StatusQuery(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    Idle,
    Submitting,
    Polling,
}

/// Latest progress report from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub percent: f64,
    pub message: String,
}

pub struct JobController {
    api: Arc<dyn ScrapeApi + Send + Sync>,
    poll_interval: Duration,
    phase: JobPhase,
    current: Option<ArticleResult>,
    progress: Option<Progress>,
    poller: Option<PollHandle>,
    events: Option<mpsc::Receiver<JobEvent>>,
}

impl JobController {
    pub fn new(api: Arc<dyn ScrapeApi + Send + Sync>) -> Self {
        Self::with_interval(api, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_interval(api: Arc<dyn ScrapeApi + Send + Sync>, poll_interval: Duration) -> Self {
        Self {
            api,
            poll_interval,
            phase: JobPhase::Idle,
            current: None,
            progress: None,
            poller: None,
            events: None,
        }
    }

    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != JobPhase::Idle
    }

    /// Whether a poll task is still running.
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(PollHandle::is_active)
    }

    pub fn current_result(&self) -> Option<&ArticleResult> {
        self.current.as_ref()
    }

    pub fn progress(&self) -> Option<&Progress> {
        self.progress.as_ref()
    }

    /// Submit `input` for scraping and start polling on success.
    ///
    /// Blank input fails with [`GleanerError::EmptyUrl`] before any request is
    /// made. A refused or failed submission comes back as
    /// [`GleanerError::Job`] and leaves the controller idle.
    pub async fn submit(&mut self, input: &str) -> Result<()> {
        if self.is_busy() {
            return Err(GleanerError::Busy);
        }
        let request = ScrapeRequest::new(input)?;

        self.current = None;
        self.progress = None;
        self.phase = JobPhase::Submitting;
        info!("Submitting scrape for {}", request.url);

        let reply = match self.api.submit(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Scrape submission failed: {}", e);
                self.phase = JobPhase::Idle;
                return Err(JobFailure::Network(e.to_string()).into());
            }
        };

        if !reply.success {
            let message = reply
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!("Scrape rejected: {}", message);
            self.phase = JobPhase::Idle;
            return Err(JobFailure::Rejected(message).into());
        }

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        self.poller = Some(spawn_poller(self.api.clone(), self.poll_interval, tx));
        self.events = Some(rx);
        self.phase = JobPhase::Polling;
        Ok(())
    }

    /// Wait for the next job event and apply it.
    ///
    /// Returns `None` once no job is running.
    pub async fn next_event(&mut self) -> Option<JobEvent> {
        let received = self.events.as_mut()?.recv().await;
        match received {
            Some(event) => {
                self.apply(&event);
                Some(event)
            }
            None => {
                self.finish();
                None
            }
        }
    }

    /// Apply every event that has already arrived, without waiting.
    pub fn drain_events(&mut self) -> Vec<JobEvent> {
        let mut drained = Vec::new();
        let mut closed = false;

        if let Some(rx) = self.events.as_mut() {
            loop {
                match rx.try_recv() {
                    Ok(event) => drained.push(event),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        closed = true;
                        break;
                    }
                }
            }
        }

        for event in &drained {
            self.apply(event);
        }
        if closed {
            self.finish();
        }
        drained
    }

    /// Cancel the poll task, if any. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
            info!("Stopped status polling");
        }
        self.events = None;
        self.phase = JobPhase::Idle;
    }

    /// Drop the current result.
    ///
    /// A poll already in flight is left alone and may still deliver a result.
    pub fn clear(&mut self) {
        self.current = None;
        self.progress = None;
    }

    /// Stop polling and forget everything.
    pub fn reset(&mut self) {
        self.stop();
        self.clear();
    }

    fn apply(&mut self, event: &JobEvent) {
        match event {
            JobEvent::Progress { progress, message } => {
                self.progress = Some(Progress {
                    percent: *progress,
                    message: message.clone(),
                });
            }
            JobEvent::Completed(result) => {
                self.current = Some(result.as_ref().clone());
                self.finish();
            }
            JobEvent::Failed(_) => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.phase = JobPhase::Idle;
        self.poller = None;
        self.events = None;
    }
}
