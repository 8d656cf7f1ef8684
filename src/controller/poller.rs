use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::client::ScrapeApi;
use crate::controller::{JobEvent, JobFailure};
use crate::domain::GENERIC_FAILURE;

/// Handle to a running status poll task.
///
/// The task stops by itself after its terminal event; `stop` cancels it early
/// and may be called any number of times.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a task that polls `/api/status` every `period` until the job ends.
///
/// The first request is made one period after spawning. Each tick sends a
/// `Progress` event; a finished job or a failed request sends exactly one
/// terminal event and ends the task.
pub fn spawn_poller(
    api: Arc<dyn ScrapeApi + Send + Sync>,
    period: Duration,
    tx: mpsc::Sender<JobEvent>,
) -> PollHandle {
    let task = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let status = match api.status().await {
                Ok(status) => status,
                Err(e) => {
                    warn!("Status query failed: {}", e);
                    let _ = tx
                        .send(JobEvent::Failed(JobFailure::StatusQuery(e.to_string())))
                        .await;
                    break;
                }
            };

            debug!(
                "Job status: running={} progress={} message={:?}",
                status.is_running, status.progress, status.message
            );

            let progress = JobEvent::Progress {
                progress: status.progress,
                message: status.message.clone(),
            };
            if tx.send(progress).await.is_err() {
                debug!("Job event receiver dropped, stopping poller");
                break;
            }

            if !status.is_running {
                let event = match status.result {
                    Some(result) => {
                        info!("Scrape finished: {}", result.display_title());
                        JobEvent::Completed(Box::new(result))
                    }
                    None => {
                        let message = status
                            .error
                            .filter(|e| !e.is_empty())
                            .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                        warn!("Scrape failed: {}", message);
                        JobEvent::Failed(JobFailure::Job(message))
                    }
                };
                let _ = tx.send(event).await;
                break;
            }
        }
    });

    PollHandle { task }
}
