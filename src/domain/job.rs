use serde::{Deserialize, Serialize};

use crate::app::{GleanerError, Result};
use crate::domain::ArticleResult;

/// Message shown when a job finishes without a result or an error message.
pub const GENERIC_FAILURE: &str = "Scrape failed";

/// Body of `POST /api/scrape`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

impl ScrapeRequest {
    /// Build a request from raw user input, rejecting blank input.
    pub fn new(input: &str) -> Result<Self> {
        let url = input.trim();
        if url.is_empty() {
            return Err(GleanerError::EmptyUrl);
        }
        Ok(Self {
            url: url.to_string(),
        })
    }
}

/// Reply to `POST /api/scrape`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Snapshot returned by `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobStatus {
    pub is_running: bool,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Option<ArticleResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl JobStatus {
    /// Progress clamped to 0..=100 for display. The backend value is not validated.
    pub fn clamped_progress(&self) -> f64 {
        clamp_progress(self.progress)
    }
}

pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_trims_input() {
        let request = ScrapeRequest::new("  https://example.com/a \n").unwrap();
        assert_eq!(request.url, "https://example.com/a");
    }

    #[test]
    fn test_request_rejects_blank_input() {
        assert!(matches!(ScrapeRequest::new(""), Err(GleanerError::EmptyUrl)));
        assert!(matches!(
            ScrapeRequest::new(" \t\n "),
            Err(GleanerError::EmptyUrl)
        ));
    }

    #[test]
    fn test_status_ignores_extra_fields() {
        let json = r#"{
            "is_running": false,
            "progress": 100,
            "message": "done",
            "result": {"title": "T"},
            "error": null,
            "html_file": "article_1.html",
            "url_number": 3
        }"#;
        let status: JobStatus = serde_json::from_str(json).unwrap();
        assert!(!status.is_running);
        assert_eq!(status.progress, 100.0);
        assert_eq!(status.result.unwrap().title(), Some("T"));
    }

    #[test]
    fn test_status_tolerates_unreadable_images() {
        let json = r#"{
            "is_running": false,
            "progress": 100,
            "message": "done",
            "result": {"title": "T", "images": [{"width": 640}, {"url": "https://a/1.png"}]}
        }"#;
        let status: JobStatus = serde_json::from_str(json).unwrap();
        let article = status.result.unwrap();
        assert_eq!(article.images().len(), 1);
        assert_eq!(article.images()[0].src, "https://a/1.png");
        assert_eq!(article.get("images").unwrap()[0]["width"], 640);
    }

    #[test]
    fn test_submit_response_without_message() {
        let reply: SubmitResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(reply.success);
        assert!(reply.message.is_none());
    }

    #[test]
    fn test_clamped_progress() {
        assert_eq!(clamp_progress(-5.0), 0.0);
        assert_eq!(clamp_progress(42.5), 42.5);
        assert_eq!(clamp_progress(250.0), 100.0);
        assert_eq!(clamp_progress(f64::NAN), 0.0);
    }
}
