use thiserror::Error;

#[derive(Error, Debug)]
pub enum GleanerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Please enter a valid URL")]
    EmptyUrl,

    #[error("A scrape is already in progress")]
    Busy,

    #[error(transparent)]
    Job(#[from] crate::controller::JobFailure),

    #[error("No article result available")]
    NoResult,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GleanerError>;
