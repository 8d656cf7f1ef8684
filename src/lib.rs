//! # Gleaner
//!
//! A terminal client for an article scraping service.
//!
//! ## Architecture
//!
//! ```text
//! URL → JobController → (poll task) → JobEvent → render / document → terminal, files
//! ```
//!
//! - [`client`]: the four service endpoints behind the [`ScrapeApi`](client::ScrapeApi) trait
//! - [`controller`]: submits a job and polls its status until it finishes
//! - [`render`]: pure view functions producing display fragments
//! - [`document`]: standalone HTML documents with SEO metadata
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape an article and save it as HTML
//! gleaner scrape https://mp.weixin.qq.com/s/abc --html
//!
//! # Browse what the service has exported so far
//! gleaner history
//!
//! # Launch TUI
//! gleaner tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the API client,
/// history lister and exporter from the loaded configuration.
pub mod app;

/// Command-line interface using clap.
///
/// - `scrape <url> [--json] [--html] [--preview]`
/// - `status`, `history`, `download <filename> [--save]`
/// - `export <file.json> [--html] [--preview]`
/// - `tui`
pub mod cli;

/// HTTP access to the scraping service.
///
/// - [`ScrapeApi`](client::ScrapeApi): async trait over the endpoints
/// - [`HttpScrapeClient`](client::HttpScrapeClient): reqwest-based implementation
pub mod client;

/// Configuration loaded from `~/.config/gleaner/config.toml`.
pub mod config;

/// Scrape job lifecycle and the status poll task.
pub mod controller;

/// Standalone HTML generation: SEO metadata, body and export file names.
pub mod document;

/// Wire and domain models.
///
/// - [`ArticleResult`](domain::ArticleResult): a scraped article, extra fields preserved
/// - [`JobStatus`](domain::JobStatus): one status poll
/// - [`HistoryEntry`](domain::HistoryEntry): one exported file on the server
pub mod domain;

/// Writing JSON/HTML exports and browser previews.
pub mod export;

/// Loading the export history and downloading its files.
pub mod history;

/// Display fragments for results, errors and history.
pub mod render;

/// Terminal user interface.
///
/// URL input, progress gauge, result slot and a toggleable history pane.
pub mod tui;
