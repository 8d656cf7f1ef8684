//! Pure view functions: data in, [`Fragment`] out.
//!
//! Fragments carry no styling and touch no terminal. The CLI prints them with
//! [`Fragment::to_plain_text`]; the TUI turns them into ratatui lines.

mod history;

pub use history::render_history;

use crate::domain::{clamp_progress, ArticleResult};

/// What a fragment represents, so mounts can style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Summary,
    Error,
    History,
    Notice,
}

/// A single displayable piece of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `label: value`
    Field { label: String, value: String },
    /// Preformatted text such as a JSON dump.
    Code { label: String, text: String },
    /// A free-standing line.
    Text(String),
    /// One history file with its action target.
    HistoryItem {
        filename: String,
        size_kb: String,
        modified: String,
    },
}

impl Block {
    fn field(label: &str, value: impl Into<String>) -> Self {
        Block::Field {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub blocks: Vec<Block>,
}

impl Fragment {
    pub fn new(kind: FragmentKind) -> Self {
        Self {
            kind,
            blocks: Vec::new(),
        }
    }

    pub fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == FragmentKind::Error
    }

    /// Render as plain text lines, one block after another.
    pub fn to_plain_text(&self) -> String {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Field { label, value } => out.push(format!("{}: {}", label, value)),
                Block::Code { label, text } => {
                    out.push(format!("{}:", label));
                    out.push(text.clone());
                }
                Block::Text(text) => out.push(text.clone()),
                Block::HistoryItem {
                    filename,
                    size_kb,
                    modified,
                } => {
                    out.push(filename.clone());
                    out.push(format!("  Size: {} KB | Modified: {}", size_kb, modified));
                }
            }
        }
        out.join("\n")
    }
}

/// Summary of a finished scrape: title, author, time and the full JSON.
pub fn render_summary(result: &ArticleResult) -> Fragment {
    let json = result
        .to_pretty_json()
        .unwrap_or_else(|e| format!("<unserializable result: {}>", e));

    Fragment::new(FragmentKind::Summary)
        .push(Block::field("Title", result.display_title()))
        .push(Block::field("Author", result.display_author()))
        .push(Block::field("Scraped at", result.display_scrape_time()))
        .push(Block::Code {
            label: "JSON".to_string(),
            text: json,
        })
}

/// Error shown in the result slot, for application and transport failures alike.
pub fn render_error(message: &str) -> Fragment {
    Fragment::new(FragmentKind::Error).push(Block::field("Error", message))
}

/// One-line progress report, e.g. `[ 50%] Parsing content...`.
pub fn render_progress(progress: f64, message: &str) -> String {
    format!("[{:>3.0}%] {}", clamp_progress(progress), message)
}
