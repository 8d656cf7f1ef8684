pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gleaner")]
#[command(about = "A terminal client for an article scraping service", long_about = None)]
pub struct Cli {
    /// Config file to load instead of ~/.config/gleaner/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the scraping service (overrides the config file)
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape an article and wait for the result
    Scrape {
        /// URL of the article to scrape
        url: String,

        #[command(flatten)]
        output: OutputOptions,

        /// Also save the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the state of the current job
    Status,
    /// List previously exported files
    History,
    /// Open a history file in the browser, or save it
    Download {
        /// File name as shown by `gleaner history`
        filename: String,

        /// Save into the export directory instead of opening the browser
        #[arg(long)]
        save: bool,
    },
    /// Re-render an article from a JSON export
    Export {
        /// Path to an exported article JSON file
        path: PathBuf,

        #[command(flatten)]
        output: OutputOptions,
    },
    /// Launch the TUI
    Tui,
}

/// What to produce from a finished article besides the printed summary.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Save the article as a standalone HTML document
    #[arg(long)]
    pub html: bool,

    /// Open the HTML document in the browser
    #[arg(long)]
    pub preview: bool,
}
