use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gleaner::app::AppContext;
use gleaner::cli::{commands, Cli, Commands};
use gleaner::config::Config;
use gleaner::render::render_error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Tui))?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    let ctx = AppContext::new(config)?;

    let outcome = match cli.command {
        Commands::Scrape { url, output, json } => {
            commands::scrape(&ctx, &url, json, output).await
        }
        Commands::Status => commands::status(&ctx).await,
        Commands::History => commands::history(&ctx).await,
        Commands::Download { filename, save } => commands::download(&ctx, &filename, save).await,
        Commands::Export { path, output } => commands::export(&ctx, &path, output),
        Commands::Tui => gleaner::tui::run(Arc::new(ctx)).await,
    };

    if let Err(e) = outcome {
        eprintln!("{}", render_error(&e.to_string()).to_plain_text());
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr, or to `<data dir>/gleaner/gleaner.log` while the TUI owns the screen.
fn init_tracing(to_file: bool) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    if to_file {
        let path = AppContext::log_dir()?.join("gleaner.log");
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        registry
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
