use std::path::Path;

use crate::app::{AppContext, GleanerError, Result};
use crate::cli::OutputOptions;
use crate::controller::JobEvent;
use crate::domain::ArticleResult;
use crate::render::{render_error, render_history, render_progress, render_summary};

/// Submit `url`, print progress until the job ends, then export on request.
pub async fn scrape(ctx: &AppContext, url: &str, json: bool, output: OutputOptions) -> Result<()> {
    let mut controller = ctx.job_controller();
    controller.submit(url).await?;
    println!("Scraping {}", url.trim());

    while let Some(event) = controller.next_event().await {
        match event {
            JobEvent::Progress { progress, message } => {
                println!("{}", render_progress(progress, &message));
            }
            JobEvent::Completed(result) => {
                println!("\n{}", render_summary(&result).to_plain_text());
            }
            JobEvent::Failed(failure) => return Err(failure.into()),
        }
    }

    let result = controller.current_result().ok_or(GleanerError::NoResult)?;
    if json {
        let path = ctx.exporter.export_json(result)?;
        println!("Saved JSON to {}", path.display());
    }
    write_outputs(ctx, result, output)
}

/// Fetch the job status once.
pub async fn status(ctx: &AppContext) -> Result<()> {
    let status = ctx.api.status().await?;

    if status.is_running {
        println!("{}", render_progress(status.progress, &status.message));
        return Ok(());
    }

    match (status.result.as_ref(), status.error.as_deref()) {
        (Some(result), _) => println!("{}", render_summary(result).to_plain_text()),
        (None, Some(error)) => println!("{}", render_error(error).to_plain_text()),
        (None, None) => println!("No job running"),
    }
    Ok(())
}

pub async fn history(ctx: &AppContext) -> Result<()> {
    let view = ctx.history.load().await;
    println!("{}", render_history(&view).to_plain_text());
    Ok(())
}

pub async fn download(ctx: &AppContext, filename: &str, save: bool) -> Result<()> {
    if save {
        let path = ctx
            .history
            .save_download(filename, ctx.exporter.directory())
            .await?;
        println!("Saved to {}", path.display());
    } else {
        let url = ctx.history.open_download(filename)?;
        println!("Opened {}", url);
    }
    Ok(())
}

/// Load a previously exported article and render it again.
pub fn export(ctx: &AppContext, path: &Path, output: OutputOptions) -> Result<()> {
    let result = read_article(path)?;
    println!("{}", render_summary(&result).to_plain_text());
    write_outputs(ctx, &result, output)
}

pub fn read_article(path: &Path) -> Result<ArticleResult> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_outputs(ctx: &AppContext, result: &ArticleResult, output: OutputOptions) -> Result<()> {
    if output.html {
        let path = ctx.exporter.export_html(result)?;
        println!("Saved HTML to {}", path.display());
    }
    if output.preview {
        let path = ctx.exporter.preview_html(result)?;
        println!("Opened preview {}", path.display());
    }
    Ok(())
}
