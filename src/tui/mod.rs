pub mod app;
pub mod clipboard;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;

use crate::app::{AppContext, GleanerError, Result};
use crate::config::Config;
use crate::controller::JobController;

use self::app::{InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: &AppContext) -> Result<()> {
    let config: &Config = &ctx.config;
    let mut tui_app = TuiApp::new();
    let mut controller = ctx.job_controller();
    let event_handler = EventHandler::new(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) if tui_app.input_mode == InputMode::Editing => {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        tui_app.should_quit = true;
                    }
                    KeyCode::Enter => {
                        submit(terminal, &mut tui_app, &mut controller, config).await?;
                    }
                    KeyCode::Esc => tui_app.input_mode = InputMode::Normal,
                    KeyCode::Backspace => tui_app.pop_char(),
                    KeyCode::Char(c) => tui_app.push_char(c),
                    _ => {}
                }
            }
            AppEvent::Key(key) => {
                handle_action(key, terminal, &mut tui_app, &mut controller, ctx).await?;
            }
            AppEvent::Resize | AppEvent::Tick => {}
        }

        // Pending job events, whatever woke the loop
        apply_job_events(&mut tui_app, &mut controller);

        if tui_app.should_quit {
            break;
        }
    }

    controller.stop();
    Ok(())
}

fn apply_job_events(tui_app: &mut TuiApp, controller: &mut JobController) {
    for event in controller.drain_events() {
        tui_app.apply_event(&event);
    }
}

async fn handle_action(
    key: KeyEvent,
    terminal: &mut Tui,
    tui_app: &mut TuiApp,
    controller: &mut JobController,
    ctx: &AppContext,
) -> Result<()> {
    tui_app.clear_status();

    match ctx.config.keybindings.get_action(&key) {
        Action::Quit => tui_app.should_quit = true,
        Action::MoveUp => tui_app.move_up(),
        Action::MoveDown => tui_app.move_down(),
        Action::NextPage => tui_app.next_page(),
        Action::PrevPage => tui_app.prev_page(),
        Action::EditUrl => tui_app.input_mode = InputMode::Editing,
        Action::Submit => submit(terminal, tui_app, controller, &ctx.config).await?,
        Action::Clear => {
            controller.clear();
            tui_app.clear_result();
        }
        Action::ToggleHistory => {
            if tui_app.toggle_history() {
                // Always re-fetch; the list may have grown since last time
                tui_app.history = None;
                terminal.draw(|frame| layout::render(frame, tui_app, &ctx.config.colors))?;
                let view = ctx.history.load().await;
                tui_app.set_history(view);
            }
        }
        Action::ExportJson => match controller.current_result() {
            Some(result) => report(tui_app, "Saved JSON to", ctx.exporter.export_json(result)),
            None => tui_app.set_status("No article to export".to_string()),
        },
        Action::ExportHtml => match controller.current_result() {
            Some(result) => report(tui_app, "Saved HTML to", ctx.exporter.export_html(result)),
            None => tui_app.set_status("No article to export".to_string()),
        },
        Action::CopyJson => match controller.current_result() {
            Some(result) => match clipboard::copy_json(terminal.backend_mut(), result) {
                Ok(()) => tui_app.set_status("Copied JSON to clipboard".to_string()),
                Err(e) => {
                    warn!("Clipboard copy failed: {}", e);
                    tui_app.set_status(format!("Error: {}", e));
                }
            },
            None => tui_app.set_status("No article to copy".to_string()),
        },
        Action::Preview => match controller.current_result() {
            Some(result) => report(tui_app, "Opened preview", ctx.exporter.preview_html(result)),
            None => tui_app.set_status("No article to preview".to_string()),
        },
        Action::Download => {
            let filename = tui_app
                .selected_history_entry()
                .filter(|_| tui_app.history_visible)
                .map(|entry| entry.filename.clone());
            match filename {
                Some(filename) => match ctx.history.open_download(&filename) {
                    Ok(url) => tui_app.set_status(format!("Opened {}", url)),
                    Err(e) => tui_app.set_status(format!("Failed to open download: {}", e)),
                },
                None => tui_app.set_status("Select a history file first".to_string()),
            }
        }
        Action::None => {}
    }

    Ok(())
}

/// Submit the URL line. Errors land in the result slot; only terminal
/// failures propagate.
async fn submit(
    terminal: &mut Tui,
    tui_app: &mut TuiApp,
    controller: &mut JobController,
    config: &Config,
) -> Result<()> {
    if controller.is_busy() {
        tui_app.set_status("A scrape is already in progress".to_string());
        return Ok(());
    }

    controller.clear();
    tui_app.begin_job();
    tui_app.is_submitting = true;
    terminal.draw(|frame| layout::render(frame, tui_app, &config.colors))?;

    let outcome = controller.submit(&tui_app.url_input).await;
    tui_app.is_submitting = false;

    match outcome {
        Ok(()) => {
            tui_app.input_mode = InputMode::Normal;
            tui_app.set_status(format!("Scraping {}", tui_app.url_input.trim()));
        }
        Err(e @ (GleanerError::EmptyUrl | GleanerError::Job(_))) => {
            tui_app.show_error(&e.to_string());
        }
        Err(e) => {
            warn!("Submit failed: {}", e);
            tui_app.show_error(&e.to_string());
        }
    }
    Ok(())
}

fn report(tui_app: &mut TuiApp, what: &str, outcome: Result<std::path::PathBuf>) {
    match outcome {
        Ok(path) => tui_app.set_status(format!("{} {}", what, path.display())),
        Err(e) => {
            warn!("{} failed: {}", what, e);
            tui_app.set_status(format!("Error: {}", e));
        }
    }
}
