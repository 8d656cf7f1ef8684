use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block as Pane, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::clamp_progress;
use crate::render::{Block, Fragment, FragmentKind};
use crate::tui::app::{ActivePane, InputMode, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL input
            Constraint::Length(3), // Progress gauge
            Constraint::Min(8),    // Result (and history)
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_input(frame, app, chunks[0], colors);
    render_progress(frame, app, chunks[1], colors);

    if app.history_visible {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);
        render_result_pane(frame, app, body[0], colors);
        render_history_pane(frame, app, body[1], colors);
    } else {
        render_result_pane(frame, app, chunks[2], colors);
    }

    render_status_bar(frame, app, chunks[3], colors);
}

fn border_style(active: bool, colors: &ColorConfig) -> Style {
    if active {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn render_input(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let editing = app.input_mode == InputMode::Editing;
    let title = if editing {
        " Article URL (Enter: scrape, Esc: done) "
    } else {
        " Article URL "
    };

    let paragraph = Paragraph::new(app.url_input.as_str()).block(
        Pane::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style(editing, colors)),
    );
    frame.render_widget(paragraph, area);

    if editing {
        let x = area.x + 1 + app.url_input.chars().count() as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_progress(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let (ratio, label) = match &app.progress {
        Some(p) => {
            let percent = clamp_progress(p.percent);
            (percent / 100.0, format!("{:.0}% {}", percent, p.message))
        }
        None if app.is_submitting => (0.0, "Submitting...".to_string()),
        None => (0.0, "Idle".to_string()),
    };

    let gauge = Gauge::default()
        .block(Pane::default().title(" Progress ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(colors.gauge))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_result_pane(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Result && app.input_mode == InputMode::Normal;

    let (title, content) = match &app.result_view {
        Some(fragment) if fragment.is_error() => (" Error ", fragment_text(fragment, colors)),
        Some(fragment) => (" Result ", fragment_text(fragment, colors)),
        None => (" Result ", Text::from("Enter an article URL and press Enter")),
    };

    let paragraph = Paragraph::new(content)
        .block(
            Pane::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style(is_active, colors)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.result_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_history_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::History && app.input_mode == InputMode::Normal;
    let pane = Pane::default()
        .title(format!(" History ({}) ", app.history_entries().len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let fragment = match app.history_fragment() {
        Some(fragment) => fragment,
        None => {
            frame.render_widget(Paragraph::new("Loading...").block(pane), area);
            return;
        }
    };

    if fragment.kind != FragmentKind::History {
        let paragraph = Paragraph::new(fragment_text(&fragment, colors))
            .block(pane)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = fragment
        .blocks
        .iter()
        .map(|block| ListItem::new(Text::from(block_lines(block, colors))))
        .collect();

    let list = List::new(items)
        .block(pane)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.history_list_state);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.input_mode == InputMode::Editing {
        "Type a URL  Enter:Scrape  Esc:Keys  Ctrl+c:Quit".to_string()
    } else if app.history_visible {
        "j/k:Select  d:Open file  h:Hide history  i:Edit URL  q:Quit".to_string()
    } else {
        "i:Edit URL  Enter:Scrape  c:Clear  J:JSON  H:HTML  y:Copy  v:Preview  h:History  q:Quit"
            .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

/// Styled lines for a whole fragment.
pub fn fragment_text(fragment: &Fragment, colors: &ColorConfig) -> Text<'static> {
    let lines: Vec<Line<'static>> = fragment
        .blocks
        .iter()
        .flat_map(|block| block_lines(block, colors))
        .collect();

    let text = Text::from(lines);
    if fragment.is_error() {
        text.style(Style::default().fg(colors.error))
    } else {
        text
    }
}

fn block_lines(block: &Block, colors: &ColorConfig) -> Vec<Line<'static>> {
    let label_style = Style::default()
        .fg(colors.label)
        .add_modifier(Modifier::BOLD);

    match block {
        Block::Field { label, value } => vec![Line::from(vec![
            Span::styled(format!("{}: ", label), label_style),
            Span::raw(value.clone()),
        ])],
        Block::Code { label, text } => {
            let mut lines = vec![Line::from(""), Line::styled(format!("{}:", label), label_style)];
            lines.extend(
                text.lines()
                    .map(|l| Line::styled(l.to_string(), Style::default().fg(colors.json))),
            );
            lines
        }
        Block::Text(text) => vec![Line::from(text.clone())],
        Block::HistoryItem {
            filename,
            size_kb,
            modified,
        } => vec![
            Line::from(Span::styled(
                filename.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("  Size: {} KB | Modified: {}", size_kb, modified)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ArticleResult;
    use crate::render::{render_error, render_summary};
    use ratatui::{backend::TestBackend, Terminal};

    fn plain(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_summary_lines() {
        let article: ArticleResult = serde_json::from_value(serde_json::json!({"title": "Rust"})).unwrap();
        let text = fragment_text(&render_summary(&article), &ColorConfig::default());
        let lines = plain(&text);

        assert_eq!(lines[0], "Title: Rust");
        assert_eq!(lines[1], "Author: unknown");
        assert!(lines.contains(&"JSON:".to_string()));
        assert!(lines.contains(&"  \"title\": \"Rust\"".to_string()));
    }

    #[test]
    fn test_error_lines_use_error_color() {
        let colors = ColorConfig::default();
        let text = fragment_text(&render_error("Network error: refused"), &colors);
        assert_eq!(plain(&text), vec!["Error: Network error: refused"]);
        assert_eq!(text.style.fg, Some(colors.error));
    }

    #[test]
    fn test_full_frame_renders() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = TuiApp::new();
        app.url_input = "https://example.com/a".into();
        app.show_error("Scrape failed");
        app.toggle_history();

        terminal
            .draw(|frame| render(frame, &mut app, &ColorConfig::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(screen.contains("https://example.com/a"));
        assert!(screen.contains("Error: Scrape failed"));
        assert!(screen.contains("Loading..."));
    }
}
