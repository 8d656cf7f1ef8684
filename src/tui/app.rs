use ratatui::widgets::ListState;

use crate::controller::{JobEvent, Progress};
use crate::domain::HistoryEntry;
use crate::history::HistoryView;
use crate::render::{render_error, render_history, render_summary, Fragment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Result,
    History,
}

/// Whether keys go to the URL line or to the keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub const PAGE_SIZE: usize = 10;

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub input_mode: InputMode,
    pub url_input: String,
    /// Summary or error; one replaces the other.
    pub result_view: Option<Fragment>,
    pub result_scroll: u16,
    pub progress: Option<Progress>,
    pub is_submitting: bool,
    pub history_visible: bool,
    pub history: Option<HistoryView>,
    pub history_index: usize,
    pub history_list_state: ListState,
    pub should_quit: bool,
    pub status_message: Option<String>,
}

impl TuiApp {
    pub fn new() -> Self {
        Self {
            active_pane: ActivePane::Result,
            input_mode: InputMode::Editing,
            url_input: String::new(),
            result_view: None,
            result_scroll: 0,
            progress: None,
            is_submitting: false,
            history_visible: false,
            history: None,
            history_index: 0,
            history_list_state: ListState::default(),
            should_quit: false,
            status_message: None,
        }
    }

    pub fn history_entries(&self) -> &[HistoryEntry] {
        self.history.as_ref().map(HistoryView::entries).unwrap_or(&[])
    }

    pub fn selected_history_entry(&self) -> Option<&HistoryEntry> {
        self.history_entries().get(self.history_index)
    }

    pub fn history_fragment(&self) -> Option<Fragment> {
        self.history.as_ref().map(render_history)
    }

    /// Replace whatever sits in the result slot.
    pub fn show(&mut self, fragment: Fragment) {
        self.result_view = Some(fragment);
        self.result_scroll = 0;
    }

    pub fn show_error(&mut self, message: &str) {
        self.show(render_error(message));
    }

    /// Empty the result slot and forget progress before a new job.
    pub fn begin_job(&mut self) {
        self.result_view = None;
        self.result_scroll = 0;
        self.progress = None;
    }

    /// Back to a blank screen: empty URL line, no progress or result, history hidden.
    pub fn clear_result(&mut self) {
        self.begin_job();
        self.url_input.clear();
        self.history_visible = false;
        self.active_pane = ActivePane::Result;
        self.set_status("Cleared".to_string());
    }

    /// Reflect a job event in the panes.
    pub fn apply_event(&mut self, event: &JobEvent) {
        match event {
            JobEvent::Progress { progress, message } => {
                self.progress = Some(Progress {
                    percent: *progress,
                    message: message.clone(),
                });
            }
            JobEvent::Completed(result) => {
                self.show(render_summary(result));
                self.set_status(format!("Scraped: {}", result.display_title()));
            }
            JobEvent::Failed(failure) => {
                self.show_error(&failure.to_string());
                self.progress = None;
            }
        }
    }

    pub fn set_history(&mut self, view: HistoryView) {
        self.history = Some(view);
        self.history_index = 0;
        let selected = (!self.history_entries().is_empty()).then_some(0);
        self.history_list_state.select(selected);
    }

    /// Flip the history pane; returns true when it just became visible.
    pub fn toggle_history(&mut self) -> bool {
        self.history_visible = !self.history_visible;
        self.active_pane = if self.history_visible {
            ActivePane::History
        } else {
            ActivePane::Result
        };
        self.history_visible
    }

    pub fn push_char(&mut self, c: char) {
        self.url_input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.url_input.pop();
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Result => {
                self.result_scroll = self.result_scroll.saturating_sub(1);
            }
            ActivePane::History => self.select_history(self.history_index.saturating_sub(1)),
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Result => {
                self.result_scroll = self.result_scroll.saturating_add(1);
            }
            ActivePane::History => self.select_history(self.history_index + 1),
        }
    }

    pub fn next_page(&mut self) {
        match self.active_pane {
            ActivePane::Result => {
                self.result_scroll = self.result_scroll.saturating_add(PAGE_SIZE as u16);
            }
            ActivePane::History => self.select_history(self.history_index + PAGE_SIZE),
        }
    }

    pub fn prev_page(&mut self) {
        match self.active_pane {
            ActivePane::Result => {
                self.result_scroll = self.result_scroll.saturating_sub(PAGE_SIZE as u16);
            }
            ActivePane::History => {
                self.select_history(self.history_index.saturating_sub(PAGE_SIZE))
            }
        }
    }

    fn select_history(&mut self, index: usize) {
        let len = self.history_entries().len();
        if len == 0 {
            return;
        }
        self.history_index = index.min(len - 1);
        self.history_list_state.select(Some(self.history_index));
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::JobFailure;
    use crate::domain::ArticleResult;
    use crate::render::FragmentKind;

    fn entries(n: usize) -> HistoryView {
        HistoryView::Entries(
            (0..n)
                .map(|i| HistoryEntry {
                    filename: format!("article_{}.json", i),
                    size: 2048,
                    modified: "2024-05-01 10:20:30".into(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_clear_resets_every_pane() {
        let mut app = TuiApp::new();
        app.url_input = "https://example.com/a".into();
        app.apply_event(&JobEvent::Progress { progress: 40.0, message: "Fetching".into() });
        app.show_error("boom");
        assert!(app.toggle_history());

        app.clear_result();

        assert!(app.url_input.is_empty());
        assert!(app.progress.is_none());
        assert!(app.result_view.is_none());
        assert!(!app.history_visible);
        assert_eq!(app.active_pane, ActivePane::Result);
        assert_eq!(app.status_message.as_deref(), Some("Cleared"));
    }

    #[test]
    fn test_result_and_error_share_the_slot() {
        let mut app = TuiApp::new();
        let article: ArticleResult = serde_json::from_value(serde_json::json!({"title": "Done"})).unwrap();

        app.apply_event(&JobEvent::Completed(Box::new(article)));
        assert_eq!(app.result_view.as_ref().unwrap().kind, FragmentKind::Summary);

        app.apply_event(&JobEvent::Failed(JobFailure::StatusQuery("timeout".into())));
        let view = app.result_view.as_ref().unwrap();
        assert!(view.is_error());
        assert_eq!(view.to_plain_text(), "Error: Status query failed: timeout");
        assert!(app.progress.is_none());
    }

    #[test]
    fn test_progress_event_updates_gauge() {
        let mut app = TuiApp::new();
        app.apply_event(&JobEvent::Progress {
            progress: 40.0,
            message: "Downloading images".into(),
        });
        let progress = app.progress.as_ref().unwrap();
        assert_eq!(progress.percent, 40.0);
        assert_eq!(progress.message, "Downloading images");
        assert!(app.result_view.is_none());
    }

    #[test]
    fn test_history_selection_stays_in_bounds() {
        let mut app = TuiApp::new();
        assert!(app.toggle_history());
        app.set_history(entries(3));
        assert_eq!(app.history_list_state.selected(), Some(0));

        app.move_down();
        app.move_down();
        app.move_down();
        assert_eq!(app.selected_history_entry().unwrap().filename, "article_2.json");

        app.prev_page();
        assert_eq!(app.history_index, 0);
        app.next_page();
        assert_eq!(app.history_index, 2);

        assert!(!app.toggle_history());
        assert_eq!(app.active_pane, ActivePane::Result);
    }

    #[test]
    fn test_empty_history_has_no_selection() {
        let mut app = TuiApp::new();
        app.toggle_history();
        app.set_history(HistoryView::Empty);
        app.move_down();
        assert!(app.selected_history_entry().is_none());
        assert_eq!(app.history_list_state.selected(), None);
        assert_eq!(
            app.history_fragment().unwrap().to_plain_text(),
            "No scrape history yet"
        );
    }

    #[test]
    fn test_begin_job_resets_result_slot() {
        let mut app = TuiApp::new();
        app.show_error("Please enter a valid URL");
        app.result_scroll = 4;
        app.begin_job();
        assert!(app.result_view.is_none());
        assert_eq!(app.result_scroll, 0);
    }

    #[test]
    fn test_url_editing() {
        let mut app = TuiApp::new();
        for c in "https://x".chars() {
            app.push_char(c);
        }
        app.pop_char();
        assert_eq!(app.url_input, "https://");
    }
}
