use crate::history::{HistoryView, LOAD_FAILED, NO_HISTORY};
use crate::render::{Block, Fragment, FragmentKind};

pub fn render_history(view: &HistoryView) -> Fragment {
    match view {
        HistoryView::Entries(entries) => {
            entries
                .iter()
                .fold(Fragment::new(FragmentKind::History), |fragment, entry| {
                    fragment.push(Block::HistoryItem {
                        filename: entry.filename.clone(),
                        size_kb: entry.size_kb(),
                        modified: entry.display_modified(),
                    })
                })
        }
        HistoryView::Empty => notice(NO_HISTORY.to_string()),
        HistoryView::Refused(Some(message)) => notice(format!("{}: {}", LOAD_FAILED, message)),
        HistoryView::Refused(None) => notice(LOAD_FAILED.to_string()),
        HistoryView::Failed(error) => notice(format!("{}: {}", LOAD_FAILED, error)),
    }
}

fn notice(text: String) -> Fragment {
    Fragment::new(FragmentKind::Notice).push(Block::Text(text))
}
