//! Pure projection from controller state to a drawable frame.
//!
//! `render` has no side effects and no terminal dependency; the terminal
//! front end paints whatever frame it returns after every mutation.

use crate::api::HistoryEntry;
use crate::config::Theme;
use crate::controller::CalcState;

/// Shown in place of the history list when it is empty.
pub const EMPTY_HISTORY_MESSAGE: &str = "No history found.";

/// How the display line should be emphasised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTone {
    Normal,
    /// An evaluation is outstanding.
    Busy,
    /// The buffer holds a freshly evaluated result.
    Acknowledged,
    /// The buffer holds an error marker.
    Error,
}

/// One selectable history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub label: String,
    pub selected: bool,
}

/// Presentation-only inputs that do not belong to the controller.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Highlighted history row.
    pub selected: Option<usize>,
    /// Transient status message (errors, rejected keys, hints).
    pub status: Option<String>,
    /// Text typed into the search prompt, when it is open.
    pub search_prompt: Option<String>,
    pub theme: Theme,
}

/// Everything the terminal needs to draw one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub display: String,
    pub tone: DisplayTone,
    pub history_title: String,
    pub history: Vec<HistoryRow>,
    pub empty_message: Option<&'static str>,
    pub status: Option<String>,
    pub search_prompt: Option<String>,
    pub theme: Theme,
}

/// Project `state` (plus presentation options) into a frame.
pub fn render(state: &CalcState, options: &ViewOptions) -> Frame {
    let buffer = state.buffer();
    let tone = if state.is_evaluating() {
        DisplayTone::Busy
    } else if buffer.is_error_marker() {
        DisplayTone::Error
    } else if state.is_acknowledged() {
        DisplayTone::Acknowledged
    } else {
        DisplayTone::Normal
    };

    let history = state
        .history()
        .iter()
        .enumerate()
        .map(|(idx, entry)| HistoryRow {
            label: history_label(entry),
            selected: options.selected == Some(idx),
        })
        .collect::<Vec<_>>();

    let history_title = match state.history_filter() {
        Some(query) => format!("History (search: {query})"),
        None => "History".to_string(),
    };

    let status = if state.is_evaluating() {
        Some("evaluating...".to_string())
    } else {
        options.status.clone()
    };

    Frame {
        display: buffer.as_str().to_string(),
        tone,
        history_title,
        empty_message: history.is_empty().then_some(EMPTY_HISTORY_MESSAGE),
        history,
        status,
        search_prompt: options.search_prompt.clone(),
        theme: options.theme,
    }
}

/// `expression = result`, as shown in the history list.
pub fn history_label(entry: &HistoryEntry) -> String {
    format!("{} = {}", entry.expression, entry.result)
}

/// Numbered listing used by the `history` subcommand and line mode.
///
/// Rows carry the service id and timestamp when present:
/// `3. 2+2 = 4 at 2024-01-01 10:00:00`.
pub fn history_listing(entries: &[HistoryEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec![EMPTY_HISTORY_MESSAGE.to_string()];
    }
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let number = entry.id.unwrap_or(idx as i64 + 1);
            let mut line = format!("{number}. {}", history_label(entry));
            if let Some(ts) = entry.timestamp.as_deref().filter(|ts| !ts.is_empty()) {
                line.push_str(" at ");
                line.push_str(ts);
            }
            line
        })
        .collect()
}
