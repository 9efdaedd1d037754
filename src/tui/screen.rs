//! Full-screen painter for [`Frame`]s.
//!
//! Layout is computed by [`layout`] as plain styled lines so it can be tested
//! without a terminal; [`Screen::paint`] only queues crossterm commands.

use crate::build_info;
use crate::tui::settings::{self, Palette};
use crate::view::Frame;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use std::io::{self, Write};

/// What a screen line shows; picks its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Header,
    Display,
    Rule,
    Title,
    Entry { selected: bool },
    Empty,
    Status,
    Prompt,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    pub role: LineRole,
    pub text: String,
}

impl ScreenLine {
    fn new(role: LineRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Lay `frame` out on a `cols` x `rows` terminal.
///
/// The history list is windowed so the selected row stays visible.
pub fn layout(frame: &Frame, cols: u16, rows: u16, color: bool) -> Vec<ScreenLine> {
    let width = cols.max(1) as usize;
    let clip = |text: &str| -> String { text.chars().take(width).collect() };
    let mut lines = Vec::with_capacity(rows as usize);

    lines.push(ScreenLine::new(
        LineRole::Header,
        clip(&format!("{}  [{}]", build_info::banner_line(), frame.theme)),
    ));
    lines.push(ScreenLine::new(
        LineRole::Display,
        clip(&format!(
            "{}{} {}",
            settings::INDENT,
            settings::LABEL_DISPLAY,
            frame.display
        )),
    ));
    lines.push(ScreenLine::new(LineRole::Rule, "─".repeat(width)));
    lines.push(ScreenLine::new(LineRole::Title, clip(&frame.history_title)));

    let capacity = rows.saturating_sub(settings::CHROME_ROWS).max(1) as usize;
    if let Some(message) = frame.empty_message {
        lines.push(ScreenLine::new(
            LineRole::Empty,
            clip(&format!("{}{message}", settings::INDENT)),
        ));
    } else {
        let selected = frame.history.iter().position(|row| row.selected);
        let start = match selected {
            Some(idx) if idx >= capacity => idx + 1 - capacity,
            _ => 0,
        };
        for row in frame.history.iter().skip(start).take(capacity) {
            let marker = settings::selection_marker(row.selected, color);
            lines.push(ScreenLine::new(
                LineRole::Entry {
                    selected: row.selected,
                },
                clip(&format!("{marker}{}", row.label)),
            ));
        }
    }

    lines.push(ScreenLine::new(LineRole::Rule, "─".repeat(width)));
    match (&frame.search_prompt, &frame.status) {
        (Some(query), _) => lines.push(ScreenLine::new(
            LineRole::Prompt,
            clip(&format!("{}{query}", settings::LABEL_SEARCH)),
        )),
        (None, Some(status)) => lines.push(ScreenLine::new(LineRole::Status, clip(status))),
        (None, None) => lines.push(ScreenLine::new(LineRole::Status, String::new())),
    }
    lines.push(ScreenLine::new(LineRole::Help, clip(settings::HELP_LINE)));
    lines
}

fn role_color(role: LineRole, frame: &Frame, palette: &Palette) -> Color {
    match role {
        LineRole::Header | LineRole::Title => palette.title,
        LineRole::Display => palette.display_color(frame.tone),
        LineRole::Rule | LineRole::Help | LineRole::Empty => palette.muted,
        LineRole::Entry { selected: true } => palette.selected,
        LineRole::Entry { selected: false } | LineRole::Prompt => palette.text,
        LineRole::Status => palette.status,
    }
}

/// Owns the alternate screen and raw mode for the lifetime of the session.
pub struct Screen {
    color: bool,
}

impl Screen {
    /// Enter raw mode and the alternate screen.
    pub fn open(color: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(err) = out.execute(EnterAlternateScreen).and_then(|o| o.execute(Hide)) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { color })
    }

    pub fn size() -> (u16, u16) {
        terminal::size()
            .ok()
            .filter(|(cols, rows)| *cols > 0 && *rows > 0)
            .unwrap_or((settings::FALLBACK_COLUMNS, settings::FALLBACK_ROWS))
    }

    /// Redraw the whole screen.
    pub fn paint(&self, frame: &Frame) -> io::Result<()> {
        let (cols, rows) = Self::size();
        let palette = settings::palette(frame.theme);
        let mut out = io::stdout();
        out.queue(Clear(ClearType::All))?;
        for (row, line) in layout(frame, cols, rows, self.color)
            .iter()
            .take(rows as usize)
            .enumerate()
        {
            out.queue(MoveTo(0, row as u16))?;
            if self.color {
                let styled = line.text.as_str().with(role_color(line.role, frame, &palette));
                let styled = match line.role {
                    LineRole::Display | LineRole::Title => styled.bold(),
                    _ => styled,
                };
                out.queue(PrintStyledContent(styled))?;
            } else {
                out.queue(Print(&line.text))?;
            }
        }
        out.flush()
    }

    /// Replace the status row with `prompt` (used by confirmations).
    pub fn paint_prompt(&self, prompt: &str) -> io::Result<()> {
        let (cols, rows) = Self::size();
        let mut out = io::stdout();
        let text: String = prompt.chars().take(cols as usize).collect();
        out.queue(MoveTo(0, rows.saturating_sub(2)))?;
        out.queue(Clear(ClearType::CurrentLine))?;
        if self.color {
            out.queue(PrintStyledContent(text.as_str().bold()))?;
        } else {
            out.queue(Print(text))?;
        }
        out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = out.execute(Show);
        let _ = out.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::view::{DisplayTone, HistoryRow, EMPTY_HISTORY_MESSAGE};

    fn frame(rows: Vec<HistoryRow>) -> Frame {
        Frame {
            display: "2+2".into(),
            tone: DisplayTone::Normal,
            history_title: "History".into(),
            empty_message: rows.is_empty().then_some(EMPTY_HISTORY_MESSAGE),
            history: rows,
            status: None,
            search_prompt: None,
            theme: Theme::Light,
        }
    }

    fn rows(n: usize, selected: Option<usize>) -> Vec<HistoryRow> {
        (0..n)
            .map(|i| HistoryRow {
                label: format!("{i}+0 = {i}"),
                selected: selected == Some(i),
            })
            .collect()
    }

    #[test]
    fn empty_history_shows_message() {
        let lines = layout(&frame(Vec::new()), 60, 20, true);
        assert_eq!(lines[1].text, "  = 2+2");
        assert!(lines
            .iter()
            .any(|l| l.role == LineRole::Empty && l.text.contains("No history found.")));
    }

    #[test]
    fn selected_row_stays_visible_on_short_terminal() {
        // 10 rows leaves room for 3 history entries.
        let lines = layout(&frame(rows(8, Some(6))), 60, 10, false);
        let entries: Vec<_> = lines
            .iter()
            .filter(|l| matches!(l.role, LineRole::Entry { .. }))
            .collect();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].text, "> 6+0 = 6");
        assert_eq!(entries[0].text, "  4+0 = 4");
    }

    #[test]
    fn search_prompt_replaces_status() {
        let mut f = frame(Vec::new());
        f.status = Some("history refreshed".into());
        f.search_prompt = Some("sq".into());
        let lines = layout(&f, 60, 20, true);
        let prompt = &lines[lines.len() - 2];
        assert_eq!(prompt.role, LineRole::Prompt);
        assert_eq!(prompt.text, "search: sq");
    }

    #[test]
    fn lines_are_clipped_to_width() {
        let mut f = frame(Vec::new());
        f.display = "9".repeat(200);
        for line in layout(&f, 20, 20, true) {
            assert!(line.text.chars().count() <= 20, "{:?}", line);
        }
    }

    #[test]
    fn display_color_follows_tone() {
        let mut f = frame(Vec::new());
        f.tone = DisplayTone::Error;
        let palette = settings::palette(Theme::Light);
        assert_eq!(role_color(LineRole::Display, &f, &palette), palette.error);
    }
}
