//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! This is the single place to tweak labels, glyphs, layout, and the
//! light/dark palettes.

use crate::config::Theme;
use crate::view::DisplayTone;
use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

pub const INDENT: &str = "  ";
pub const FALLBACK_COLUMNS: u16 = 80;
pub const FALLBACK_ROWS: u16 = 24;
/// Rows used by header, display, separators, and status/help lines.
pub const CHROME_ROWS: u16 = 7;

// ---------------------------------------------------------------------------
// Labels / glyphs
// ---------------------------------------------------------------------------

pub const LABEL_DISPLAY: &str = "=";
pub const LABEL_SEARCH: &str = "search: ";
pub const GLYPH_SELECTED: &str = "▶ ";
pub const GLYPH_SELECTED_PLAIN: &str = "> ";
pub const GLYPH_UNSELECTED: &str = "  ";
pub const CONFIRM_SUFFIX: &str = " [y/n] ";
pub const HELP_LINE: &str =
    "enter/= eval  bksp del  esc clear  ↑↓ select  tab recall  ^R refresh  ^F search  ^X clear history  ^T theme  ^C quit";

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

pub const EVENT_POLL_MS: u64 = 50;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub display: Color,
    pub busy: Color,
    pub acknowledged: Color,
    pub error: Color,
    pub selected: Color,
    pub status: Color,
}

const LIGHT: Palette = Palette {
    text: Color::Black,
    muted: Color::DarkGrey,
    title: Color::DarkBlue,
    display: Color::Black,
    busy: Color::DarkYellow,
    acknowledged: Color::DarkGreen,
    error: Color::DarkRed,
    selected: Color::DarkMagenta,
    status: Color::DarkGrey,
};

const DARK: Palette = Palette {
    text: Color::White,
    muted: Color::DarkGrey,
    title: Color::Cyan,
    display: Color::White,
    busy: Color::Yellow,
    acknowledged: Color::Green,
    error: Color::Red,
    selected: Color::Magenta,
    status: Color::Grey,
};

/// Palette for `theme`.
pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}

impl Palette {
    /// Foreground for the display line.
    pub fn display_color(&self, tone: DisplayTone) -> Color {
        match tone {
            DisplayTone::Normal => self.display,
            DisplayTone::Busy => self.busy,
            DisplayTone::Acknowledged => self.acknowledged,
            DisplayTone::Error => self.error,
        }
    }
}

pub fn selection_marker(selected: bool, color: bool) -> &'static str {
    match (selected, color) {
        (true, true) => GLYPH_SELECTED,
        (true, false) => GLYPH_SELECTED_PLAIN,
        (false, _) => GLYPH_UNSELECTED,
    }
}
