//! Yes/no confirmation read from the keyboard while the screen is open.

use crate::controller::Confirm;
use crate::tui::screen::Screen;
use crate::tui::settings;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Interpret one key press as an answer; `None` keeps waiting.
pub fn answer_for(key: KeyEvent) -> Option<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c' | 'd'))
    {
        return Some(false);
    }
    match key.code {
        KeyCode::Char('y' | 'Y') => Some(true),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

/// Paints the prompt on the status row and blocks until y or n.
///
/// Terminal errors count as a refusal.
pub struct TerminalConfirm<'a> {
    screen: &'a Screen,
}

impl<'a> TerminalConfirm<'a> {
    pub fn new(screen: &'a Screen) -> Self {
        Self { screen }
    }

    fn wait(&self, prompt: &str) -> std::io::Result<bool> {
        self.screen
            .paint_prompt(&format!("{prompt}{}", settings::CONFIRM_SUFFIX))?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(answer) = answer_for(key) {
                return Ok(answer);
            }
        }
    }
}

impl Confirm for TerminalConfirm<'_> {
    fn confirm(&self, prompt: &str) -> bool {
        match self.wait(prompt) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %err, "confirmation prompt failed");
                false
            }
        }
    }
}
