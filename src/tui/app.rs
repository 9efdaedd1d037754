//! Interactive full-screen session.
//!
//! [`Session`] turns key actions into controller calls and keeps the
//! presentation-only state (selection, status line, search prompt, theme).
//! [`run`] owns the terminal: it polls for key events, spawns evaluation
//! round trips onto the runtime, and repaints after every change.

use crate::config::Theme;
use crate::controller::{
    ClearHistoryOutcome, Confirm, Controller, EvaluationOutcome, PendingEvaluation,
};
use crate::error::ApiError;
use crate::settings::SettingsStore;
use crate::tui::confirm::TerminalConfirm;
use crate::tui::keymap::{map_key, KeyAction};
use crate::tui::screen::Screen;
use crate::tui::settings;
use crate::view::{self, Frame, ViewOptions};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// What the event loop must do after a key was handled.
#[derive(Debug)]
pub enum Step {
    Continue,
    /// Run this evaluation off the input loop.
    Spawn(PendingEvaluation),
    Quit,
}

pub struct Session {
    controller: Controller,
    settings: Arc<dyn SettingsStore>,
    theme: Theme,
    selected: Option<usize>,
    status: Option<String>,
    search: Option<String>,
}

impl Session {
    pub fn new(controller: Controller, settings: Arc<dyn SettingsStore>, theme: Theme) -> Self {
        Self {
            controller,
            settings,
            theme,
            selected: None,
            status: None,
            search: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Current screen contents.
    pub fn frame(&self) -> Frame {
        view::render(
            self.controller.state(),
            &ViewOptions {
                selected: self.selected,
                status: self.status.clone(),
                search_prompt: self.search.clone(),
                theme: self.theme,
            },
        )
    }

    /// Load the initial history list.
    pub async fn start(&mut self) {
        if !self.controller.refresh_history().await {
            self.status = Some("history unavailable".to_string());
        }
        self.clamp_selection();
    }

    /// Handle one key press.
    pub async fn handle_key(&mut self, key: KeyEvent, confirm: &dyn Confirm) -> Step {
        if self.search.is_some() {
            self.handle_search_key(key).await;
            return Step::Continue;
        }
        self.handle_action(map_key(key), confirm).await
    }

    pub async fn handle_action(&mut self, action: KeyAction, confirm: &dyn Confirm) -> Step {
        self.status = None;
        let result = match action {
            KeyAction::None => Ok(()),
            KeyAction::Quit => return Step::Quit,
            KeyAction::Append(fragment) => self.controller.append(fragment),
            KeyAction::DeleteLast => self.controller.delete_last().map(|_| ()),
            KeyAction::Clear => self.controller.clear(),
            KeyAction::Evaluate => match self.controller.begin_evaluation() {
                Ok(Some(pending)) => return Step::Spawn(pending),
                Ok(None) => Ok(()),
                Err(err) => Err(err),
            },
            KeyAction::SelectUp => {
                self.move_selection(-1);
                Ok(())
            }
            KeyAction::SelectDown => {
                self.move_selection(1);
                Ok(())
            }
            KeyAction::Recall => match self.selected {
                Some(index) => self.controller.recall(index),
                None => {
                    self.status = Some("select an entry with ↑/↓ first".to_string());
                    Ok(())
                }
            },
            KeyAction::RefreshHistory => {
                self.refresh().await;
                Ok(())
            }
            KeyAction::OpenSearch => {
                self.search = Some(
                    self.controller
                        .state()
                        .history_filter()
                        .unwrap_or_default()
                        .to_string(),
                );
                Ok(())
            }
            KeyAction::ClearHistory => {
                self.status = Some(match self.controller.clear_history(confirm).await {
                    ClearHistoryOutcome::Declined => "clear cancelled".to_string(),
                    ClearHistoryOutcome::Cleared => "history cleared".to_string(),
                    ClearHistoryOutcome::Failed => "clearing history failed".to_string(),
                });
                self.clamp_selection();
                Ok(())
            }
            KeyAction::ToggleTheme => {
                self.toggle_theme();
                Ok(())
            }
        };
        if let Err(err) = result {
            self.status = Some(err.to_string());
        }
        Step::Continue
    }

    /// Apply a finished evaluation; refresh history when it succeeded.
    pub async fn finish_evaluation(&mut self, response: Result<String, ApiError>) {
        match self.controller.complete_evaluation(response) {
            EvaluationOutcome::Evaluated { .. } => {
                self.status = None;
                self.refresh().await;
            }
            EvaluationOutcome::Failed => {
                self.status = Some("evaluation failed".to_string());
            }
            EvaluationOutcome::Skipped => {}
        }
    }

    async fn handle_search_key(&mut self, key: KeyEvent) {
        let Some(query) = self.search.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.search = None,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search = None
            }
            KeyCode::Backspace => {
                query.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                query.push(ch)
            }
            KeyCode::Enter => {
                let query = self.search.take().unwrap_or_default();
                let query = query.trim();
                if query.is_empty() {
                    self.refresh().await;
                } else if !self.controller.search_history(query).await {
                    self.status = Some("search failed".to_string());
                }
                self.selected = None;
                self.clamp_selection();
            }
            _ => {}
        }
    }

    async fn refresh(&mut self) {
        if !self.controller.refresh_history().await {
            self.status = Some("history refresh failed".to_string());
        }
        self.clamp_selection();
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.controller.state().history().len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            None if delta < 0 => len - 1,
            None => 0,
            Some(current) => {
                let next = current as isize + delta;
                next.clamp(0, len as isize - 1) as usize
            }
        });
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.state().history().len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(idx) => Some(idx.min(len - 1)),
            None => None,
        };
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        match self.settings.save_theme(self.theme) {
            Ok(()) => self.status = Some(format!("theme: {}", self.theme)),
            Err(err) => {
                tracing::warn!(error = %err, "failed to save theme");
                self.status = Some(format!("theme: {} (not saved: {err})", self.theme));
            }
        }
    }
}

/// Run the full-screen interface until the user quits.
pub async fn run(mut session: Session, color: bool) -> io::Result<()> {
    let screen = Screen::open(color)?;
    session.start().await;
    screen.paint(&session.frame())?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Result<String, ApiError>>();
    let poll_interval = Duration::from_millis(settings::EVENT_POLL_MS);

    loop {
        let mut dirty = false;

        if let Ok(response) = rx.try_recv() {
            session.finish_evaluation(response).await;
            dirty = true;
        }

        if event::poll(poll_interval)? {
            match event::read()? {
                Event::Key(key)
                    if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat =>
                {
                    let confirm = TerminalConfirm::new(&screen);
                    match session.handle_key(key, &confirm).await {
                        Step::Continue => {}
                        Step::Quit => break,
                        Step::Spawn(pending) => {
                            tracing::debug!(expression = pending.expression(), "evaluating");
                            let tx = tx.clone();
                            tokio::spawn(async move {
                                let _ = tx.send(pending.run().await);
                            });
                        }
                    }
                    dirty = true;
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }

        if dirty {
            screen.paint(&session.frame())?;
        }
    }

    Ok(())
}
