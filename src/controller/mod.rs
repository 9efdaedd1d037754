//! Input/history controller.
//!
//! Owns the input buffer and the history list, and sequences every write to
//! them around the one asynchronous gap: the remote evaluation round trip.
//! While an evaluation is outstanding, buffer mutations are rejected with
//! [`ControllerError::EvaluationInFlight`] so the eventual result can never
//! overwrite an unrelated edit. History refresh, search, and clear do not
//! touch the buffer and stay available.

mod state;

pub use state::{CalcState, InputBuffer, Phase, ERROR_SENTINEL};

use crate::api::{CalcService, HistoryEntry};
use crate::error::{ApiError, ControllerError};
use std::sync::Arc;

/// Blocking yes/no prompt used before destructive operations.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Prompt shown before deleting the remote history.
pub const CLEAR_HISTORY_PROMPT: &str = "Are you sure? This will delete all history.";

/// What an evaluation did to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationOutcome {
    /// The buffer was empty; no request was sent.
    Skipped,
    /// The service answered; the buffer now holds `result`.
    Evaluated { result: String },
    /// The request failed; the buffer now holds [`ERROR_SENTINEL`].
    Failed,
}

/// What `clear_history` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearHistoryOutcome {
    /// The user declined; nothing was sent.
    Declined,
    /// The service accepted the clear.
    Cleared,
    /// The clear request failed (logged); history was still refreshed.
    Failed,
}

/// An evaluation that has been started but not yet applied.
///
/// Produced by [`Controller::begin_evaluation`]; run it (possibly on another
/// task) and hand the result to [`Controller::complete_evaluation`].
pub struct PendingEvaluation {
    expression: String,
    service: Arc<dyn CalcService>,
}

impl PendingEvaluation {
    /// The exact buffer text that will be sent.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Perform the remote round trip.
    pub async fn run(self) -> Result<String, ApiError> {
        self.service.evaluate(&self.expression).await
    }
}

impl std::fmt::Debug for PendingEvaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingEvaluation")
            .field("expression", &self.expression)
            .finish_non_exhaustive()
    }
}

/// Mediates between the input buffer, the history list, and the service.
pub struct Controller {
    service: Arc<dyn CalcService>,
    state: CalcState,
}

impl Controller {
    pub fn new(service: Arc<dyn CalcService>) -> Self {
        Self {
            service,
            state: CalcState::default(),
        }
    }

    /// Current state, for rendering.
    pub fn state(&self) -> &CalcState {
        &self.state
    }

    /// Concatenate `fragment` onto the buffer. No validation is performed.
    pub fn append(&mut self, fragment: &str) -> Result<(), ControllerError> {
        self.ensure_idle("append")?;
        self.state.buffer.append(fragment);
        self.state.acknowledged = false;
        Ok(())
    }

    /// Reset the buffer to empty, including from an error marker.
    pub fn clear(&mut self) -> Result<(), ControllerError> {
        self.ensure_idle("clear")?;
        self.state.buffer.clear();
        self.state.acknowledged = false;
        Ok(())
    }

    /// Remove the final character. Returns `false` when nothing changed
    /// (empty buffer or error marker).
    pub fn delete_last(&mut self) -> Result<bool, ControllerError> {
        self.ensure_idle("delete_last")?;
        let changed = self.state.buffer.delete_last();
        if changed {
            self.state.acknowledged = false;
        }
        Ok(changed)
    }

    /// Activate history entry `index`: the buffer is replaced by the entry's
    /// expression (never its result).
    pub fn recall(&mut self, index: usize) -> Result<(), ControllerError> {
        self.ensure_idle("recall")?;
        let expression = self
            .state
            .history
            .get(index)
            .map(|entry| entry.expression.clone())
            .ok_or(ControllerError::NoSuchEntry(index))?;
        self.state.buffer.replace(expression);
        self.state.acknowledged = false;
        Ok(())
    }

    /// Enter the awaiting-evaluation phase and return the request to run.
    ///
    /// Returns `Ok(None)` for an empty buffer (nothing is sent).
    pub fn begin_evaluation(&mut self) -> Result<Option<PendingEvaluation>, ControllerError> {
        self.ensure_idle("evaluate")?;
        if self.state.buffer.is_empty() {
            return Ok(None);
        }
        self.state.phase = Phase::AwaitingEvaluation;
        self.state.acknowledged = false;
        Ok(Some(PendingEvaluation {
            expression: self.state.buffer.as_str().to_string(),
            service: Arc::clone(&self.service),
        }))
    }

    /// Apply the result of a [`PendingEvaluation`] and return to idle.
    ///
    /// The caller is responsible for refreshing history after
    /// [`EvaluationOutcome::Evaluated`]; [`Controller::evaluate`] does so.
    pub fn complete_evaluation(&mut self, outcome: Result<String, ApiError>) -> EvaluationOutcome {
        self.state.phase = Phase::Idle;
        match outcome {
            Ok(result) => {
                self.state.buffer.replace(result.clone());
                self.state.acknowledged = true;
                EvaluationOutcome::Evaluated { result }
            }
            Err(err) => {
                tracing::warn!(error = %err, "evaluation failed");
                self.state.buffer.replace(ERROR_SENTINEL);
                self.state.acknowledged = false;
                EvaluationOutcome::Failed
            }
        }
    }

    /// Send the buffer for evaluation, apply the result, and refresh history
    /// on success. A failed evaluation does not refresh history.
    pub async fn evaluate(&mut self) -> Result<EvaluationOutcome, ControllerError> {
        let Some(pending) = self.begin_evaluation()? else {
            return Ok(EvaluationOutcome::Skipped);
        };
        let response = pending.run().await;
        let outcome = self.complete_evaluation(response);
        if matches!(outcome, EvaluationOutcome::Evaluated { .. }) {
            self.refresh_history().await;
        }
        Ok(outcome)
    }

    /// Replace the history list with the service's full history.
    ///
    /// On failure the previous list stays visible; returns whether the list
    /// was replaced.
    pub async fn refresh_history(&mut self) -> bool {
        let result = self.service.list_history().await;
        self.apply_history(result, None)
    }

    /// Replace the history list with entries matching `query`.
    pub async fn search_history(&mut self, query: &str) -> bool {
        let result = self.service.search_history(query).await;
        self.apply_history(result, Some(query.to_string()))
    }

    /// Install a fetched history list, or log the failure and keep the old one.
    pub fn apply_history(
        &mut self,
        result: Result<Vec<HistoryEntry>, ApiError>,
        filter: Option<String>,
    ) -> bool {
        match result {
            Ok(entries) => {
                self.state.history = entries;
                self.state.history_filter = filter;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "history fetch failed; keeping previous list");
                false
            }
        }
    }

    /// Delete the remote history after explicit confirmation, then refresh.
    ///
    /// The refresh runs whether or not the clear request succeeded.
    pub async fn clear_history(&mut self, confirm: &dyn Confirm) -> ClearHistoryOutcome {
        if !confirm.confirm(CLEAR_HISTORY_PROMPT) {
            return ClearHistoryOutcome::Declined;
        }
        let outcome = match self.service.clear_history().await {
            Ok(()) => {
                tracing::info!("history cleared");
                ClearHistoryOutcome::Cleared
            }
            Err(err) => {
                tracing::warn!(error = %err, "clearing history failed");
                ClearHistoryOutcome::Failed
            }
        };
        self.refresh_history().await;
        outcome
    }

    fn ensure_idle(&self, operation: &'static str) -> Result<(), ControllerError> {
        if self.state.is_evaluating() {
            tracing::debug!(operation, "rejected while evaluation in flight");
            return Err(ControllerError::EvaluationInFlight);
        }
        Ok(())
    }
}
