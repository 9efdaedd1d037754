//! Client side of the remote calculator service.
//!
//! - `wire`: request/response payloads for `/calculate`, `/history`,
//!   `/search`, and `/clear`.
//! - `client`: the reqwest-backed [`HttpCalcService`].

use crate::error::ApiError;
use async_trait::async_trait;

mod client;
mod wire;

pub use client::HttpCalcService;
pub use wire::{format_result_value, HistoryEntry};

/// Remote evaluation/history operations consumed by the controller.
///
/// The controller only ever talks to this trait, so tests can substitute a
/// scripted implementation while production uses [`HttpCalcService`].
#[async_trait]
pub trait CalcService: Send + Sync {
    /// Evaluate `expression` remotely and return the displayable result.
    ///
    /// The result may itself be an error message formatted by the service.
    async fn evaluate(&self, expression: &str) -> Result<String, ApiError>;

    /// Fetch the full history in service-determined order.
    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError>;

    /// Fetch history entries whose expression matches `query`.
    async fn search_history(&self, query: &str) -> Result<Vec<HistoryEntry>, ApiError>;

    /// Delete all history. Calling twice leaves the same end state as once.
    async fn clear_history(&self) -> Result<(), ApiError>;
}
