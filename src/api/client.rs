//! reqwest-backed implementation of [`CalcService`].

use super::wire::{
    format_result_value, EvaluateRequest, EvaluateResponse, HistoryEntry, SearchRequest,
};
use super::CalcService;
use crate::config::ServiceConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the calculator service.
#[derive(Debug, Clone)]
pub struct HttpCalcService {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCalcService {
    /// Build a client from resolved service configuration.
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_timeout(
            &config.base_url,
            Duration::from_secs(config.timeout_secs.max(1)),
        )
    }

    /// Build a client for `base_url` with an explicit per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        // Fall back to reqwest defaults if builder creation fails for any reason.
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                code: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }
}

#[async_trait]
impl CalcService for HttpCalcService {
    async fn evaluate(&self, expression: &str) -> Result<String, ApiError> {
        tracing::debug!(expression, "POST /calculate");
        let payload: EvaluateResponse = self
            .send_json(
                self.http
                    .post(self.url("calculate"))
                    .json(&EvaluateRequest { expression }),
            )
            .await?;
        format_result_value(&payload.result).ok_or_else(|| {
            ApiError::InvalidResponse(format!("unsupported result value: {}", payload.result))
        })
    }

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        tracing::debug!("GET /history");
        self.send_json(self.http.get(self.url("history"))).await
    }

    async fn search_history(&self, query: &str) -> Result<Vec<HistoryEntry>, ApiError> {
        tracing::debug!(query, "POST /search");
        self.send_json(
            self.http
                .post(self.url("search"))
                .json(&SearchRequest { query }),
        )
        .await
    }

    async fn clear_history(&self) -> Result<(), ApiError> {
        tracing::debug!("POST /clear");
        // The `{"status": "cleared"}` payload carries nothing beyond success.
        self.send(self.http.post(self.url("clear"))).await.map(|_| ())
    }
}
