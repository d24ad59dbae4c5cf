//! HTTP Backend Implementation
//!
//! Client for the AdGenius generation service REST API:
//!
//! - `POST /api/generate` — run the full agent workflow for a brief
//! - `POST /api/refine` — one conversational refinement turn
//! - `GET /api/health` — liveness probe
//!
//! Failure bodies are `{"error": "..."}` with a non-2xx status; the
//! service-provided message is surfaced in the returned error so the studio
//! can show it to the user verbatim.

use std::time::Duration;

use async_trait::async_trait;

use super::traits::{GenerationBackend, RefineRequest, RefineResponse};
use crate::brief::Brief;
use crate::config::StudioConfig;
use crate::creative::GenerationResult;

/// Default request timeout; a hung call fails visibly instead of suspending
/// the workflow forever
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the generation service
#[derive(Clone, Debug)]
pub struct HttpBackend {
    /// Service base URL, without a trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend with an explicit base URL and request timeout
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// Create a backend from studio configuration
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &StudioConfig) -> anyhow::Result<Self> {
        Self::new(config.backend_base_url.clone(), config.request_timeout)
    }

    /// Create a backend from environment variables
    ///
    /// Reads `ADGENIUS_BACKEND_URL`, defaulting to the local dev service.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = std::env::var("ADGENIUS_BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    /// Get the generate endpoint URL
    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    /// Get the refine endpoint URL
    fn refine_url(&self) -> String {
        format!("{}/api/refine", self.base_url)
    }

    /// Get the health endpoint URL
    fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url)
    }

    /// Pull the service-provided error message out of a failure body
    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        if detail.is_empty() {
            format!("service returned {status}")
        } else {
            format!("service returned {status}: {detail}")
        }
    }
}

#[async_trait]
impl GenerationBackend for HttpBackend {
    fn name(&self) -> &str {
        "AdGenius HTTP"
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    async fn generate(&self, brief: &Brief) -> anyhow::Result<GenerationResult> {
        let response = self
            .http_client
            .post(self.generate_url())
            .json(brief)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!(Self::error_message(response).await);
        }

        Ok(response.json().await?)
    }

    async fn refine(&self, request: &RefineRequest) -> anyhow::Result<RefineResponse> {
        let response = self
            .http_client
            .post(self.refine_url())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!(Self::error_message(response).await);
        }

        Ok(response.json().await?)
    }
}
