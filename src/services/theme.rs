//! Theme-generation client.
//!
//! DESIGN
//! ======
//! The theme backend fronts a local LLM. Responses are model-shaped JSON, so
//! they are returned as `serde_json::Value` and left for the caller to read.
//! `list_models` and `pull_model` pass straight through to the backend's model
//! management endpoints.

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::config::BackendConfig;
use crate::services::http::{BackendClient, ServiceError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateThemeRequest<'a> {
    instruction: &'a str,
    project_data: &'a Value,
}

#[derive(Debug, Serialize)]
struct PullModelRequest<'a> {
    model: &'a str,
}

/// HTTP client for the theme-generation backend.
#[derive(Debug, Clone)]
pub struct ThemeClient {
    backend: BackendClient,
}

impl ThemeClient {
    /// # Errors
    ///
    /// Returns an error if the base URL is unusable or the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, ServiceError> {
        Ok(Self { backend: BackendClient::new(&config.theme_api_url, config.timeouts)? })
    }

    /// `POST /generate-theme` with `{ instruction, projectData }`.
    ///
    /// # Errors
    ///
    /// Returns the backend's `error` message on a non-2xx response, or a
    /// transport/parse error.
    pub async fn generate_theme(&self, instruction: &str, project_data: &Value) -> Result<Value, ServiceError> {
        info!(instruction_len = instruction.len(), "theme generation requested");
        self.backend
            .post_json(&["generate-theme"], &GenerateThemeRequest { instruction, project_data })
            .await
    }

    /// `GET /models`
    ///
    /// # Errors
    ///
    /// Fails on transport error, non-2xx status, or a non-JSON body.
    pub async fn list_models(&self) -> Result<Value, ServiceError> {
        self.backend.get_json(&["models"], &[]).await
    }

    /// `POST /pull-model` with `{ model }`.
    ///
    /// # Errors
    ///
    /// Fails on transport error, non-2xx status, or a non-JSON body.
    pub async fn pull_model(&self, model: &str) -> Result<Value, ServiceError> {
        info!(%model, "model pull requested");
        self.backend.post_json(&["pull-model"], &PullModelRequest { model }).await
    }
}

#[cfg(test)]
#[path = "theme_test.rs"]
mod tests;
