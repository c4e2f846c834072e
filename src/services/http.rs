//! Shared JSON-over-HTTP plumbing for the backend-proxy clients.
//!
//! ERROR HANDLING
//! ==============
//! Every call is a single best-effort request: no retry, no backoff, no cache.
//! A non-2xx response becomes [`ServiceError::Status`] carrying the backend's
//! `error` field when the body has one, else a generic status message.

use reqwest::{Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Timeouts;

/// Errors produced by backend-proxy client operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The base URL cannot have path segments appended.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend returned a non-success HTTP status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body was not the JSON shape expected.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The lookup succeeded but returned nothing usable.
    #[error("{0}")]
    NotFound(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Message for a non-2xx response: the backend's `error` text, else the status.
#[must_use]
pub fn status_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|message| !message.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

/// A JSON client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeouts: Timeouts) -> Result<Self, ServiceError> {
        let base_url = Url::parse(base_url).map_err(|e| ServiceError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .build()
            .map_err(|e| ServiceError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    /// Base URL with `segments` appended, each percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot take path segments.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or unexpected body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ServiceError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        read_json(response).await
    }

    /// `POST` a JSON body and read a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status, or unexpected body.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &impl Serialize,
    ) -> Result<T, ServiceError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ServiceError::Request(e.to_string()))?;
    if !status.is_success() {
        return Err(ServiceError::Status { status: status.as_u16(), message: status_message(status.as_u16(), &text) });
    }
    serde_json::from_str(&text).map_err(|e| ServiceError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
