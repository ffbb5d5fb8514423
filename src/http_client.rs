//! HTTP client abstraction for backend communication.
//!
//! This module provides a trait-based abstraction over HTTP clients,
//! enabling dependency injection and easy mocking in tests. The response
//! carries the status code alongside the body because the Ollama contract
//! distinguishes non-200 replies from malformed 200 replies.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Status and raw body of an HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Trait for HTTP communication with a model backend.
///
/// # Example
///
/// ```ignore
/// use telos::http_client::{HttpClient, ReqwestHttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let response = client
///     .post_json(
///         "http://localhost:11434/api/generate",
///         &serde_json::json!({"model": "llama3.2", "prompt": "...", "stream": false}),
///     )
///     .await?;
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be sent or the response
    /// body cannot be read. A non-200 status is NOT an error at this
    /// layer; callers inspect [`HttpResponse::status`].
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse>;

    /// Sends a GET request.
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Production implementation backed by reqwest.
///
/// Uses the client's default timeout behavior; the pipeline makes a single
/// attempt per invocation and never retries.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse> {
        let response = self.client.post(url).json(body).send().await?;
        Ok(HttpResponse {
            status: response.status().as_u16(),
            body: response.text().await?,
        })
    }

    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        Ok(HttpResponse {
            status: response.status().as_u16(),
            body: response.text().await?,
        })
    }
}
