//! Ollama HTTP backend.
//!
//! One POST to `/api/generate` per invocation, `stream: false`, no retry.
//! The server must answer 200 with a JSON object carrying a `response`
//! string; anything else maps to a distinct [`GenerateError`] variant.

use crate::config::Config;
use crate::generator::{CommandGenerator, GenerateError};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// One installed model as reported by `GET /api/tags`.
#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelEntry>,
}

pub struct OllamaGenerator {
    http: Box<dyn HttpClient>,
    model: String,
    base_url: String,
}

impl OllamaGenerator {
    pub fn from_config(config: &Config) -> Self {
        Self::with_client(Box::new(ReqwestHttpClient::new()), &config.model, &config.url)
    }

    pub fn with_client(http: Box<dyn HttpClient>, model: &str, base_url: &str) -> Self {
        Self {
            http,
            model: model.to_string(),
            base_url: base_url.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<String, GenerateError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        reqwest::Url::parse(&url)
            .map_err(|e| GenerateError::Transport(format!("invalid backend URL '{url}': {e}")))?;
        Ok(url)
    }

    /// Lists the models installed on the server, for `telos models`.
    pub async fn list_models(&self) -> Result<Vec<ModelEntry>, GenerateError> {
        let url = self.endpoint("/api/tags")?;
        let response = self
            .http
            .get(&url)
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        if response.status != 200 {
            return Err(GenerateError::HttpStatus(response.status));
        }
        let tags: TagsResponse = serde_json::from_str(&response.body)
            .map_err(|e| GenerateError::Malformed(e.to_string()))?;
        Ok(tags.models)
    }
}

#[async_trait]
impl CommandGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = self.endpoint("/api/generate")?;
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        debug!(%url, model = %self.model, "requesting completion from ollama");

        let response = self
            .http
            .post_json(&url, &body)
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;

        if response.status != 200 {
            return Err(GenerateError::HttpStatus(response.status));
        }

        let parsed: GenerateResponse = serde_json::from_str(&response.body)
            .map_err(|e| GenerateError::Malformed(e.to_string()))?;
        Ok(parsed.response)
    }
}

/// Human-readable model size for the `models` listing.
pub fn format_size(bytes: u64) -> String {
    const GB: u64 = 1024 * 1024 * 1024;
    const MB: u64 = 1024 * 1024;

    if bytes >= GB {
        format!("{:.1}GB", bytes as f64 / GB as f64)
    } else {
        format!("{:.0}MB", bytes as f64 / MB as f64)
    }
}
