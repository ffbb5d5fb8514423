//! Backend-agnostic command generation.
//!
//! The [`CommandGenerator`] trait is the seam between the pipeline and the
//! model backends. Production code selects an implementation from the
//! loaded [`Config`]; tests (and `TELOS_USE_MOCK=1`) get the deterministic
//! [`MockGenerator`] instead.

use crate::config::{Backend, Config};
use crate::ollama::OllamaGenerator;
use crate::ondevice::OnDeviceGenerator;
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// Why a generation attempt produced no command.
///
/// Every variant is terminal for the invocation; the driver prints one
/// diagnostic line and exits with the backend error code.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The configured backend cannot run on this machine.
    #[error("on-device model unavailable: {0}")]
    Unavailable(String),
    /// The request never produced a usable response.
    #[error("could not reach the model backend: {0}")]
    Transport(String),
    /// The backend answered with a non-success HTTP status.
    #[error("model backend returned HTTP {0}")]
    HttpStatus(u16),
    /// The backend answered, but the payload was not understood.
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

/// Turns an assembled prompt into a raw command string.
#[async_trait]
pub trait CommandGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Selects the generator implementation for this invocation.
pub fn generator_for(config: &Config) -> Box<dyn CommandGenerator> {
    if config.use_mock {
        info!("using mock generator (TELOS_USE_MOCK / use_mock)");
        return Box::new(MockGenerator);
    }
    match config.backend {
        Backend::OnDevice => Box::new(OnDeviceGenerator::new()),
        Backend::Ollama => Box::new(OllamaGenerator::from_config(config)),
    }
}

/// Deterministic generator used by the test suite.
///
/// Replies are keyed on prompt content, raw and newline-terminated like a
/// real model's, so the sanitizer and safety filter see realistic input.
pub struct MockGenerator;

#[async_trait]
impl CommandGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let response = if prompt.contains("delete everything") {
            "rm -rf /\n"
        } else if prompt.contains("disk usage") {
            "df -h\n"
        } else if prompt.contains("list files") {
            // A model ignoring the no-backticks rule.
            "`ls -la`\n"
        } else {
            "pwd\n"
        };
        Ok(response.to_string())
    }
}
