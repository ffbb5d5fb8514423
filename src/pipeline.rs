//! Intent-to-command pipeline.
//!
//! Wires the stages together: prompt construction, model invocation,
//! sanitization, safety gate. One invocation, one suggestion.

use crate::config::Config;
use crate::context::Context;
use crate::generator::{CommandGenerator, GenerateError, generator_for};
use crate::prompt::build_prompt;
use crate::safety::is_safe;
use crate::sanitize::clean;
use tracing::{debug, warn};

/// Outcome of a generation run that reached the model.
#[derive(Debug, PartialEq, Eq)]
pub enum Suggestion {
    /// A sanitized, safe command ready for stdout.
    Command(String),
    /// The model's reply was empty or tripped the safety filter. The
    /// rejected text is deliberately not carried here.
    Blocked,
}

pub struct Pipeline {
    generator: Box<dyn CommandGenerator>,
}

impl Pipeline {
    pub fn from_config(config: &Config) -> Self {
        Self {
            generator: generator_for(config),
        }
    }

    pub fn with_generator(generator: Box<dyn CommandGenerator>) -> Self {
        Self { generator }
    }

    /// Runs the full pipeline for one intent.
    pub async fn suggest(
        &self,
        intent: &str,
        context: &Context,
    ) -> Result<Suggestion, GenerateError> {
        let prompt = build_prompt(intent, context);
        debug!(file_count = context.file_names.len(), "assembled prompt:\n{prompt}");

        let raw = self.generator.generate(&prompt).await?;
        let command = clean(&raw);

        if command.is_empty() || !is_safe(&command) {
            // The text itself stays out of the logs above debug level.
            warn!("discarding empty or unsafe suggestion");
            return Ok(Suggestion::Blocked);
        }

        Ok(Suggestion::Command(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl CommandGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl CommandGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            Err(GenerateError::HttpStatus(500))
        }
    }

    fn context() -> Context {
        Context {
            working_directory: "/tmp".to_string(),
            file_names: vec![],
        }
    }

    async fn suggest(reply: &'static str) -> Suggestion {
        Pipeline::with_generator(Box::new(FixedGenerator(reply)))
            .suggest("intent", &context())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn safe_reply_comes_back_sanitized() {
        assert_eq!(suggest("df -h\n").await, Suggestion::Command("df -h".to_string()));
    }

    #[tokio::test]
    async fn destructive_reply_is_blocked() {
        assert_eq!(suggest("rm -rf /\n").await, Suggestion::Blocked);
    }

    #[tokio::test]
    async fn backtick_wrapped_reply_is_blocked_not_unwrapped() {
        assert_eq!(suggest("`ls -la`\n").await, Suggestion::Blocked);
    }

    #[tokio::test]
    async fn empty_reply_is_blocked() {
        assert_eq!(suggest("\n").await, Suggestion::Blocked);
    }

    #[tokio::test]
    async fn backend_errors_pass_through() {
        let err = Pipeline::with_generator(Box::new(FailingGenerator))
            .suggest("intent", &context())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateError::HttpStatus(500)));
    }
}
