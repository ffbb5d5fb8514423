//! Telos - natural-language intent to shell command.
//!
//! This library turns a one-line intent ("find large files", "show disk
//! usage") into a single shell command using a local model backend, then
//! filters the result before it ever reaches stdout. It backs the `telos`
//! binary that terminal keybindings call.
//!
//! # Architecture
//!
//! The pipeline is a straight line through small modules:
//!
//! - [`context`] - Working directory and file listing collection
//! - [`prompt`] - Prompt assembly from intent and context
//! - [`generator`] - Backend trait, error taxonomy, dispatch, test mock
//! - [`ondevice`] - Apple on-device model backend (macOS 26+)
//! - [`ollama`] - Ollama HTTP backend
//! - [`http_client`] - HTTP client abstraction for the remote backend
//! - [`sanitize`] - Newline normalization of raw model output
//! - [`safety`] - Denylist guard for destructive or malformed commands
//! - [`pipeline`] - Orchestration of the stages above
//! - [`config`] - Configuration load/save (backend, model, url)
//! - [`exit_codes`] - The process exit-code contract
//!
//! # Example
//!
//! ```ignore
//! use telos::config::ConfigStore;
//! use telos::context::Context;
//! use telos::pipeline::{Pipeline, Suggestion};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigStore::open_default()?.load();
//!     let pipeline = Pipeline::from_config(&config);
//!     match pipeline.suggest("show disk usage", &Context::collect()).await? {
//!         Suggestion::Command(command) => println!("{command}"),
//!         Suggestion::Blocked => eprintln!("blocked"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Output contract
//!
//! In the generate flow, stdout carries the suggested command and nothing
//! else; diagnostics go to stderr. The shell widget substitutes stdout
//! into the edit buffer on exit code 0, shows a blocked notice on 2, and
//! leaves the buffer alone otherwise.

pub mod config;
pub mod context;
pub mod exit_codes;
pub mod generator;
pub mod http_client;
pub mod ollama;
pub mod ondevice;
pub mod pipeline;
pub mod prompt;
pub mod safety;
pub mod sanitize;
