//! On-device backend via the Apple Foundation Models framework.
//!
//! There is no stable Rust binding for the framework, so the model is
//! reached the same way generated scripts reach their runtime elsewhere in
//! this codebase's lineage: stage a small bridge program and hand it to the
//! platform toolchain. The bridge is a Swift script run with `swift`, with
//! the prompt as its only argument and the completion on stdout.
//!
//! Availability is gated up front: macOS, OS major version 26 or newer,
//! and a `swift` binary on PATH. Anything missing is reported as
//! [`GenerateError::Unavailable`] without spawning anything.

use crate::generator::{CommandGenerator, GenerateError};
use async_trait::async_trait;
use std::env;
use std::fs;
use std::process::Command;
use tracing::debug;

/// First macOS release that ships the system language model.
const MIN_MACOS_MAJOR: u32 = 26;

/// Fixed generation parameters for command suggestions: near-greedy
/// decoding, and a cap well above any one-line shell command.
const TEMPERATURE: f64 = 0.1;
const MAX_RESPONSE_TOKENS: u32 = 80;

/// Exit code the bridge uses for "framework present but model not usable"
/// (Apple Intelligence disabled, model not downloaded, unsupported device).
const BRIDGE_UNAVAILABLE: i32 = 2;

const BRIDGE_TEMPLATE: &str = r#"import Foundation
import FoundationModels

let arguments = CommandLine.arguments
guard arguments.count > 1 else {
    FileHandle.standardError.write(Data("usage: bridge <prompt>\n".utf8))
    exit(64)
}

guard #available(macOS 26.0, *) else {
    exit(2)
}

let model = SystemLanguageModel.default
guard model.isAvailable else {
    exit(2)
}

let session = LanguageModelSession()
let options = GenerationOptions(
    temperature: {temperature},
    maximumResponseTokens: {max_tokens}
)
let response = try await session.respond(to: arguments[1], options: options)
print(response.content)
"#;

fn bridge_source() -> String {
    BRIDGE_TEMPLATE
        .replace("{temperature}", &TEMPERATURE.to_string())
        .replace("{max_tokens}", &MAX_RESPONSE_TOKENS.to_string())
}

pub struct OnDeviceGenerator;

impl OnDeviceGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Checks whether the on-device model can be reached at all.
    pub fn availability() -> Result<(), GenerateError> {
        if !cfg!(target_os = "macos") {
            return Err(GenerateError::Unavailable(
                "the on-device model requires macOS".to_string(),
            ));
        }
        match macos_major_version() {
            Some(version) if version >= MIN_MACOS_MAJOR => {}
            Some(version) => {
                return Err(GenerateError::Unavailable(format!(
                    "macOS {version} does not ship the on-device model ({MIN_MACOS_MAJOR} or newer required)"
                )));
            }
            None => {
                return Err(GenerateError::Unavailable(
                    "could not determine the macOS version".to_string(),
                ));
            }
        }
        if which::which("swift").is_err() {
            return Err(GenerateError::Unavailable(
                "the swift toolchain is required to reach the on-device model".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for OnDeviceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandGenerator for OnDeviceGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        Self::availability()?;

        let bridge_path =
            env::temp_dir().join(format!("telos-bridge-{}.swift", std::process::id()));
        fs::write(&bridge_path, bridge_source()).map_err(|e| {
            GenerateError::Transport(format!("failed to stage bridge script: {e}"))
        })?;

        debug!(path = %bridge_path.display(), "running on-device bridge");

        let output = tokio::process::Command::new("swift")
            .arg(&bridge_path)
            .arg(prompt)
            .output()
            .await
            .map_err(|e| GenerateError::Transport(format!("failed to run swift: {e}")));
        let _ = fs::remove_file(&bridge_path);
        let output = output?;

        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout).to_string()),
            Some(BRIDGE_UNAVAILABLE) => Err(GenerateError::Unavailable(
                "the on-device model is not enabled on this machine".to_string(),
            )),
            code => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                let reason = stderr.lines().next().unwrap_or("no output").to_string();
                Err(GenerateError::Transport(format!(
                    "bridge exited with status {code:?}: {reason}"
                )))
            }
        }
    }
}

/// Major version from `sw_vers -productVersion`, quietly None elsewhere.
fn macos_major_version() -> Option<u32> {
    let output = Command::new("sw_vers")
        .arg("-productVersion")
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    String::from_utf8(output.stdout)
        .ok()?
        .trim()
        .split('.')
        .next()?
        .parse()
        .ok()
}
