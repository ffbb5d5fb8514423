use anyhow::{Result, anyhow, bail};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Model backend used to turn a prompt into a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// The platform's built-in model (macOS 26+ only).
    #[default]
    OnDevice,
    /// A locally hosted Ollama server.
    Ollama,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::OnDevice => write!(f, "on-device"),
            Backend::Ollama => write!(f, "ollama"),
        }
    }
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "on-device" | "ondevice" => Ok(Backend::OnDevice),
            "ollama" => Ok(Backend::Ollama),
            other => bail!("unknown backend '{other}' (expected on-device or ollama)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: Backend,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_url")]
    pub url: String,
    /// Test hook: route generation to the deterministic mock backend.
    #[serde(default)]
    pub use_mock: bool,
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_url() -> String {
    "http://localhost:11434".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            model: default_model(),
            url: default_url(),
            use_mock: false,
        }
    }
}

impl Config {
    /// Applies a `config set` key/value pair. Keys are a fixed set.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "backend" => self.backend = value.parse()?,
            "model" => self.model = value.to_string(),
            "url" => self.url = value.to_string(),
            other => bail!("unknown config key '{other}' (expected backend, model or url)"),
        }
        Ok(())
    }
}

/// Loads and saves the configuration file at an explicit path.
///
/// The path is injected rather than hardcoded so tests can point the store
/// at a temporary directory; `open_default` resolves the per-user location.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the per-user location: `$TELOS_CONFIG_DIR/config.toml` when
    /// the override is set, `~/.telos/config.toml` otherwise.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Self::default_dir()?.join("config.toml")))
    }

    pub fn default_dir() -> Result<PathBuf> {
        if let Ok(dir) = env::var("TELOS_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }
        let home = home_dir().ok_or_else(|| anyhow!("could not find home directory"))?;
        Ok(home.join(".telos"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config file. A missing or malformed file yields the
    /// defaults; this never fails. `TELOS_USE_MOCK=1` forces the mock
    /// backend regardless of the file contents.
    pub fn load(&self) -> Config {
        let mut config = match fs::read_to_string(&self.path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("ignoring malformed config {}: {e}", self.path.display());
                    Config::default()
                }
            },
            Err(_) => {
                info!("no config file at {}, using defaults", self.path.display());
                Config::default()
            }
        };

        if env::var("TELOS_USE_MOCK").is_ok() {
            config.use_mock = true;
        }

        config
    }

    /// Writes the config file, creating parent directories as needed.
    /// Plain overwrite, not an atomic rename.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        info!("saved config to {}", self.path.display());
        Ok(())
    }
}
