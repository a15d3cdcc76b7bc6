//! Configuration for the AI advice request
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/paisa/config/paisa.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! `GROQ_MODEL` and `GROQ_HOST` override the file values. The API key is
//! only ever read from the environment (see [`crate::ai::AIClient::from_env`]).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/paisa.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub ai: AiConfig,
    #[serde(default)]
    pub advice: AdviceConfig,
}

/// Chat completion endpoint settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AiConfig {
    /// Server root; `/v1/chat/completions` is appended
    pub host: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            host: "https://api.groq.com/openai".to_string(),
            model: "llama3-8b-8192".to_string(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Advice conversation settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AdviceConfig {
    /// Prior exchanges kept as context
    #[serde(default = "default_memory_window")]
    pub memory_window: usize,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            memory_window: default_memory_window(),
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_memory_window() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self::embedded().unwrap_or_else(|_| Self {
            ai: AiConfig::default(),
            advice: AdviceConfig::default(),
        })
    }
}

impl Config {
    /// Parse the embedded default config
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config (explicit path, then data dir override, then embedded default)
    ///
    /// An explicit path that does not exist is an error; a missing data dir
    /// override is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::NotFound(format!("config file {}", p.display())));
                }
                Self::from_file(p)?
            }
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::embedded()?,
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::InvalidData(format!("Failed to read config: {}", e)))?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Self::from_toml(&content)
    }

    /// Apply `GROQ_MODEL` / `GROQ_HOST` overrides from a variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup("GROQ_MODEL").filter(|v| !v.trim().is_empty()) {
            self.ai.model = model;
        }
        if let Some(host) = lookup("GROQ_HOST").filter(|v| !v.trim().is_empty()) {
            self.ai.host = host;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.ai.host.trim().is_empty() {
            return Err(Error::InvalidData("ai.host must not be empty".into()));
        }
        if self.ai.model.trim().is_empty() {
            return Err(Error::InvalidData("ai.model must not be empty".into()));
        }
        if self.advice.memory_window == 0 {
            return Err(Error::InvalidData(
                "advice.memory_window must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("paisa").join("config").join("paisa.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config() {
        let config = Config::embedded().unwrap();
        assert_eq!(config.ai.host, "https://api.groq.com/openai");
        assert_eq!(config.ai.model, "llama3-8b-8192");
        assert_eq!(config.ai.timeout(), Duration::from_secs(60));
        assert_eq!(config.advice.memory_window, 3);
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let config = Config::from_toml(
            r#"
            [ai]
            host = "http://localhost:8080"
            model = "llama3.2"
            "#,
        )
        .unwrap();
        assert_eq!(config.ai.timeout_secs, 60);
        assert!((config.ai.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.advice.memory_window, 3);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml("[ai\nhost ="),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_validation() {
        let err = Config::from_toml(
            r#"
            [ai]
            host = "http://localhost"
            model = ""
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ai.model"));

        let err = Config::from_toml(
            r#"
            [ai]
            host = "http://localhost"
            model = "m"
            [advice]
            memory_window = 0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("memory_window"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::embedded().unwrap();
        config.apply_env_overrides(|key| match key {
            "GROQ_MODEL" => Some("llama-3.1-8b-instant".to_string()),
            "GROQ_HOST" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.ai.model, "llama-3.1-8b-instant");
        // Blank values are ignored
        assert_eq!(config.ai.host, "https://api.groq.com/openai");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paisa.toml");
        std::fs::write(
            &path,
            "[ai]\nhost = \"http://127.0.0.1:9\"\nmodel = \"tiny\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.ai.timeout_secs, 5);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
