//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reasoning-engine provider configuration
    pub llm: LlmConfig,

    /// Orchestrator tuning
    pub agent: AgentConfig,

    /// Destination photo lookup
    pub photos: PhotosConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    /// The photo credential is deliberately not checked here: the resolver
    /// degrades to the fallback URL without one.
    pub fn validate(&self) -> Result<()> {
        if self.agent.max_turns == 0 {
            return Err(eyre::eyre!("agent.max-turns must be at least 1"));
        }
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "Reasoning-engine API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .tripwright.yml
        let local_config = PathBuf::from(".tripwright.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/tripwright/tripwright.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tripwright").join("tripwright.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Reasoning-engine provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "anthropic" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Wall-clock timeout per API call in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .context(format!("API key environment variable {} not set", self.api_key_env))
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 4096,
            timeout_ms: 60_000,
        }
    }
}

/// Orchestrator tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Reasoning turns allowed per chat request
    #[serde(rename = "max-turns")]
    pub max_turns: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { max_turns: 6 }
    }
}

/// Destination photo lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotosConfig {
    /// Environment variable containing the Unsplash access key
    ///
    /// When the variable is unset the resolver serves the fallback URL
    /// without attempting any lookup.
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Photo API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// URL served when no credential is configured or a lookup fails
    #[serde(rename = "fallback-url")]
    pub fallback_url: String,

    /// Bounded cache capacity (oldest entry evicted beyond this)
    #[serde(rename = "cache-capacity")]
    pub cache_capacity: usize,

    /// Wall-clock timeout per lookup in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl PhotosConfig {
    /// Read the access key, if one is configured
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|key| !key.is_empty())
    }
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            api_key_env: "UNSPLASH_ACCESS_KEY".to_string(),
            base_url: "https://api.unsplash.com".to_string(),
            fallback_url: "https://images.unsplash.com/photo-1488646953014-85cb44e25828".to_string(),
            cache_capacity: 128,
            timeout_ms: 10_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.agent.max_turns, 6);
        assert_eq!(config.photos.cache_capacity, 128);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  provider: anthropic
  model: claude-opus-4
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  max-tokens: 8192
  timeout-ms: 30000

agent:
  max-turns: 4

photos:
  api-key-env: MY_PHOTO_KEY
  fallback-url: https://images.example.com/default.jpg
  cache-capacity: 16
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "claude-opus-4");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.agent.max_turns, 4);
        assert_eq!(config.photos.api_key_env, "MY_PHOTO_KEY");
        assert_eq!(config.photos.cache_capacity, 16);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: claude-haiku
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.llm.model, "claude-haiku");

        // Defaults for unspecified
        assert_eq!(config.llm.provider, "anthropic");
        assert_eq!(config.agent.max_turns, 6);
        assert_eq!(config.photos.base_url, "https://api.unsplash.com");
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tripwright.yml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "agent:\n  max-turns: 2").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.agent.max_turns, 2);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/tripwright.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_turn_bound() {
        let config = Config {
            agent: AgentConfig { max_turns: 0 },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
