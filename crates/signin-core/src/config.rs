//! Configuration management for the sign-in tools.
//!
//! Loads configuration from `${SIGNIN_HOME}/config.toml` with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::DemoOutcome;

/// Environment variable that overrides `[submitter].endpoint`.
pub const ENDPOINT_ENV_VAR: &str = "SIGNIN_ENDPOINT";

/// Returns the default config template with comments.
///
/// This is embedded from `default_config.toml` at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for configuration and log files.
    //!
    //! `SIGNIN_HOME` resolution order:
    //! 1. `SIGNIN_HOME` environment variable (if set)
    //! 2. ~/.config/signin (default)

    use std::path::PathBuf;

    /// Returns the sign-in home directory.
    pub fn signin_home() -> PathBuf {
        if let Ok(home) = std::env::var("SIGNIN_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".signin"),
            |h| h.join(".config").join("signin"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        signin_home().join("config.toml")
    }
}

/// Which [`crate::auth::AuthSubmitter`] handles submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmitterBackend {
    /// Offline backend with simulated latency (default)
    #[default]
    Demo,
    /// POST credentials as JSON to `endpoint`
    Http,
}

/// Submission backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitterConfig {
    pub backend: SubmitterBackend,
    /// Login endpoint for the http backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Request timeout in seconds (0 disables)
    pub timeout_secs: u32,
}

impl SubmitterConfig {
    const DEFAULT_TIMEOUT_SECS: u32 = 30;

    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.timeout_secs)))
        }
    }

    /// Resolves the endpoint with precedence: env > config.
    ///
    /// # Errors
    /// Returns an error if the resolved endpoint is not a valid URL.
    pub fn effective_endpoint(&self) -> Result<Option<String>> {
        let from_env = std::env::var(ENDPOINT_ENV_VAR).ok();
        let candidate = [from_env.as_deref(), self.endpoint.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty());

        match candidate {
            Some(endpoint) => {
                url::Url::parse(endpoint)
                    .with_context(|| format!("Invalid login endpoint: {endpoint}"))?;
                Ok(Some(endpoint.to_string()))
            }
            None => Ok(None),
        }
    }
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            backend: SubmitterBackend::default(),
            endpoint: None,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Demo backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated latency in milliseconds
    pub latency_ms: u64,
    /// Outcome returned for every submission
    pub outcome: DemoOutcome,
}

impl DemoConfig {
    const DEFAULT_LATENCY_MS: u64 = 700;

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            latency_ms: Self::DEFAULT_LATENCY_MS,
            outcome: DemoOutcome::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive (overridden by `SIGNIN_LOG`)
    pub level: String,
    /// Write logs to this file instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub submitter: SubmitterConfig,
    pub demo: DemoConfig,
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Renders `Config::default()` as TOML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn generate() -> Result<String> {
        toml::to_string_pretty(&Config::default())
            .context("Failed to serialize default config to TOML")
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.submitter.backend, SubmitterBackend::Demo);
        assert_eq!(config.demo.latency_ms, 700);
        assert_eq!(config.demo.outcome, DemoOutcome::InvalidCredentials);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "[submitter]\nbackend = \"http\"\nendpoint = \"http://localhost:8080/login\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.submitter.backend, SubmitterBackend::Http);
        assert_eq!(
            config.submitter.endpoint.as_deref(),
            Some("http://localhost:8080/login")
        );
        assert_eq!(config.submitter.timeout_secs, 30);
        assert_eq!(config.demo.latency_ms, 700);
    }

    #[test]
    fn test_load_demo_outcome() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[demo]\nlatency_ms = 0\noutcome = \"service_error\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.demo.latency(), Duration::ZERO);
        assert_eq!(config.demo.outcome, DemoOutcome::ServiceError);
    }

    #[test]
    fn test_load_invalid_toml_fails_with_path() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[submitter\n").unwrap();

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("backend = \"demo\""));
        assert!(contents.contains("# endpoint ="));

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.demo.latency_ms, 700);
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_round_trips_defaults() {
        let toml = Config::generate().unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.submitter.timeout_secs, 30);
        assert_eq!(parsed.demo.outcome, DemoOutcome::InvalidCredentials);
    }

    #[test]
    fn test_timeout_zero_disables() {
        let config = SubmitterConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        if std::env::var(ENDPOINT_ENV_VAR).is_ok() {
            return;
        }
        let config = SubmitterConfig {
            endpoint: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(config.effective_endpoint().is_err());

        let blank = SubmitterConfig {
            endpoint: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.effective_endpoint().unwrap(), None);
    }
}
