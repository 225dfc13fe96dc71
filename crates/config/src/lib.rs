//! Configuration loading and validation for BriefClaw.
//!
//! Loads configuration from a TOML file with environment variable overrides.
//! The credential decides live-vs-mock mode for the generation client:
//! when `ANTHROPIC_API_KEY` (or `BRIEFCLAW_API_KEY`) is absent the client is
//! unavailable and the agent serves mock responses.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Anthropic API key. Absent = mock mode, not an error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used for generation
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens per generation
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Role label the agent reports about itself
    #[serde(default = "default_agent_role")]
    pub agent_role: String,

    /// Gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Audit log configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

fn default_model() -> String {
    "claude-3-sonnet-20241022".into()
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_temperature() -> f32 {
    0.7
}
fn default_agent_role() -> String {
    "Campaign Manager".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("agent_role", &self.agent_role)
            .field("gateway", &self.gateway)
            .field("audit", &self.audit)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "0.0.0.0".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether to append a markdown audit block per successful generation
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Directory the monthly `agent_logs_YYYYMM.md` files are written to
    #[serde(default = "default_audit_dir")]
    pub dir: PathBuf,
}

fn default_true() -> bool {
    true
}
fn default_audit_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: default_audit_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (`./briefclaw.toml`) with
    /// environment variable overrides:
    /// - `BRIEFCLAW_API_KEY` / `ANTHROPIC_API_KEY` — credential
    /// - `BRIEFCLAW_MODEL` — model override
    /// - `PORT` — listen port
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(Path::new("briefclaw.toml"))?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("BRIEFCLAW_API_KEY")
                .ok()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("BRIEFCLAW_MODEL") {
            config.model = model;
        }

        if let Ok(port) = std::env::var("PORT") {
            config.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("PORT must be a number, got '{port}'"))
            })?;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Check if a credential is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            agent_role: default_agent_role(),
            gateway: GatewayConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.model, "claude-3-sonnet-20241022");
        assert_eq!(config.max_tokens, 2000);
        assert_eq!(config.gateway.port, 8000);
        assert!(config.audit.enabled);
        assert!(!config.has_api_key());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.gateway.port, config.gateway.port);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/briefclaw.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().max_tokens, 2000);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"claude-test\"\n[gateway]\nport = 9000").unwrap();
        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.model, "claude-test");
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.max_tokens, 2000);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("sk-ant-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
