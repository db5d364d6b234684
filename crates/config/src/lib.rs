//! Configuration loading, validation, and management for Murmur.
//!
//! Loads configuration from `~/.murmur/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Terminators used when no configuration overrides them.
pub const DEFAULT_SENTENCE_ENDINGS: [&str; 4] = [".", "!", "?", "\n"];

/// The root configuration structure.
///
/// Maps directly to `~/.murmur/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Token collator settings
    #[serde(default)]
    pub collator: CollatorConfig,

    /// Transcript formatter settings
    #[serde(default)]
    pub formatter: FormatterConfig,
}

/// Settings recognized by the token collator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollatorConfig {
    /// Strings that end a sentence when they appear in an incoming token
    #[serde(default = "default_sentence_endings")]
    pub sentence_endings: Vec<String>,

    /// Surface the aggregated function call at end of stream
    #[serde(default)]
    pub emit_function: bool,
}

fn default_sentence_endings() -> Vec<String> {
    DEFAULT_SENTENCE_ENDINGS.iter().map(|s| s.to_string()).collect()
}

impl Default for CollatorConfig {
    fn default() -> Self {
        Self {
            sentence_endings: default_sentence_endings(),
            emit_function: false,
        }
    }
}

impl CollatorConfig {
    /// Replace the sentence terminators.
    pub fn with_sentence_endings<I, S>(mut self, endings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sentence_endings = endings.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_emit_function(mut self, emit_function: bool) -> Self {
        self.emit_function = emit_function;
        self
    }

    /// Validate collator settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sentence_endings.iter().any(|e| e.is_empty()) {
            return Err(ConfigError::ValidationError(
                "collator.sentence_endings must not contain empty strings".into(),
            ));
        }
        Ok(())
    }
}

/// Settings recognized by the transcript formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// System prompt prepended to every formatted conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
}

impl FormatterConfig {
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = Some(preamble.into());
        self
    }
}

impl AppConfig {
    /// Load configuration from the default path (`~/.murmur/config.toml`).
    ///
    /// Also checks environment variables:
    /// - `MURMUR_PREAMBLE`
    /// - `MURMUR_EMIT_FUNCTION` (`true`/`false`/`1`/`0`)
    /// - `MURMUR_SENTENCE_ENDINGS` (comma-separated, `\n` for newline)
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
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

    /// Apply overrides from a variable lookup (the process environment in
    /// [`AppConfig::load`]).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(preamble) = lookup("MURMUR_PREAMBLE") {
            self.formatter.preamble = Some(preamble);
        }

        if let Some(flag) = lookup("MURMUR_EMIT_FUNCTION") {
            self.collator.emit_function = parse_bool(&flag).ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "MURMUR_EMIT_FUNCTION must be true or false, got '{flag}'"
                ))
            })?;
        }

        if let Some(endings) = lookup("MURMUR_SENTENCE_ENDINGS") {
            self.collator.sentence_endings = endings
                .split(',')
                .map(|e| e.replace("\\n", "\n"))
                .collect();
        }

        self.validate()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".murmur")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.collator.validate()
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        Self::default().to_toml().unwrap_or_default()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
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
    use std::collections::HashMap;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.collator.sentence_endings, vec![".", "!", "?", "\n"]);
        assert!(!config.collator.emit_function);
        assert!(config.formatter.preamble.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig {
            formatter: FormatterConfig::default().with_preamble("You are helpful."),
            ..AppConfig::default()
        };
        let toml_str = config.to_toml().unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_sentence_ending_rejected() {
        let config = AppConfig {
            collator: CollatorConfig::default().with_sentence_endings([".", ""]),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), AppConfig::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[collator]
sentence_endings = [".", ";"]
emit_function = true

[formatter]
preamble = "Be brief."
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.collator.sentence_endings, vec![".", ";"]);
        assert!(config.collator.emit_function);
        assert_eq!(config.formatter.preamble.as_deref(), Some("Be brief."));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[collator]\nemit_function = true\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(config.collator.emit_function);
        assert_eq!(config.collator.sentence_endings.len(), 4);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[collator\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn env_overrides_apply() {
        let vars: HashMap<&str, &str> = [
            ("MURMUR_PREAMBLE", "You are a receptionist."),
            ("MURMUR_EMIT_FUNCTION", "yes"),
            ("MURMUR_SENTENCE_ENDINGS", ".,\\n"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(
            config.formatter.preamble.as_deref(),
            Some("You are a receptionist.")
        );
        assert!(config.collator.emit_function);
        assert_eq!(config.collator.sentence_endings, vec![".", "\n"]);
    }

    #[test]
    fn invalid_emit_function_override_rejected() {
        let mut config = AppConfig::default();
        let result = config.apply_env_overrides(|key| {
            (key == "MURMUR_EMIT_FUNCTION").then(|| "maybe".to_string())
        });
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("[collator]"));
        assert!(toml_str.contains("emit_function = false"));
    }
}
