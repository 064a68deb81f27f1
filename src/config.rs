use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::format::date::{DateFormatter, MillisPadding};

/// Main configuration structure for marbles-view
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MarblesViewConfig {
    /// Date rendering settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Random identifier settings
    #[serde(default)]
    pub tokens: TokenConfig,
    /// Logging settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Pattern used for operation-log dates
    pub history_date_pattern: String,
    /// Pattern used when the CLI is not given one
    pub timestamp_pattern: String,
    /// Width of the `r` code: "legacy" (2) or "full" (3)
    pub millis_padding: MillisPadding,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Length of generated identifiers
    pub default_length: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON log lines instead of plain text
    pub json_logs: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            history_date_pattern: "Y-M-d".to_string(),
            timestamp_pattern: "Y-M-d H:m:s".to_string(),
            millis_padding: MillisPadding::Legacy,
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self { default_length: 10 }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
        }
    }
}

impl DisplayConfig {
    pub fn formatter(&self) -> DateFormatter {
        DateFormatter::new(self.millis_padding)
    }
}

impl MarblesViewConfig {
    /// Load configuration from the working directory with precedence:
    /// 1. Default values
    /// 2. Configuration files (marbles-view.toml, .marbles-view-rc)
    /// 3. Environment variables (MARBLES_VIEW_<SECTION>__<KEY>)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Same as [`MarblesViewConfig::load`] with files looked up in `dir`
    pub fn load_from(dir: &Path) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        let toml_path = dir.join("marbles-view.toml");
        if toml_path.exists() {
            builder = builder.add_source(File::from(toml_path));
        }

        let rc_path = dir.join(".marbles-view-rc");
        if rc_path.exists() {
            builder = builder.add_source(File::from(rc_path).format(config::FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("MARBLES_VIEW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env from the working directory if it exists
    pub fn load_env_file() -> Result<bool> {
        Self::load_env_file_from(Path::new("."))
    }

    /// Load `dir/.env` if it exists, reporting whether it did.
    /// Runs before logging is set up, so it logs nothing itself.
    pub fn load_env_file_from(dir: &Path) -> Result<bool> {
        let env_path = dir.join(".env");
        if !env_path.exists() {
            return Ok(false);
        }
        dotenvy::from_path(&env_path)?;
        Ok(true)
    }
}

/// Global configuration instance, with whether a .env file was applied
static CONFIG: std::sync::LazyLock<Result<(MarblesViewConfig, bool), anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        // Load .env file first
        let env_loaded = MarblesViewConfig::load_env_file().unwrap_or(false);
        MarblesViewConfig::load().map(|config| (config, env_loaded))
    });

/// Get the global configuration
pub fn config() -> Result<&'static MarblesViewConfig> {
    CONFIG
        .as_ref()
        .map(|(config, _)| config)
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration and report how it was loaded.
/// Call after telemetry is up so the report is not lost.
pub fn init_config() -> Result<()> {
    let _config = config()?;
    let env_loaded = matches!(CONFIG.as_ref(), Ok((_, true)));
    if env_loaded {
        tracing::info!("Loaded environment variables from .env file");
    }
    tracing::debug!("Configuration loaded successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MarblesViewConfig::default();
        assert_eq!(config.display.history_date_pattern, "Y-M-d");
        assert_eq!(config.display.millis_padding, MillisPadding::Legacy);
        assert_eq!(config.tokens.default_length, 10);
        assert_eq!(config.display.formatter().millis_padding(), MillisPadding::Legacy);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: MarblesViewConfig = toml::from_str(
            r#"
            [display]
            history_date_pattern = "d/M/Y"
            timestamp_pattern = "H:m"
            millis_padding = "full"
            "#,
        )
        .unwrap();

        assert_eq!(config.display.millis_padding, MillisPadding::Full);
        assert_eq!(config.tokens, TokenConfig::default());
        assert_eq!(config.observability, ObservabilityConfig::default());
    }
}
