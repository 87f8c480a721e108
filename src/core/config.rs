//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.zakhar/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ThemeMode;
use crate::api::DEFAULT_BASE_URL;
use crate::core::retry::{DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, RetryPolicy};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ZakharConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<ThemeMode>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RetryConfig {
    pub max_retries: Option<u32>,
    pub delay_ms: Option<u64>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub theme: ThemeMode,
    pub base_url: String,
    pub retry: RetryPolicy,
}

/// Values passed on the command line (None = flag not given).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub theme: Option<ThemeMode>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.zakhar/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".zakhar").join("config.toml"))
}

/// Load config from `~/.zakhar/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ZakharConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ZakharConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ZakharConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`] for an explicit path.
pub fn load_config_from(path: &Path) -> Result<ZakharConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ZakharConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ZakharConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Zakhar Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# theme = "auto"                     # "auto", "light" or "dark" (or ZAKHAR_THEME)

# [endpoint]
# base_url = "http://localhost:8000" # POSTs go to <base_url>/chat (or ZAKHAR_BASE_URL)

# [retry]
# max_retries = 3                    # attempts after the first one
# delay_ms = 1000                    # pause before each retry
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ZakharConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env<E>(config: &ZakharConfig, cli: &CliOverrides, env: E) -> ResolvedConfig
where
    E: Fn(&str) -> Option<String>,
{
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("ZAKHAR_BASE_URL"))
        .or_else(|| config.endpoint.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Theme: CLI → env → config → auto
    let theme = cli
        .theme
        .or_else(|| {
            env("ZAKHAR_THEME").and_then(|v| match ThemeMode::parse(&v) {
                Some(mode) => Some(mode),
                None => {
                    warn!("Ignoring unknown ZAKHAR_THEME value: {}", v);
                    None
                }
            })
        })
        .or(config.general.theme)
        .unwrap_or_default();

    let retry = RetryPolicy {
        max_retries: config.retry.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        delay: config
            .retry
            .delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RETRY_DELAY),
    };

    ResolvedConfig {
        theme,
        base_url,
        retry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = ZakharConfig::default();
        assert!(config.general.theme.is_none());
        assert!(config.endpoint.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = ZakharConfig::default();
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.theme, ThemeMode::Auto);
        assert_eq!(resolved.retry, RetryPolicy::default());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ZakharConfig {
            general: GeneralConfig {
                theme: Some(ThemeMode::Light),
            },
            endpoint: EndpointConfig {
                base_url: Some("http://10.0.0.2:8000".to_string()),
            },
            retry: RetryConfig {
                max_retries: Some(5),
                delay_ms: Some(250),
            },
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.theme, ThemeMode::Light);
        assert_eq!(resolved.base_url, "http://10.0.0.2:8000");
        assert_eq!(resolved.retry.max_retries, 5);
        assert_eq!(resolved.retry.delay, Duration::from_millis(250));
    }

    #[test]
    fn test_env_overrides_config() {
        let config = ZakharConfig {
            endpoint: EndpointConfig {
                base_url: Some("http://from-config".to_string()),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "ZAKHAR_BASE_URL" => Some("http://from-env".to_string()),
            "ZAKHAR_THEME" => Some("dark".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_cli_wins_over_env() {
        let cli = CliOverrides {
            base_url: Some("http://from-cli".to_string()),
            theme: Some(ThemeMode::Light),
        };
        let env = |key: &str| match key {
            "ZAKHAR_BASE_URL" => Some("http://from-env".to_string()),
            "ZAKHAR_THEME" => Some("dark".to_string()),
            _ => None,
        };
        let resolved = resolve_with_env(&ZakharConfig::default(), &cli, env);
        assert_eq!(resolved.base_url, "http://from-cli");
        assert_eq!(resolved.theme, ThemeMode::Light);
    }

    #[test]
    fn test_unknown_env_theme_falls_through() {
        let config = ZakharConfig {
            general: GeneralConfig {
                theme: Some(ThemeMode::Light),
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "ZAKHAR_THEME").then(|| "sepia".to_string());
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.theme, ThemeMode::Light);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
theme = "dark"

[endpoint]
base_url = "http://192.168.1.100:8000"

[retry]
max_retries = 2
delay_ms = 500
"#;
        let config: ZakharConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.theme, Some(ThemeMode::Dark));
        assert_eq!(
            config.endpoint.base_url.as_deref(),
            Some("http://192.168.1.100:8000")
        );
        assert_eq!(config.retry.max_retries, Some(2));
        assert_eq!(config.retry.delay_ms, Some(500));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[retry]
max_retries = 0
"#;
        let config: ZakharConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.retry.max_retries, Some(0));
        assert!(config.retry.delay_ms.is_none());
        assert!(config.general.theme.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: ZakharConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.endpoint.base_url.is_none());
    }

    #[test]
    fn test_missing_file_is_generated() {
        let dir = std::env::temp_dir().join(format!("zakhar-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.general.theme.is_none());
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("zakhar-bad-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[retry]\nmax_retries = \"many\"\n").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
