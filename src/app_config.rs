//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Default service base URL when neither flag nor config file sets one.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// TOML-backed file configuration for gostcheck defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Service base URL (overridden by `--base-url`).
    pub base_url: Option<String>,
    /// Output locale tag (overridden by `--locale`).
    pub locale: Option<String>,
    /// Optional HTTP connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Optional HTTP read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Default status poll interval for `check` in milliseconds.
    pub poll_interval_ms: Option<u64>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(locale) = &self.locale
            && !matches!(locale.as_str(), "en" | "ru" | "zh")
        {
            bail!("Invalid config value for `locale`: {locale}. Expected one of: en, ru, zh");
        }

        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;

        if let Some(poll_interval_ms) = self.poll_interval_ms
            && !(100..=60_000).contains(&poll_interval_ms)
        {
            bail!(
                "Invalid config value for `poll_interval_ms`: {poll_interval_ms}. Expected range: 100..=60000"
            );
        }

        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/gostcheck/config.toml`
/// 2. `$HOME/.config/gostcheck/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("gostcheck")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("gostcheck")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from the default path if present.
pub fn load_default_file_config() -> Result<LoadedConfig> {
    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig { path, config: None });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig { path, config: None });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "base_url" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `base_url` value on line {}", line_index + 1)
                })?;
                cfg.base_url = Some(parsed);
            }
            "locale" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `locale` value on line {}", line_index + 1)
                })?;
                cfg.locale = Some(parsed);
            }
            "connect_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `connect_timeout_secs` value on line {}", line_index + 1)
                })?;
                cfg.connect_timeout_secs = Some(parsed);
            }
            "read_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `read_timeout_secs` value on line {}", line_index + 1)
                })?;
                cfg.read_timeout_secs = Some(parsed);
            }
            "poll_interval_ms" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `poll_interval_ms` value on line {}", line_index + 1)
                })?;
                cfg.poll_interval_ms = Some(parsed);
            }
            other => bail!("Unknown config key `{other}` on line {}", line_index + 1),
        }
    }
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(value: &str) -> Result<String> {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        bail!("expected a double-quoted string, got: {value}");
    };
    Ok(inner.to_string())
}

fn parse_integer_u64(value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .with_context(|| format!("expected an integer, got: {value}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config_is_default() {
        let cfg = parse_config_str("").unwrap();
        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let cfg = parse_config_str(
            r#"
            base_url = "http://checker.internal:8000/api"  # staging
            locale = "ru"
            connect_timeout_secs = 5
            read_timeout_secs = 60
            poll_interval_ms = 1500
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.base_url.as_deref(),
            Some("http://checker.internal:8000/api")
        );
        assert_eq!(cfg.locale.as_deref(), Some("ru"));
        assert_eq!(cfg.connect_timeout_secs, Some(5));
        assert_eq!(cfg.read_timeout_secs, Some(60));
        assert_eq!(cfg.poll_interval_ms, Some(1500));
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let result = parse_config_str("concurrency = 4");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("concurrency"));
    }

    #[test]
    fn test_parse_rejects_unquoted_string() {
        let result = parse_config_str("locale = ru");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_missing_equals() {
        let result = parse_config_str("base_url");
        assert!(result.is_err());
    }

    #[test]
    fn test_comment_inside_string_is_preserved() {
        let cfg = parse_config_str(r##"base_url = "http://host/api#frag""##).unwrap();
        assert_eq!(cfg.base_url.as_deref(), Some("http://host/api#frag"));
    }

    #[test]
    fn test_validate_rejects_unknown_locale() {
        let cfg = FileConfig {
            locale: Some("de".to_string()),
            ..FileConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let cfg = FileConfig {
            read_timeout_secs: Some(0),
            ..FileConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_poll_interval() {
        let cfg = FileConfig {
            poll_interval_ms: Some(50),
            ..FileConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_in_range_values() {
        let cfg = FileConfig {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            locale: Some("zh".to_string()),
            connect_timeout_secs: Some(10),
            read_timeout_secs: Some(120),
            poll_interval_ms: Some(2000),
        };
        assert!(cfg.validate().is_ok());
    }
}
