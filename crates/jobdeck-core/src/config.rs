use crate::http::DEFAULT_API_URL;
use crate::pagination::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Contents of `~/.config/jobdeck/config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub output: Option<String>,
}

/// Environment variables that feed configuration.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub api_url: Option<String>,
    pub page_size: Option<String>,
    pub format: Option<String>,
}

impl EnvOverrides {
    /// Read `JOBDECK_API_URL`, `JOBDECK_PAGE_SIZE` and `FORMAT`.
    #[must_use]
    pub fn from_env() -> Self {
        let read = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_url: read("JOBDECK_API_URL"),
            page_size: read("JOBDECK_PAGE_SIZE"),
            format: read("FORMAT"),
        }
    }
}

/// Command-line flags that feed configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub json: bool,
}

/// Settings after applying flags > environment > file > defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveConfig {
    pub api_url: String,
    pub page_size: u32,
    pub timeout_secs: Option<u64>,
    pub resolved_output: String,
    /// Config file that was read, if one exists.
    pub config_file: Option<PathBuf>,
}

impl EffectiveConfig {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Default location of the user config file.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jobdeck/config.toml"))
}

/// Read the user config file, returning defaults when there is none.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<(UserConfig, Option<PathBuf>)> {
    let Some(path) = user_config_path() else {
        return Ok((UserConfig::default(), None));
    };
    if !path.exists() {
        return Ok((UserConfig::default(), None));
    }
    let config = load_user_config_from(&path)?;
    Ok((config, Some(path)))
}

/// # Errors
///
/// Returns an error if `path` exists but cannot be read or parsed.
pub fn load_user_config_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load the user config and resolve it against the process environment.
///
/// # Errors
///
/// Fails on an unreadable config file or an invalid setting.
pub fn resolve_config(cli: &CliOverrides) -> Result<EffectiveConfig> {
    let (user, config_file) = load_user_config()?;
    let mut effective = resolve_with(&user, &EnvOverrides::from_env(), cli)?;
    effective.config_file = config_file;
    Ok(effective)
}

/// Pure resolution step, exposed for tests and for callers with their own
/// sources.
///
/// # Errors
///
/// Fails when the API URL is not http(s) or the page size is not a
/// positive integer.
pub fn resolve_with(
    user: &UserConfig,
    env: &EnvOverrides,
    cli: &CliOverrides,
) -> Result<EffectiveConfig> {
    let api_url = cli
        .api_url
        .clone()
        .or_else(|| env.api_url.clone())
        .or_else(|| user.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_url = validate_api_url(&api_url)?;

    let page_size = match env.page_size.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .with_context(|| format!("JOBDECK_PAGE_SIZE must be a positive integer, got `{raw}`"))?,
        None => user.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    if page_size == 0 {
        bail!("page_size must be at least 1");
    }

    let resolved_output = resolve_output(cli.json, user.output.clone(), env.format.clone());

    Ok(EffectiveConfig {
        api_url,
        page_size,
        timeout_secs: user.timeout_secs.filter(|secs| *secs > 0),
        resolved_output,
        config_file: None,
    })
}

fn validate_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed =
        url::Url::parse(trimmed).with_context(|| format!("api_url `{raw}` is not a valid URL"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("api_url `{raw}` must use http or https");
    }
    Ok(trimmed.to_string())
}

fn resolve_output(cli_json: bool, user_output: Option<String>, env_format: Option<String>) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}
