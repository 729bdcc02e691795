use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_BASE: &str = "ROSTER_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "ROSTER_HTTP_TIMEOUT_SECS";
pub const ENV_EXPORT_DIR: &str = "ROSTER_EXPORT_DIR";

/// Runtime settings for talking to the roster backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: Url,
    pub timeout: Duration,
    pub export_dir: PathBuf,
}

impl Config {
    /// Reads settings from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = parse_api_base(
            lookup(ENV_API_BASE)
                .as_deref()
                .unwrap_or(DEFAULT_API_BASE),
        )?;

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let export_dir = lookup(ENV_EXPORT_DIR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Config {
            api_base,
            timeout,
            export_dir,
        })
    }
}

pub fn parse_api_base(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| ConfigError::ApiBase {
        value: trimmed.to_string(),
        reason: e.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::ApiBase {
            value: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    Ok(url)
}

pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Timeout(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base.as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_API_BASE, "https://roster.example.org/api"),
            (ENV_TIMEOUT_SECS, "3"),
            (ENV_EXPORT_DIR, "/tmp/exports"),
        ]))
        .unwrap();
        assert_eq!(config.api_base.host_str(), Some("roster.example.org"));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[(ENV_API_BASE, "not a url")])),
            Err(ConfigError::ApiBase { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[(ENV_API_BASE, "ftp://files.local")])),
            Err(ConfigError::ApiBase { .. })
        ));
        assert_eq!(
            Config::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "0")])).unwrap_err(),
            ConfigError::Timeout("0".into())
        );
    }
}
