use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

use crate::query::MAX_PAGE_SIZE;
use crate::trajectory::HOURS_AHEAD_LIMIT;

pub const DEFAULT_CATALOG_URL: &str =
    "https://celestrak.org/NORAD/elements/gp.php?GROUP=active&FORMAT=tle";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub catalog: CatalogConfig,
    pub stream: StreamConfig,
    pub orbit: OrbitConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
    pub default_page_size: usize,
    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            default_page_size: 100,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub url: String,
    /// Sent as User-Agent; CelesTrak asks clients to identify themselves
    pub user_agent: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub refresh_interval: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            user_agent: concat!("satpos/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
            refresh_interval: Duration::from_secs(2 * 60 * 60),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    #[serde(deserialize_with = "deserialize_duration")]
    pub interval: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub max_hours_ahead: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            max_hours_ahead: 48.0,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.web.default_page_size) {
            return Err(ConfigError::Invalid(format!(
                "web.default_page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        if self.catalog.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "catalog.user_agent must not be empty".into(),
            ));
        }
        for (name, value) in [
            ("catalog.timeout", self.catalog.timeout),
            ("catalog.refresh_interval", self.catalog.refresh_interval),
            ("stream.interval", self.stream.interval),
        ] {
            if value.is_zero() {
                return Err(ConfigError::Invalid(format!("{} must be positive", name)));
            }
        }
        if !(0.0..=HOURS_AHEAD_LIMIT).contains(&self.orbit.max_hours_ahead) {
            return Err(ConfigError::Invalid(format!(
                "orbit.max_hours_ahead must be between 0 and {}",
                HOURS_AHEAD_LIMIT
            )));
        }
        Ok(())
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8000");
        assert_eq!(config.web.default_page_size, 100);
        assert_eq!(config.catalog.url, DEFAULT_CATALOG_URL);
        assert_eq!(config.catalog.timeout, Duration::from_secs(10));
        assert_eq!(config.catalog.refresh_interval, Duration::from_secs(7200));
        assert_eq!(config.stream.interval, Duration::from_secs(60));
        assert_eq!(config.orbit.max_hours_ahead, 48.0);
    }

    #[test]
    fn durations_use_humantime() {
        let config = Config::from_yaml(
            r#"
web:
  default_page_size: 25
  cors_origins: ["http://localhost:4200"]
catalog:
  timeout: 5s
  refresh_interval: 30m
stream:
  interval: 1m 30s
"#,
        )
        .unwrap();
        assert_eq!(config.web.default_page_size, 25);
        assert_eq!(config.web.cors_origins, vec!["http://localhost:4200"]);
        assert_eq!(config.catalog.timeout, Duration::from_secs(5));
        assert_eq!(config.catalog.refresh_interval, Duration::from_secs(1800));
        assert_eq!(config.stream.interval, Duration::from_secs(90));
        // untouched section keeps its defaults
        assert_eq!(config.web.bind, "0.0.0.0:8000");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_yaml("web:\n  default_page_size: 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml("stream:\n  interval: 0s\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml("orbit:\n  max_hours_ahead: 100000000\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml("orbit:\n  max_hours_ahead: -1\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml("catalog:\n  timeout: soon\n"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
