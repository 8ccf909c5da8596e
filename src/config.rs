//! Configuration management

use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub keywords: KeywordFileConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the dashboard data API
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeywordFileConfig {
    /// Path of the crawler keyword config JSON file
    pub path: String,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_str().ok_or_else(|| {
            anyhow::anyhow!("config path is not valid UTF-8")
        })?;

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("SENTIMENT_DASH"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Load from default locations
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = [
            "config.toml",
            "config.yaml",
            "~/.config/sentiment-dash/config.toml",
        ];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        anyhow::bail!("No configuration file found")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let doc = r#"
            [api]
            base_url = "https://dash.example.com/api"
            timeout_secs = 10

            [keywords]
            path = "keywords.json"
        "#;

        let config: Config = toml::from_str(doc).unwrap();
        assert_eq!(config.api.base_url, "https://dash.example.com/api");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.keywords.path, "keywords.json");
    }

    #[test]
    fn test_timeout_defaults() {
        let doc = r#"
            [api]
            base_url = "https://dash.example.com/api"

            [keywords]
            path = "keywords.json"
        "#;

        let config: Config = toml::from_str(doc).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
    }
}
