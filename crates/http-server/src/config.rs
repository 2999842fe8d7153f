//! Server configuration
//!
//! Only network plumbing is configurable. Reads `ARB_HOST`, `ARB_PORT` and
//! `ARB_CORS_ORIGINS` (comma separated) on top of the defaults.

use serde::{Deserialize, Serialize};

/// Browser origins allowed to call the API unless overridden
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "https://ertugrulgaziabaci.com.tr",
    "https://www.ertugrulgaziabaci.com.tr",
];

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::with_prefix("ARB"))
    }

    fn load(env: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("cors_origins", defaults.cors_origins)?
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix("ARB").source(Some(source))
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ServerConfig::load(env(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(
            config.cors_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://ertugrulgaziabaci.com.tr".to_string(),
                "https://www.ertugrulgaziabaci.com.tr".to_string(),
            ]
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::load(env(&[
            ("ARB_HOST", "127.0.0.1"),
            ("ARB_PORT", "9000"),
            ("ARB_CORS_ORIGINS", "http://localhost:3000,https://example.com"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "127.0.0.1:9000");
        assert_eq!(
            config.cors_origins,
            vec!["http://localhost:3000".to_string(), "https://example.com".to_string()]
        );
    }
}
