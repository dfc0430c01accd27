//! API service configuration

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::StartupError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
/// Web application dev server
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Configuration for the API service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,
}

impl ApiConfig {
    /// Create a new ApiConfig from environment variables
    ///
    /// # Environment Variables
    /// - `API_HOST`: bind address (default: "0.0.0.0")
    /// - `API_PORT`: listen port (default: 8000)
    /// - `API_CORS_ORIGINS`: comma-separated allowed origins (default: "http://localhost:3000")
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_source(environment())
    }

    fn from_source(source: Environment) -> Result<Self, StartupError> {
        let config = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("cors_origins", vec![DEFAULT_CORS_ORIGIN.to_string()])?
            .add_source(source)
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("API")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("cors_origins")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Result<ApiConfig, StartupError> {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_source(environment().source(Some(map)))
    }

    #[test]
    fn test_api_config_defaults() {
        let config = from_vars(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.cors_origins, ["http://localhost:3000"]);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_api_config_with_custom_values() {
        let config = from_vars(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "9090"),
            (
                "API_CORS_ORIGINS",
                "http://localhost:3000,https://forum.example.com",
            ),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9090");
        assert_eq!(
            config.cors_origins,
            ["http://localhost:3000", "https://forum.example.com"]
        );
    }

    #[test]
    fn test_api_config_rejects_bad_port() {
        let result = from_vars(&[("API_PORT", "not-a-port")]);
        assert!(matches!(result, Err(StartupError::Config(_))));
    }
}
