use crate::core::ServiceOptions;
use crate::domain::model::ServerType;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub url: String,
    #[serde(default)]
    pub server_type: ServerType,
    pub timeout_seconds: Option<u64>,
    pub token: Option<String>,
    pub headers: Option<HashMap<String, String>>,
}

/// Paging defaults for feature queries started from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct QueryConfig {
    pub from_index: i64,
    pub to_index: i64,
    pub max_features: i64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            from_index: 0,
            to_index: 19,
            max_features: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl ClientConfig {
    /// A configuration pointing at `url` with every other setting at its default.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            server: ServerConfig {
                url: url.into(),
                server_type: ServerType::default(),
                timeout_seconds: None,
                token: None,
                headers: None,
            },
            query: QueryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            server_type: self.server.server_type,
            token: self.server.token.clone(),
            headers: self.server.headers.clone().unwrap_or_default(),
            timeout: self.server.timeout_seconds.map(Duration::from_secs),
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("server.url", &self.server.url)?;

        if let Some(timeout) = self.server.timeout_seconds {
            validate_range("server.timeout_seconds", timeout, 1, 600)?;
        }

        if let Some(token) = &self.server.token {
            validate_non_empty_string("server.token", token)?;
            if token.contains("${") {
                return Err(ClientError::MissingConfigError {
                    field: "server.token".to_string(),
                });
            }
        }

        if self.query.max_features < 0 {
            return Err(ClientError::InvalidConfigValueError {
                field: "query.max_features".to_string(),
                value: self.query.max_features.to_string(),
                reason: "Value cannot be negative".to_string(),
            });
        }

        let levels = ["trace", "debug", "info", "warn", "error"];
        if !levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ClientError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Valid levels: {}", levels.join(", ")),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_client_config() {
        let toml_content = r#"
[server]
url = "http://localhost:8090/iserver/services/data-world/rest/data"
server_type = "IPORTAL"
timeout_seconds = 30
token = "abc"

[server.headers]
X-Client = "cli"

[query]
to_index = 49
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.server_type, ServerType::Iportal);
        assert_eq!(config.query.from_index, 0);
        assert_eq!(config.query.to_index, 49);
        assert_eq!(config.query.max_features, 1000);
        assert_eq!(config.logging, LoggingConfig::default());
        assert!(config.validate().is_ok());

        let options = config.service_options();
        assert_eq!(options.token.as_deref(), Some("abc"));
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
        assert_eq!(options.headers.get("X-Client").map(String::as_str), Some("cli"));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ISERVER_CLIENT_TEST_TOKEN", "from-env");

        let toml_content = r#"
[server]
url = "http://localhost:8090/iserver/services/map-world/rest/maps/World"
token = "${ISERVER_CLIENT_TEST_TOKEN}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.token.as_deref(), Some("from-env"));

        std::env::remove_var("ISERVER_CLIENT_TEST_TOKEN");
    }

    #[test]
    fn test_unresolved_token_fails_validation() {
        let toml_content = r#"
[server]
url = "http://localhost:8090/rest"
token = "${ISERVER_CLIENT_UNSET_VARIABLE}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ClientError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::for_url("invalid-url");
        assert!(config.validate().is_err());

        config.server.url = "https://example.com/iserver".to_string();
        config.server.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        config.server.timeout_seconds = Some(10);
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let toml_content = r#"
[server]
url = "http://localhost:8090/rest"
retries = 3
"#;
        assert!(ClientConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nurl = \"https://example.com/iserver/services/data-world/rest/data\"\n[logging]\nlevel = \"debug\"\njson = true\n")
            .unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "debug");
    }
}
