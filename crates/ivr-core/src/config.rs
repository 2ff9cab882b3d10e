//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables (`HOST`, `PORT`, `APP_ENV`, `LOG_LEVEL`)
//! 2. `ivr-gateway.toml` (or a path given on the command line)
//! 3. Defaults
//!
//! `${VAR_NAME}` inside the TOML file is replaced with the environment value.
//! The resulting `Config` is handed to the server at startup; request
//! handlers never read the environment.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::Error;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "ivr-gateway.toml";

/// Run environment, formerly toggled through `APP_ENV`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppEnv {
    #[default]
    Development,
    Production,
}

impl AppEnv {
    /// Parse an `APP_ENV` value; anything but "production" is development
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => AppEnv::Production,
            _ => AppEnv::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, AppEnv::Production)
    }

    /// Log filter used when neither `RUST_LOG` nor `LOG_LEVEL` is set
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            AppEnv::Production => "info",
            AppEnv::Development => "debug",
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address to bind; `host` must be an IP address
    pub fn socket_addr(&self) -> crate::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address {}:{}: {}", self.host, self.port, e)))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Main configuration for the voice responder
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub app_env: AppEnv,

    /// Log filter directive (e.g. "info", "ivr_api=debug")
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    /// Replace `${VAR_NAME}` with environment values
    ///
    /// Unknown variables expand to an empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Parse TOML text (after env expansion) without applying env overrides
    fn from_toml_str(content: &str) -> crate::Result<Self> {
        let expanded = Self::expand_env_vars(content);
        let toml: TomlConfig = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        let server = toml.server.unwrap_or_default();
        Ok(Config {
            server: ServerConfig {
                host: server.host.unwrap_or_else(default_host),
                port: server.port.unwrap_or_else(default_port),
            },
            app_env: toml.app_env.as_deref().map(AppEnv::parse).unwrap_or_default(),
            log_level: toml.log.and_then(|log| log.level),
        })
    }

    /// Load configuration from a TOML file, then apply env overrides
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from `path` if given, else `ivr-gateway.toml` if present, else env
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        if let Some(path) = path {
            return Self::from_toml_file(path);
        }

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_toml_file(DEFAULT_CONFIG_FILE);
        }

        Self::from_env()
    }

    fn apply_env_overrides(&mut self) -> crate::Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override settings from a variable lookup; empty values are ignored
    fn apply_overrides<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(host) = var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("Invalid PORT value: {}", port)))?;
        }
        if let Some(env) = var("APP_ENV") {
            self.app_env = AppEnv::parse(&env);
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = Some(level);
        }

        Ok(())
    }

    /// Log filter to install when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or_else(|| self.app_env.default_log_filter())
    }
}

// ============================================================================
// TOML file layout
// ============================================================================

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    app_env: Option<String>,
    server: Option<TomlServerConfig>,
    log: Option<TomlLogConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlServerConfig {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlLogConfig {
    #[serde(default)]
    level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.app_env, AppEnv::Development);
        assert!(config.log_level.is_none());
        assert_eq!(config.log_filter(), "debug");
    }

    #[test]
    fn test_app_env_parse() {
        assert_eq!(AppEnv::parse("production"), AppEnv::Production);
        assert_eq!(AppEnv::parse(" Production "), AppEnv::Production);
        assert_eq!(AppEnv::parse("staging"), AppEnv::Development);
        assert_eq!(AppEnv::parse(""), AppEnv::Development);
        assert!(AppEnv::Production.is_production());
        assert_eq!(AppEnv::Production.default_log_filter(), "info");
    }

    #[test]
    fn test_socket_addr() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
        };
        assert_eq!(server.socket_addr().unwrap(), "127.0.0.1:9000".parse().unwrap());

        let bad = ServerConfig {
            host: "not a host".to_string(),
            port: 9000,
        };
        assert!(matches!(bad.socket_addr(), Err(Error::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[
                ("HOST", "127.0.0.1"),
                ("PORT", "3000"),
                ("APP_ENV", "production"),
                ("LOG_LEVEL", "warn"),
            ]))
            .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.app_env, AppEnv::Production);
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_empty_overrides_are_ignored() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[("PORT", ""), ("APP_ENV", "")]))
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(lookup_from(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_production_log_filter() {
        let config = Config {
            app_env: AppEnv::Production,
            ..Config::default()
        };
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn test_expand_env_vars() {
        unsafe {
            std::env::set_var("IVR_CORE_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${IVR_CORE_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        let result = Config::expand_env_vars("prefix_${IVR_CORE_NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("IVR_CORE_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_passthrough() {
        assert_eq!(Config::expand_env_vars("no_vars_here"), "no_vars_here");
        assert_eq!(Config::expand_env_vars("${}_content"), "_content");
        assert_eq!(Config::expand_env_vars("cost $5"), "cost $5");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_content = r#"
app_env = "production"

[server]
host = "127.0.0.1"
port = 9090

[log]
level = "ivr_api=debug"
"#;

        let config = Config::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.app_env, AppEnv::Production);
        assert_eq!(config.log_level.as_deref(), Some("ivr_api=debug"));
    }

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = Config::from_toml_str("[server]\nport = 5000\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.app_env, AppEnv::Development);
    }

    #[test]
    fn test_toml_invalid() {
        let result = Config::from_toml_str("[server\nport = ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[log]\nlevel = \"${{IVR_CORE_FILE_TEST_LEVEL}}\"").unwrap();
        unsafe {
            std::env::set_var("IVR_CORE_FILE_TEST_LEVEL", "ivr_core=trace");
        }

        let config = Config::from_toml_file(file.path()).unwrap();
        if std::env::var("LOG_LEVEL").is_err() {
            assert_eq!(config.log_level.as_deref(), Some("ivr_core=trace"));
        }

        unsafe {
            std::env::remove_var("IVR_CORE_FILE_TEST_LEVEL");
        }
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = Config::from_toml_file("/nonexistent/ivr-gateway.toml");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
