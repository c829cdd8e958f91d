//! Server configuration management.
//!
//! Handles loading configuration from environment variables, TOML files,
//! and CLI arguments. Besides the usual host/port/logging knobs, the
//! configuration carries the hard request limits enforced before the
//! engine is invoked: arbitrary-precision arithmetic cost grows
//! superlinearly with digit count, so precision and iteration counts
//! must be caller-bounded to bound worst-case CPU time per request.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid environment: {0}. Must be one of: development, staging, production")]
    InvalidEnvironment(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Environment types for configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl Environment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Server configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Environment (development, staging, production)
    #[serde(deserialize_with = "deserialize_environment")]
    pub environment: Environment,
    /// Largest accepted working precision, in significant decimal digits
    pub max_precision_digits: u64,
    /// Largest accepted iteration count; higher requests are clamped
    pub max_iterations: u32,
    /// Longest accepted `number` string, in bytes
    pub max_number_length: usize,
    /// Working precision used when the request omits `precisionDigits`
    pub default_precision_digits: u64,
    /// Iteration count used when the request omits `iterations`
    pub default_iterations: u32,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_environment<'de, D>(deserializer: D) -> Result<Environment, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Environment::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            environment: Environment::Development,
            max_precision_digits: 5000,
            max_iterations: 2000,
            max_number_length: 20000,
            default_precision_digits: 200,
            default_iterations: 20,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("SQRTD_HOST") {
            config.host = host;
        }
        if let Ok(port_str) = std::env::var("SQRTD_PORT") {
            config.port = port_str.parse().map_err(|_| ConfigError::InvalidPort(0))?;
        }
        if let Ok(log_level) = std::env::var("SQRTD_LOG_LEVEL") {
            config.log_level = LogLevel::from_str(&log_level)?;
        }
        if let Ok(env) = std::env::var("SQRTD_ENV") {
            config.environment = Environment::from_str(&env)?;
        }
        if let Ok(digits) = std::env::var("SQRTD_MAX_PRECISION_DIGITS") {
            config.max_precision_digits = digits
                .parse()
                .map_err(|_| ConfigError::InvalidLimit(format!("max_precision_digits: {}", digits)))?;
        }
        if let Ok(iters) = std::env::var("SQRTD_MAX_ITERATIONS") {
            config.max_iterations = iters
                .parse()
                .map_err(|_| ConfigError::InvalidLimit(format!("max_iterations: {}", iters)))?;
        }
        if let Ok(len) = std::env::var("SQRTD_MAX_NUMBER_LENGTH") {
            config.max_number_length = len
                .parse()
                .map_err(|_| ConfigError::InvalidLimit(format!("max_number_length: {}", len)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        if self.max_precision_digits < 2 {
            return Err(ConfigError::InvalidLimit(
                "max_precision_digits must be at least 2".to_string(),
            ));
        }
        if self.default_precision_digits < 2
            || self.default_precision_digits > self.max_precision_digits
        {
            return Err(ConfigError::InvalidLimit(format!(
                "default_precision_digits must be within [2, {}]",
                self.max_precision_digits
            )));
        }
        if self.default_iterations > self.max_iterations {
            return Err(ConfigError::InvalidLimit(format!(
                "default_iterations must not exceed {}",
                self.max_iterations
            )));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            if let Ok(level) = LogLevel::from_str(log_level) {
                self.log_level = level;
            }
        }
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ServerConfig, ConfigError> {
    let mut config = if let Some(config_path) = &cli.config_file {
        ServerConfig::from_file(config_path)?
    } else {
        ServerConfig::default()
    };

    if let Ok(env_config) = ServerConfig::from_env() {
        if std::env::var("SQRTD_HOST").is_ok() {
            config.host = env_config.host;
        }
        if std::env::var("SQRTD_PORT").is_ok() {
            config.port = env_config.port;
        }
        if std::env::var("SQRTD_LOG_LEVEL").is_ok() {
            config.log_level = env_config.log_level;
        }
        if std::env::var("SQRTD_ENV").is_ok() {
            config.environment = env_config.environment;
        }
        if std::env::var("SQRTD_MAX_PRECISION_DIGITS").is_ok() {
            config.max_precision_digits = env_config.max_precision_digits;
        }
        if std::env::var("SQRTD_MAX_ITERATIONS").is_ok() {
            config.max_iterations = env_config.max_iterations;
        }
        if std::env::var("SQRTD_MAX_NUMBER_LENGTH").is_ok() {
            config.max_number_length = env_config.max_number_length;
        }
    }

    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
