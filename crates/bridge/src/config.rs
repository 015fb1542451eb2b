use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub life360: Life360Config,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote location-sharing service credentials and scope.
#[derive(Debug, Clone, Deserialize)]
pub struct Life360Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account login phone number.
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Pre-issued authorization secret for the token endpoint's Basic header.
    #[serde(default)]
    pub auth_token: String,

    /// Resolve every circle the account belongs to, not just the first.
    #[serde(default)]
    pub fetch_all_circles: bool,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval(),
        }
    }
}

/// Where serialized events go once dequeued.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Output mode: `console` (development) or `tcp`.
    #[serde(default = "default_output_mode")]
    pub mode: String,

    /// Target host (tcp mode).
    #[serde(default)]
    pub host: String,

    /// Target port (tcp mode).
    #[serde(default = "default_output_port")]
    pub port: u16,
}

impl OutputConfig {
    pub fn target_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: default_output_mode(),
            host: String::new(),
            port: default_output_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://api.life360.com/v3/".to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_poll_interval() -> u64 {
    60
}
fn default_output_mode() -> String {
    "console".to_string()
}
fn default_output_port() -> u16 {
    8087
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "pretty".to_string()
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with CB__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CB").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.life360.username.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "life360.username".into(),
            ));
        }
        if self.life360.password.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "life360.password".into(),
            ));
        }
        if self.life360.auth_token.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "life360.auth_token".into(),
            ));
        }
        if self.poll.interval_secs == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "poll.interval_secs must be at least 1".into(),
            ));
        }
        match self.output.mode.as_str() {
            "console" => {}
            "tcp" => {
                if self.output.host.is_empty() {
                    return Err(ConfigValidationError::MissingRequired(
                        "output.host (required in tcp mode)".into(),
                    ));
                }
            }
            other => {
                return Err(ConfigValidationError::InvalidValue(format!(
                    "output.mode must be console or tcp, got {other}"
                )));
            }
        }
        Ok(())
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds entirely from embedded defaults and overrides, without touching
    /// config files or the process environment.
    #[cfg(test)]
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [life360]
            base_url = "https://api.life360.com/v3/"
            username = "+15551234567"
            password = "hunter2"
            auth_token = "dGVzdDp0ZXN0"
            fetch_all_circles = false
            request_timeout_secs = 30

            [poll]
            interval_secs = 60

            [output]
            mode = "console"
            host = ""
            port = 8087

            [logging]
            level = "info"
            format = "pretty"
        "#;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            defaults,
            config::FileFormat::Toml,
        ));
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }
}
