use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use reptrack_assistant::GeminiConfig;
use reptrack_notification::{EmailConfig, SmsConfig};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub sms: SmsConfig,
    #[serde(default)]
    pub assistant: GeminiConfig,
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalendarConfig {
    /// User shown when the calendar page is opened without `username`.
    pub default_username: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (DATABASE_URL, GEMINI_API_KEY, GMAIL_APP_PASSWORD)
    /// 2. Environment variables (REPTRACK__DATABASE__URL, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("database.url", "sqlite:reptrack.db")?
            .set_default("database.max_connections", 5)?
            .set_default("email.smtp_host", "localhost")?
            .set_default("email.smtp_port", 1025)?
            .set_default("email.smtp_username", "")?
            .set_default("email.smtp_password", "")?
            .set_default("email.from_address", "reptrack <noreply@reptrack.localhost>")?
            .set_default("sms.gateway_domain", "tmomail.net")?
            .set_default("sms.subject", "Workout Reminder")?
            .set_default("assistant.api_key", "")?
            .set_default("assistant.model", reptrack_assistant::DEFAULT_MODEL)?
            .set_default("assistant.base_url", reptrack_assistant::API_BASE_URL)?
            .set_default("calendar.default_username", "james")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("REPTRACK")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }
        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            builder = builder.set_override("assistant.api_key", api_key)?;
        }
        if let Ok(password) = env::var("GMAIL_APP_PASSWORD") {
            builder = builder.set_override("email.smtp_password", password)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.calendar.default_username.trim().is_empty() {
            return Err("Calendar default_username must not be empty".to_string());
        }
        if self.sms.gateway_domain.trim().is_empty() {
            return Err("SMS gateway_domain must not be empty".to_string());
        }
        Ok(())
    }
}
