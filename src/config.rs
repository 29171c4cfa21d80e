use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Process configuration.
///
/// Keys match the environment variable names, lowercased: `PRACTICUM_TOKEN`
/// populates `practicum_token` and so on. The three credentials are optional
/// here so that [`AppConfig::credentials`] can report each missing one by name.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    #[serde(default = "default_endpoint")]
    pub practicum_endpoint: String,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    /// Seconds between poll cycles.
    #[serde(default = "default_retry_time")]
    pub retry_time: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

// Manual Debug impl to avoid leaking the tokens
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("practicum_token", &self.practicum_token.as_ref().map(|_| "[REDACTED]"))
            .field("telegram_token", &self.telegram_token.as_ref().map(|_| "[REDACTED]"))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("practicum_endpoint", &self.practicum_endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_time", &self.retry_time)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Credentials checked for presence at startup.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"[REDACTED]")
            .field("telegram_token", &"[REDACTED]")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_time() -> u64 {
    600
}

fn default_request_timeout() -> u64 {
    30
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Load from file if specified
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        } else {
            builder = builder.add_source(config::File::with_name("homework_bot").required(false));
        }

        builder = builder.add_source(config::Environment::default().try_parsing(true));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let config = builder
            .build()
            .map_err(|e| AppError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Check that every required credential is present and non-empty.
    ///
    /// Each missing variable is logged separately before the error is
    /// returned.
    pub fn credentials(&self) -> Result<Credentials> {
        let required = [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            for name in &missing {
                tracing::error!(variable = name, "Missing required environment variable");
            }
            return Err(AppError::Config(format!(
                "missing required variables: {}",
                missing.join(", ")
            )));
        }

        Ok(Credentials {
            practicum_token: self.practicum_token.clone().unwrap_or_default(),
            telegram_token: self.telegram_token.clone().unwrap_or_default(),
            telegram_chat_id: self.telegram_chat_id.clone().unwrap_or_default(),
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.retry_time)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn from_toml(contents: &str) -> Result<AppConfig> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let builder = config::Config::builder()
            .add_source(config::File::from(file.path()).format(config::FileFormat::Toml));
        AppConfig::from_builder(builder)
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_toml(
            r#"
            practicum_token = "p"
            telegram_token = "t"
            telegram_chat_id = "42"
            "#,
        )
        .unwrap();

        assert_eq!(config.poll_interval(), Duration::from_secs(600));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.telegram_api_url, "https://api.telegram.org");
        assert!(config.practicum_endpoint.ends_with("/homework_statuses/"));

        let credentials = config.credentials().unwrap();
        assert_eq!(credentials.practicum_token, "p");
        assert_eq!(credentials.telegram_chat_id, "42");
    }

    #[test]
    fn test_missing_credentials_are_named() {
        let config = from_toml(
            r#"
            practicum_token = "p"
            telegram_chat_id = ""
            retry_time = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        match config.credentials() {
            Err(AppError::Config(msg)) => {
                assert!(msg.contains("TELEGRAM_TOKEN"));
                assert!(msg.contains("TELEGRAM_CHAT_ID"));
                assert!(!msg.contains("PRACTICUM_TOKEN"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let config = from_toml(
            r#"
            practicum_token = "super-secret"
            telegram_token = "also-secret"
            telegram_chat_id = "42"
            "#,
        )
        .unwrap();

        let rendered = format!("{config:?} {:?}", config.credentials().unwrap());
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("also-secret"));
    }
}
