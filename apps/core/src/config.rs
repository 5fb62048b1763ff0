//! Runtime settings read from the environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

use crate::error::AppError;
use crate::telemetry::LogFormat;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
/// Longest chat message accepted, in characters.
pub const MAX_MESSAGE_CHARS: usize = 10_000;

/// Service configuration.
#[derive(Debug, Clone, Validate)]
pub struct Settings {
    /// Empty disables every model call.
    pub google_api_key: String,
    #[validate(length(min = 1))]
    pub google_model: String,
    #[validate(url)]
    pub llm_base_url: String,

    #[validate(length(min = 1))]
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub cors_origins: Vec<String>,

    #[validate(range(min = 1))]
    pub rate_limit_requests: usize,
    #[validate(range(min = 1024))]
    pub max_request_size: usize,
    #[validate(range(min = 1, max = 600))]
    pub router_timeout_secs: u64,
    #[validate(range(min = 1, max = 600))]
    pub agent_timeout_secs: u64,
    #[validate(range(min = 1))]
    pub cache_max_size: usize,
    #[validate(range(min = 1))]
    pub cache_ttl_secs: u64,

    #[validate(length(min = 1))]
    pub portfolio_owner: String,
    pub portfolio_title: String,
    pub portfolio_data_path: PathBuf,

    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            google_api_key: String::new(),
            google_model: DEFAULT_MODEL.to_string(),
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            debug: true,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            rate_limit_requests: 100,
            max_request_size: 10 * 1024 * 1024,
            router_timeout_secs: 15,
            agent_timeout_secs: 30,
            cache_max_size: 100,
            cache_ttl_secs: 3600,
            portfolio_owner: "Portfolio Owner".to_string(),
            portfolio_title: "AI Engineer & Data Scientist".to_string(),
            portfolio_data_path: PathBuf::from("data/portfolio.json"),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self, AppError> {
        if let Ok(path) = dotenv::dotenv() {
            debug!(path = %path.display(), "Loaded .env file");
        }
        Self::from_env()
    }

    /// Reads the process environment only. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let settings = Self {
            google_api_key: string_var("GOOGLE_API_KEY").unwrap_or(defaults.google_api_key),
            google_model: string_var("GOOGLE_MODEL").unwrap_or(defaults.google_model),
            llm_base_url: string_var("LLM_BASE_URL").unwrap_or(defaults.llm_base_url),
            host: string_var("HOST").unwrap_or(defaults.host),
            port: parsed_var("PORT")?.unwrap_or(defaults.port),
            debug: bool_var("DEBUG")?.unwrap_or(defaults.debug),
            cors_origins: string_var("CORS_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or(defaults.cors_origins),
            rate_limit_requests: parsed_var("RATE_LIMIT_REQUESTS")?
                .unwrap_or(defaults.rate_limit_requests),
            max_request_size: parsed_var("MAX_REQUEST_SIZE")?.unwrap_or(defaults.max_request_size),
            router_timeout_secs: parsed_var("ROUTER_TIMEOUT_SECS")?
                .unwrap_or(defaults.router_timeout_secs),
            agent_timeout_secs: parsed_var("AGENT_TIMEOUT_SECS")?
                .unwrap_or(defaults.agent_timeout_secs),
            cache_max_size: parsed_var("CACHE_MAX_SIZE")?.unwrap_or(defaults.cache_max_size),
            cache_ttl_secs: parsed_var("CACHE_TTL_SECS")?.unwrap_or(defaults.cache_ttl_secs),
            portfolio_owner: string_var("PORTFOLIO_OWNER").unwrap_or(defaults.portfolio_owner),
            portfolio_title: string_var("PORTFOLIO_TITLE").unwrap_or(defaults.portfolio_title),
            portfolio_data_path: string_var("PORTFOLIO_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.portfolio_data_path),
            log_level: string_var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: parsed_var("LOG_FORMAT")?.unwrap_or(defaults.log_format),
        };

        settings
            .validate()
            .map_err(|e| AppError::Config(format!("Invalid settings: {}", e)))?;
        Ok(settings)
    }

    pub fn has_llm(&self) -> bool {
        !self.google_api_key.trim().is_empty()
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid bind address {}:{}: {}", self.host, self.port, e)))
    }

    pub fn router_timeout(&self) -> Duration {
        Duration::from_secs(self.router_timeout_secs)
    }

    pub fn agent_timeout(&self) -> Duration {
        Duration::from_secs(self.agent_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

fn string_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parsed_var<T>(key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    string_var(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AppError::Config(format!("{} has invalid value {:?}: {}", key, raw, e)))
        })
        .transpose()
}

fn bool_var(key: &str) -> Result<Option<bool>, AppError> {
    string_var(key)
        .map(|raw| match raw.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::Config(format!("{} has invalid boolean {:?}", key, raw))),
        })
        .transpose()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: &[&str] = &[
        "GOOGLE_API_KEY",
        "GOOGLE_MODEL",
        "LLM_BASE_URL",
        "HOST",
        "PORT",
        "DEBUG",
        "CORS_ORIGINS",
        "RATE_LIMIT_REQUESTS",
        "MAX_REQUEST_SIZE",
        "ROUTER_TIMEOUT_SECS",
        "AGENT_TIMEOUT_SECS",
        "CACHE_MAX_SIZE",
        "CACHE_TTL_SECS",
        "PORTFOLIO_OWNER",
        "PORTFOLIO_TITLE",
        "PORTFOLIO_DATA_PATH",
        "LOG_LEVEL",
        "LOG_FORMAT",
    ];

    /// Runs `f` with every settings variable unset except `vars`.
    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let mut all: Vec<(&str, Option<&str>)> = ALL_KEYS.iter().map(|k| (*k, None)).collect();
        for (key, value) in vars {
            all.retain(|(k, _)| k != key);
            all.push((*key, Some(*value)));
        }
        temp_env::with_vars(all, f);
    }

    #[test]
    fn test_defaults_when_unset() {
        with_env(&[], || {
            let settings = Settings::from_env().unwrap();
            assert!(!settings.has_llm());
            assert_eq!(settings.google_model, DEFAULT_MODEL);
            assert_eq!(settings.port, 8000);
            assert_eq!(settings.router_timeout(), Duration::from_secs(15));
            assert_eq!(settings.cors_origins.len(), 2);
            assert_eq!(settings.log_format, LogFormat::Pretty);
        });
    }

    #[test]
    fn test_overrides() {
        with_env(
            &[
                ("GOOGLE_API_KEY", "secret"),
                ("PORT", "9001"),
                ("DEBUG", "false"),
                ("CORS_ORIGINS", "https://a.example, https://b.example ,"),
                ("ROUTER_TIMEOUT_SECS", "3"),
                ("LOG_FORMAT", "bunyan"),
            ],
            || {
                let settings = Settings::from_env().unwrap();
                assert!(settings.has_llm());
                assert_eq!(settings.port, 9001);
                assert!(!settings.debug);
                assert_eq!(
                    settings.cors_origins,
                    vec!["https://a.example".to_string(), "https://b.example".to_string()]
                );
                assert_eq!(settings.router_timeout(), Duration::from_secs(3));
                assert_eq!(settings.log_format, LogFormat::Bunyan);
            },
        );
    }

    #[test]
    fn test_unparseable_number_is_config_error() {
        with_env(&[("PORT", "eighty")], || {
            let err = Settings::from_env().unwrap_err();
            assert!(matches!(err, AppError::Config(ref msg) if msg.contains("PORT")));
        });
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        with_env(&[("ROUTER_TIMEOUT_SECS", "0")], || {
            assert!(matches!(Settings::from_env(), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        with_env(&[("LLM_BASE_URL", "not a url")], || {
            assert!(matches!(Settings::from_env(), Err(AppError::Config(_))));
        });
    }

    #[test]
    fn test_whitespace_api_key_counts_as_missing() {
        with_env(&[("GOOGLE_API_KEY", "   ")], || {
            assert!(!Settings::from_env().unwrap().has_llm());
        });
    }

    #[test]
    fn test_bind_addr() {
        let settings = Settings {
            host: "127.0.0.1".to_string(),
            port: 8123,
            ..Settings::default()
        };
        assert_eq!(settings.bind_addr().unwrap(), "127.0.0.1:8123".parse::<SocketAddr>().unwrap());
    }
}
