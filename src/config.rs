// ============================================================================
// CONFIG - Compile-time application configuration
// ============================================================================
// Values come from `option_env!`, populated by build.rs from `.env`.
// ============================================================================

use crate::utils::constants::{DEFAULT_API_BASE_URL, DEFAULT_TOKEN_STORAGE_KEY};

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prepended to every request path ("/api" behind the dev proxy)
    pub api_base_url: String,
    /// localStorage key holding the bearer token
    pub token_storage_key: String,
    /// Send cookies with every request
    pub with_credentials: bool,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
            with_credentials: true,
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Loads configuration from compile-time environment variables
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("API_BASE_URL"),
            option_env!("TOKEN_STORAGE_KEY"),
            option_env!("WITH_CREDENTIALS"),
            option_env!("ENABLE_LOGGING"),
        )
    }

    fn from_values(
        api_base_url: Option<&str>,
        token_storage_key: Option<&str>,
        with_credentials: Option<&str>,
        enable_logging: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: api_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            token_storage_key: token_storage_key
                .filter(|key| !key.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.token_storage_key),
            with_credentials: with_credentials
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.with_credentials),
            enable_logging: enable_logging
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
        }
    }

    pub fn log_level(&self) -> log::Level {
        if self.enable_logging {
            log::Level::Debug
        } else {
            log::Level::Warn
        }
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = AppConfig::from_values(None, None, None, None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_base_url, "/api");
        assert_eq!(config.token_storage_key, "token");
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let config = AppConfig::from_values(Some("https://admin.example.com/api/v1/"), None, None, None);
        assert_eq!(config.api_base_url, "https://admin.example.com/api/v1");
    }

    #[test]
    fn unparsable_flags_keep_defaults() {
        let config = AppConfig::from_values(None, Some(""), Some("yes"), Some("false"));
        assert!(config.with_credentials);
        assert!(!config.enable_logging);
        assert_eq!(config.token_storage_key, "token");
        assert_eq!(config.log_level(), log::Level::Warn);
    }
}
