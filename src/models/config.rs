use std::env;

/// Environment variable holding the Together AI API key
pub const API_KEY_VAR: &str = "TOGETHER_API_KEY";

/// Optional override for the API base URL (useful for tests and gateways)
pub const BASE_URL_VAR: &str = "TOGETHER_BASE_URL";

/// Together AI API endpoint used when no override is set
pub const DEFAULT_BASE_URL: &str = "https://api.together.xyz";

/// Runtime configuration resolved once from the process environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    pub api_key: String,
    pub base_url: String,
}

impl OcrConfig {
    /// Build configuration from the current environment.
    ///
    /// An unset API key resolves to an empty string; the remote call is still
    /// attempted and the provider's auth error is surfaced like any other
    /// remote failure.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_VAR).unwrap_or_default(),
            base_url: env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_from_env_defaults_when_unset() {
        env::remove_var(API_KEY_VAR);
        env::remove_var(BASE_URL_VAR);

        let config = OcrConfig::from_env();

        assert_eq!(config.api_key, "");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_key_and_base_url() {
        env::set_var(API_KEY_VAR, "tok-123");
        env::set_var(BASE_URL_VAR, "http://127.0.0.1:9999");

        let config = OcrConfig::from_env();

        assert_eq!(config.api_key, "tok-123");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");

        env::remove_var(API_KEY_VAR);
        env::remove_var(BASE_URL_VAR);
    }

    #[test]
    #[serial]
    fn test_empty_key_is_kept_as_is() {
        // Presence is not validated; an empty value flows through unchanged
        env::set_var(API_KEY_VAR, "");
        env::remove_var(BASE_URL_VAR);

        let config = OcrConfig::from_env();
        assert_eq!(config.api_key, "");

        env::remove_var(API_KEY_VAR);
    }
}
