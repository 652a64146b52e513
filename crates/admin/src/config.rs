//! Desk configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MERCHDESK_API_URL` - Base URL of the persistence service (e.g. `https://shop.example.com`)
//!
//! ## Optional
//! - `MERCHDESK_API_TOKEN` - Bearer token sent with every request
//! - `MERCHDESK_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `MERCHDESK_LOG_JSON` - Emit JSON logs when set
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const API_URL_VAR: &str = "MERCHDESK_API_URL";
const API_TOKEN_VAR: &str = "MERCHDESK_API_TOKEN";
const TIMEOUT_VAR: &str = "MERCHDESK_HTTP_TIMEOUT_SECS";
const SAMPLE_RATE_VAR: &str = "SENTRY_SAMPLE_RATE";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MIN_TOKEN_BITS_PER_CHAR: f64 = 3.0;

/// Fragments of template tokens, matched case-insensitively.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Desk configuration.
#[derive(Clone)]
pub struct DeskConfig {
    /// Base URL of the persistence service
    pub api_url: Url,
    /// Bearer token for the persistence service
    pub api_token: Option<SecretString>,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Emit JSON logs instead of text
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl std::fmt::Debug for DeskConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeskConfig")
            .field("api_url", &self.api_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("request_timeout", &self.request_timeout)
            .field("log_json", &self.log_json)
            .field("sentry_dsn", &self.sentry_dsn)
            .field("sentry_environment", &self.sentry_environment)
            .field("sentry_sample_rate", &self.sentry_sample_rate)
            .finish()
    }
}

impl DeskConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the API token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(
            &env_var(API_URL_VAR).ok_or_else(|| ConfigError::MissingEnvVar(API_URL_VAR.into()))?,
        )?;
        let api_token = env_var(API_TOKEN_VAR).map(parse_api_token).transpose()?;
        let timeout_secs: u64 = parse_env_or(TIMEOUT_VAR, DEFAULT_TIMEOUT_SECS)?;
        let sentry_sample_rate: f32 = parse_env_or(SAMPLE_RATE_VAR, 1.0)?;
        if !(0.0..=1.0).contains(&sentry_sample_rate) {
            return Err(ConfigError::InvalidEnvVar(
                SAMPLE_RATE_VAR.into(),
                format!("{sentry_sample_rate} is outside 0.0..=1.0"),
            ));
        }

        Ok(Self {
            api_url,
            api_token,
            request_timeout: Duration::from_secs(timeout_secs),
            log_json: env_var("MERCHDESK_LOG_JSON").is_some(),
            sentry_dsn: env_var("SENTRY_DSN"),
            sentry_environment: env_var("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// Configuration for a local service with no token, for tests and
    /// offline runs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_url` is not an absolute
    /// http(s) URL.
    pub fn local(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the service base URL, which must be http(s).
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(API_URL_VAR.into(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            API_URL_VAR.into(),
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// A set, non-blank environment variable.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `key` if set, otherwise fall back to `default`.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.into(), e.to_string()))
    })
}

/// Accept the bearer token unless it looks like a template value or is too
/// repetitive to have been generated.
fn parse_api_token(token: String) -> Result<SecretString, ConfigError> {
    let lower = token.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(**p)) {
        return Err(ConfigError::InsecureSecret(
            API_TOKEN_VAR.into(),
            format!("looks like a placeholder (contains '{pattern}')"),
        ));
    }

    let bits = bits_per_char(&token);
    if bits < MIN_TOKEN_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            API_TOKEN_VAR.into(),
            format!("only {bits:.2} bits of entropy per character, need {MIN_TOKEN_BITS_PER_CHAR:.1}"),
        ));
    }
    Ok(SecretString::from(token))
}

/// Shannon entropy of the character distribution.
fn bits_per_char(s: &str) -> f64 {
    let mut counts: HashMap<char, u32> = HashMap::new();
    let mut total = 0_u32;
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
        total += 1;
    }
    if total == 0 {
        return 0.0;
    }

    let total = f64::from(total);
    counts
        .values()
        .map(|&n| {
            let p = f64::from(n) / total;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_per_char() {
        assert!(bits_per_char("").abs() < f64::EPSILON);
        assert!(bits_per_char("zzzz").abs() < f64::EPSILON);
        assert!((bits_per_char("ab") - 1.0).abs() < 0.01);
        assert!((bits_per_char("abcd") - 2.0).abs() < 0.01);
    }

    #[test]
    fn test_placeholder_token_rejected() {
        let err = parse_api_token("your-token-here".to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(var, _) if var == API_TOKEN_VAR));
    }

    #[test]
    fn test_repetitive_token_rejected() {
        let err = parse_api_token("abababababababababab".to_string()).unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_random_token_accepted() {
        assert!(parse_api_token("mD7#qv2Lw9!ZkR4t".to_string()).is_ok());
    }

    #[test]
    fn test_unset_variable_uses_default() {
        let timeout: u64 = parse_env_or("MERCHDESK_UNSET_FOR_TEST_7Q2", 30).unwrap();
        assert_eq!(timeout, 30);
        assert!(env_var("MERCHDESK_UNSET_FOR_TEST_7Q2").is_none());
    }

    #[test]
    fn test_parse_api_url() {
        assert!(parse_api_url("https://shop.test").is_ok());
        assert!(parse_api_url("http://127.0.0.1:3000/").is_ok());
        assert!(matches!(
            parse_api_url("ftp://shop.test"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            parse_api_url("not a url"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_local_config_defaults() {
        let config = DeskConfig::local("http://localhost:3000").unwrap();
        assert!(config.api_token.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let mut config = DeskConfig::local("https://shop.test").unwrap();
        config.api_token = Some(SecretString::from("super_secret_token_value"));

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("shop.test"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token_value"));
    }
}
