//! Storefront configuration loaded from environment variables.
//!
//! Required: `STOREFRONT_DATABASE_URL` (or `DATABASE_URL`),
//! `STOREFRONT_BASE_URL`, `STOREFRONT_SESSION_SECRET`.
//! Optional: `STOREFRONT_HOST` (default 127.0.0.1), `STOREFRONT_PORT`
//! (default 3000), `SENTRY_DSN`, `SENTRY_ENVIRONMENT`.

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Session secrets shorter than this are rejected outright.
const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Minimum Shannon entropy (bits per character) for the session secret.
/// Random hex sits around 4.0; English prose around 2.6.
const MIN_SECRET_ENTROPY: f64 = 3.3;

/// Substrings that mark a secret as a copy-pasted placeholder.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "your-", "changeme", "replace", "placeholder", "example", "secret",
    "password", "xxx", "todo", "fixme", "insert", "enter-", "put-your",
    "add-your",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    pub database_url: SecretString,
    pub host: IpAddr,
    pub port: u16,
    /// Public base URL; an `https://` prefix turns on secure cookies.
    pub base_url: String,
    pub session_secret: SecretString,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from the environment, reading `.env` first if one
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is absent, a value
    /// fails to parse, or the session secret looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host: IpAddr = env_or("STOREFRONT_HOST", "127.0.0.1")
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".into(), e.to_string())
            })?;
        let port: u16 = env_or("STOREFRONT_PORT", "3000").parse().map_err(
            |e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".into(), e.to_string())
            },
        )?;

        Ok(Self {
            database_url: database_url()?,
            host,
            port,
            base_url: required_env("STOREFRONT_BASE_URL")?,
            session_secret: session_secret()?,
            sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            sentry_environment: std::env::var("SENTRY_ENVIRONMENT").ok(),
        })
    }

    /// The address the server binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS (controls cookie flags).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

fn required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.into()))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}

/// `STOREFRONT_DATABASE_URL`, falling back to the `DATABASE_URL` most
/// hosting providers inject.
fn database_url() -> Result<SecretString, ConfigError> {
    std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar("STOREFRONT_DATABASE_URL".into()))
}

fn session_secret() -> Result<SecretString, ConfigError> {
    const VAR: &str = "STOREFRONT_SESSION_SECRET";

    let value = required_env(VAR)?;
    check_secret_strength(&value, VAR)?;
    Ok(SecretString::from(value))
}

/// Reject secrets that are too short, look like placeholders, or have the
/// entropy of a keyboard mash rather than a generated value.
fn check_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.into(),
            format!(
                "must be at least {MIN_SESSION_SECRET_LENGTH} characters (got {})",
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    if let Some(marker) = PLACEHOLDER_MARKERS.iter().find(|m| lower.contains(**m)) {
        return Err(ConfigError::InsecureSecret(
            var_name.into(),
            format!("appears to be a placeholder (contains '{marker}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_SECRET_ENTROPY {
        return Err(ConfigError::InsecureSecret(
            var_name.into(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= \
                 {MIN_SECRET_ENTROPY:.1}); generate one with `openssl rand -hex 32`"
            ),
        ));
    }

    Ok(())
}

/// Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    let mut chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return 0.0;
    }
    chars.sort_unstable();

    #[allow(clippy::cast_precision_loss)] // secrets are far below 2^52 chars
    let len = chars.len() as f64;

    chars
        .chunk_by(|a, b| a == b)
        .map(|run| {
            #[allow(clippy::cast_precision_loss)]
            let p = run.len() as f64 / len;
            -p * p.log2()
        })
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_of_repeated_char_is_zero() {
        assert!(shannon_entropy("aaaaaaa").abs() < f64::EPSILON);
        assert!(shannon_entropy("").abs() < f64::EPSILON);
    }

    #[test]
    fn test_entropy_of_even_two_char_mix_is_one_bit() {
        assert!((shannon_entropy("abab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_secret_rejects_placeholder() {
        let err = check_secret_strength(
            "your-session-key-here-your-session-key",
            "TEST_VAR",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_secret_rejects_short_value() {
        assert!(check_secret_strength("short", "TEST_VAR").is_err());
    }

    #[test]
    fn test_secret_rejects_low_entropy() {
        assert!(
            check_secret_strength("ababababababababababababababababab", "TEST_VAR").is_err()
        );
    }

    #[test]
    fn test_secret_accepts_generated_value() {
        assert!(
            check_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6dE8", "TEST_VAR").is_ok()
        );
    }

    #[test]
    fn test_socket_addr_and_is_secure() {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/orchard"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "https://shop.example.net".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            sentry_dsn: None,
            sentry_environment: None,
        };

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(config.is_secure());
    }
}
