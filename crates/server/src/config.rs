//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `TICKETS_HOST` - Bind address (default: 127.0.0.1)
//! - `TICKETS_PORT` - Listen port (default: 3000)
//! - `TICKETS_IDENTITY_COOKIE` - Identity cookie name (default: `UserGUID`)
//! - `TICKETS_COLLECTION_PREFIX` - Collection cookie prefix (default: `TicketsList`)
//! - `TICKETS_COOKIE_TTL_DAYS` - Cookie lifetime in days (default: 7)
//! - `TICKETS_COOKIE_SECURE` - Mark cookies `Secure` (default: false)
//! - `TICKETS_MALFORMED_STATE` - `reject` or `discard` (default: reject)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// What to do when a client presents a collection cookie that does not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedStatePolicy {
    /// Fail the request and expire the corrupt cookie.
    #[default]
    Reject,
    /// Log a warning and continue with an empty collection.
    Discard,
}

impl FromStr for MalformedStatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "discard" => Ok(Self::Discard),
            other => Err(format!("expected 'reject' or 'discard', got '{other}'")),
        }
    }
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct TicketsConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Client-held storage settings
    pub cookies: CookieConfig,
    /// Handling of undecodable collection cookies
    pub malformed_state: MalformedStatePolicy,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
}

/// Names and attributes of the cookies that hold client state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    /// Cookie holding the client identity
    pub identity_name: String,
    /// Prefix of the per-identity collection cookie (`{prefix}_{identity}`)
    pub collection_prefix: String,
    /// Lifetime of every cookie written, in days
    pub ttl_days: i64,
    /// Whether cookies carry the `Secure` attribute
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            identity_name: "UserGUID".to_string(),
            collection_prefix: "TicketsList".to_string(),
            ttl_days: 7,
            secure: false,
        }
    }
}

impl Default for TicketsConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            cookies: CookieConfig::default(),
            malformed_state: MalformedStatePolicy::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl TicketsConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        Ok(Self {
            host: get_parsed_or("TICKETS_HOST", defaults.host)?,
            port: get_parsed_or("TICKETS_PORT", defaults.port)?,
            cookies: CookieConfig::from_env()?,
            malformed_state: get_parsed_or("TICKETS_MALFORMED_STATE", defaults.malformed_state)?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CookieConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let ttl_days: i64 = get_parsed_or("TICKETS_COOKIE_TTL_DAYS", defaults.ttl_days)?;
        if ttl_days <= 0 {
            return Err(ConfigError::InvalidEnvVar(
                "TICKETS_COOKIE_TTL_DAYS".to_string(),
                format!("must be positive (got {ttl_days})"),
            ));
        }

        Ok(Self {
            identity_name: get_non_empty_or("TICKETS_IDENTITY_COOKIE", &defaults.identity_name)?,
            collection_prefix: get_non_empty_or(
                "TICKETS_COLLECTION_PREFIX",
                &defaults.collection_prefix,
            )?,
            ttl_days,
            secure: get_parsed_or("TICKETS_COOKIE_SECURE", defaults.secure)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get a non-empty string variable, falling back to a default when unset.
fn get_non_empty_or(key: &str, default: &str) -> Result<String, ConfigError> {
    match get_optional_env(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        Some(value) => Ok(value),
        None => Ok(default.to_string()),
    }
}

/// Parse a variable, falling back to a default when unset.
fn get_parsed_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

/// Parse a raw variable value, naming the variable in the error.
fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_cookie_contract() {
        let config = TicketsConfig::default();
        assert_eq!(config.cookies.identity_name, "UserGUID");
        assert_eq!(config.cookies.collection_prefix, "TicketsList");
        assert_eq!(config.cookies.ttl_days, 7);
        assert!(!config.cookies.secure);
        assert_eq!(config.malformed_state, MalformedStatePolicy::Reject);
    }

    #[test]
    fn test_socket_addr() {
        let config = TicketsConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            ..TicketsConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_malformed_state_policy_parse() {
        assert_eq!(
            "reject".parse::<MalformedStatePolicy>(),
            Ok(MalformedStatePolicy::Reject)
        );
        assert_eq!(
            " Discard ".parse::<MalformedStatePolicy>(),
            Ok(MalformedStatePolicy::Discard)
        );
        assert!("ignore".parse::<MalformedStatePolicy>().is_err());
    }

    #[test]
    fn test_parse_value_reports_variable() {
        let err = parse_value::<u16>("TICKETS_PORT", "not-a-port").unwrap_err();
        let ConfigError::InvalidEnvVar(key, _) = err;
        assert_eq!(key, "TICKETS_PORT");
    }

    #[test]
    fn test_parse_value_trims() {
        assert!(parse_value::<bool>("TICKETS_COOKIE_SECURE", " true ").unwrap());
        assert_eq!(parse_value::<i64>("TICKETS_COOKIE_TTL_DAYS", "14").unwrap(), 14);
    }
}
