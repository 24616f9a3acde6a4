//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment
//! variables into a type-safe struct; the protected-route list travels as a
//! JSON value inside a single variable because it is a nested structure.

use serde::Deserialize;

use crate::error::ConfigError;

/// One protected-route rule as supplied by configuration.
///
/// `path` may contain `{name}`-wrapped parameter segments. Exactly one
/// extraction policy is active per rule: header-based if `header_key` is
/// non-empty, otherwise form-based with `form_key` (defaulting to
/// `cf-turnstile-response`).
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    pub method: String,

    pub path: String,

    #[serde(default)]
    pub header_key: Option<String>,

    #[serde(default)]
    pub form_key: Option<String>,
}

/// Environment shape as `envy` sees it. `PROTECTED_ROUTES` arrives as a raw
/// JSON string and is parsed separately in [`Config::from_env`].
#[derive(Debug, Deserialize)]
struct RawConfig {
    turnstile_secret: String,

    #[serde(default = "default_port")]
    server_port: u16,

    #[serde(default = "default_verify_url")]
    verify_url: String,

    #[serde(default = "default_verify_timeout_secs")]
    verify_timeout_secs: u64,

    protected_routes: Option<String>,
}

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `TURNSTILE_SECRET` (required): shared secret for the verification endpoint
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `VERIFY_URL` (optional): verification endpoint, defaults to the
///   Cloudflare siteverify URL
/// - `VERIFY_TIMEOUT_SECS` (optional): outbound verification timeout,
///   defaults to 10
/// - `PROTECTED_ROUTES` (optional): JSON array of rules, e.g.
///   `[{"method":"POST","path":"/api/login"}]`; defaults to empty
#[derive(Debug, Clone)]
pub struct Config {
    pub turnstile_secret: String,

    pub server_port: u16,

    pub verify_url: String,

    pub verify_timeout_secs: u64,

    pub protected_routes: Vec<RouteConfig>,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

/// Default verification endpoint if VERIFY_URL is not set.
fn default_verify_url() -> String {
    "https://challenges.cloudflare.com/turnstile/v0/siteverify".to_string()
}

/// Default outbound timeout if VERIFY_TIMEOUT_SECS is not set.
fn default_verify_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables, and finally parses the
    /// protected-route list out of `PROTECTED_ROUTES`.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing, if a
    /// value cannot be parsed into its expected type, or if
    /// `PROTECTED_ROUTES` is not a valid JSON rule list.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        let raw = envy::from_env::<RawConfig>()?;

        let protected_routes = match raw.protected_routes.as_deref() {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(json)?,
            _ => Vec::new(),
        };

        Ok(Config {
            turnstile_secret: raw.turnstile_secret,
            server_port: raw.server_port,
            verify_url: raw.verify_url,
            verify_timeout_secs: raw.verify_timeout_secs,
            protected_routes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_list_parses_from_json() {
        let routes: Vec<RouteConfig> = serde_json::from_str(
            r#"[
                {"method": "POST", "path": "/api/login"},
                {"method": "GET", "path": "/api/identity/{token}", "header_key": "x-turnstile-token"}
            ]"#,
        )
        .unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].method, "POST");
        assert!(routes[0].header_key.is_none());
        assert_eq!(routes[1].header_key.as_deref(), Some("x-turnstile-token"));
    }

    #[test]
    fn malformed_route_list_is_rejected() {
        let result = serde_json::from_str::<Vec<RouteConfig>>(r#"[{"method": "POST"}]"#);

        assert!(result.is_err());
    }
}
