//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Server
//! - `KIOSK_HOST` - Bind address (default: 0.0.0.0)
//! - `KIOSK_PORT` - Listen port (default: 3000)
//!
//! ## Database
//! - `KIOSK_DB_URL` - SurrealDB WebSocket address (default: 127.0.0.1:8000)
//! - `KIOSK_DB_NAMESPACE` / `KIOSK_DB_DATABASE` (default: kiosk / main)
//! - `KIOSK_DB_USERNAME` / `KIOSK_DB_PASSWORD` (default: root / root)
//!
//! ## Behaviour
//! - `KIOSK_ORDER_TRACKING` - `status` (default) or `completion-toggle`
//! - `KIOSK_STRICT_ORDER_TRANSITIONS` - enforce the order status machine
//!   (default: false)
//! - `KIOSK_CATALOG_DECODE` - `lenient` (default) or `strict`
//!
//! ## Admin login bypass (test fixture, off by default)
//! - `KIOSK_ENABLE_ADMIN_BYPASS` - default false
//! - `KIOSK_ADMIN_EMAIL` / `KIOSK_ADMIN_PASSWORD` - required when enabled
//! - `KIOSK_ADMIN_USERNAME` - default `admin`

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use kiosk_core::models::order::OrderTracking;
use kiosk_core::models::user::AdminBypass;
use kiosk_db::{DbConfig, DecodePolicy};
use kiosk_service::OrderServiceConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Everything the server needs to start, built once in `main`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub db: DbConfig,
    pub order_tracking: OrderTracking,
    pub orders: OrderServiceConfig,
    pub catalog_decode: DecodePolicy,
    pub admin_bypass: Option<AdminBypass>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            db: DbConfig::default(),
            order_tracking: OrderTracking::default(),
            orders: OrderServiceConfig::default(),
            catalog_decode: DecodePolicy::default(),
            admin_bypass: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);
        let defaults = Self::default();
        let default_db = DbConfig::default();

        let admin_bypass = if env.parse_or("KIOSK_ENABLE_ADMIN_BYPASS", false)? {
            Some(AdminBypass {
                email: env.required("KIOSK_ADMIN_EMAIL")?,
                password: env.required("KIOSK_ADMIN_PASSWORD")?,
                user_id: "admin".into(),
                username: env.or("KIOSK_ADMIN_USERNAME", "admin"),
            })
        } else {
            None
        };

        Ok(Self {
            host: env.parse_or("KIOSK_HOST", defaults.host)?,
            port: env.parse_or("KIOSK_PORT", defaults.port)?,
            db: DbConfig {
                url: env.or("KIOSK_DB_URL", &default_db.url),
                namespace: env.or("KIOSK_DB_NAMESPACE", &default_db.namespace),
                database: env.or("KIOSK_DB_DATABASE", &default_db.database),
                username: env.or("KIOSK_DB_USERNAME", &default_db.username),
                password: env.or("KIOSK_DB_PASSWORD", &default_db.password),
            },
            order_tracking: env.parse_or("KIOSK_ORDER_TRACKING", defaults.order_tracking)?,
            orders: OrderServiceConfig {
                strict_transitions: env.parse_or("KIOSK_STRICT_ORDER_TRANSITIONS", false)?,
            },
            catalog_decode: env.parse_or("KIOSK_CATALOG_DECODE", defaults.catalog_decode)?,
            admin_bypass,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.db.url, "127.0.0.1:8000");
        assert_eq!(config.db.namespace, "kiosk");
        assert_eq!(config.order_tracking, OrderTracking::Status);
        assert!(!config.orders.strict_transitions);
        assert_eq!(config.catalog_decode, DecodePolicy::Lenient);
        assert!(config.admin_bypass.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("KIOSK_PORT", "8080"),
            ("KIOSK_DB_DATABASE", "shop"),
            ("KIOSK_ORDER_TRACKING", "completion-toggle"),
            ("KIOSK_STRICT_ORDER_TRANSITIONS", "true"),
            ("KIOSK_CATALOG_DECODE", "strict"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.db.database, "shop");
        assert_eq!(config.order_tracking, OrderTracking::CompletionToggle);
        assert!(config.orders.strict_transitions);
        assert_eq!(config.catalog_decode, DecodePolicy::Strict);
    }

    #[test]
    fn invalid_values_are_reported_by_name() {
        let err = load(&[("KIOSK_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "KIOSK_PORT"));

        let err = load(&[("KIOSK_CATALOG_DECODE", "loose")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "KIOSK_CATALOG_DECODE"));
    }

    #[test]
    fn admin_bypass_needs_credentials() {
        let err = load(&[("KIOSK_ENABLE_ADMIN_BYPASS", "true")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingEnvVar("KIOSK_ADMIN_EMAIL".into())
        );

        let config = load(&[
            ("KIOSK_ENABLE_ADMIN_BYPASS", "true"),
            ("KIOSK_ADMIN_EMAIL", "ops@example.com"),
            ("KIOSK_ADMIN_PASSWORD", "fixture"),
        ])
        .unwrap();
        let bypass = config.admin_bypass.unwrap();
        assert!(bypass.matches("ops@example.com", "fixture"));
        assert_eq!(bypass.username, "admin");
    }

    #[test]
    fn bypass_credentials_ignored_when_disabled() {
        let config = load(&[
            ("KIOSK_ADMIN_EMAIL", "ops@example.com"),
            ("KIOSK_ADMIN_PASSWORD", "fixture"),
        ])
        .unwrap();
        assert!(config.admin_bypass.is_none());
    }
}
