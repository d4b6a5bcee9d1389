//! Server configuration.

use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub addr: SocketAddr,

    /// HS256 secret for bearer tokens
    pub jwt_secret: String,

    /// MongoDB connection string; the in-memory store is used when unset
    pub mongodb_uri: Option<String>,

    /// Database holding the users, products and productreviews collections
    pub mongodb_database: String,

    /// Default log filter
    pub log_level: String,

    /// Emit JSON log lines
    pub log_json: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let ip: IpAddr = host.parse().map_err(|_| ConfigError::InvalidValue {
            name: "HOST",
            value: host.clone(),
        })?;

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw,
            })?,
            None => 8000,
        };

        let log_json = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => false,
            Some("json") => true,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            addr: SocketAddr::new(ip, port),
            jwt_secret: lookup("JWT_SECRET").unwrap_or_else(|| "change-me".to_string()),
            mongodb_uri: lookup("MONGODB_URI").filter(|uri| !uri.is_empty()),
            mongodb_database: lookup("MONGODB_DATABASE")
                .unwrap_or_else(|| "ecommerce".to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json,
        })
    }
}
