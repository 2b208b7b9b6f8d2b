//! Server configuration, read from the environment (after `.env` is loaded).

use axum::http::HeaderValue;
use std::net::SocketAddr;

use crate::db::DbConfig;
use crate::logging::config::LoggingConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<HeaderValue>,
    pub logging: LoggingConfig,
    /// `None` runs the service on the in-memory store.
    pub database: Option<DbConfig>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3001),
            allowed_origins: allowed_origins_from_env(),
            logging: LoggingConfig::from_env(),
            database: DbConfig::from_env(),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// ALLOWED_ORIGINS (comma-separated) wins over FRONTEND_ORIGIN; with
/// neither set, the local dev frontend is allowed.
fn allowed_origins_from_env() -> Vec<HeaderValue> {
    std::env::var("ALLOWED_ORIGINS")
        .ok()
        .map(|s| parse_origins(&s))
        .filter(|origins| !origins.is_empty())
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ]
        })
}

fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_skips_blanks() {
        let origins = parse_origins("https://a.example, ,https://b.example");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://a.example");
        assert_eq!(origins[1], "https://b.example");
    }

    #[test]
    fn test_socket_addr_from_host_and_port() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: Vec::new(),
            logging: LoggingConfig::from_env(),
            database: None,
        };
        assert_eq!(config.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_bad_host_is_rejected() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            port: 8080,
            allowed_origins: Vec::new(),
            logging: LoggingConfig::from_env(),
            database: None,
        };
        assert!(config.socket_addr().is_err());
    }
}
