//! Configuration module for the travel backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Access token for the bootstrap admin user (admin routes stay locked without one)
    pub admin_token: Option<String>,
    /// Path to the SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Allowed CORS origins; `None` allows any origin
    pub cors_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_token = env::var("TRAVEL_ADMIN_TOKEN").ok();

        let db_path = env::var("TRAVEL_DB_PATH")
            .unwrap_or_else(|_| "./data/travel.sqlite".to_string())
            .into();

        let bind_addr = env::var("TRAVEL_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid TRAVEL_BIND_ADDR format");

        let log_level = env::var("TRAVEL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("TRAVEL_CORS_ORIGINS").ok().and_then(|raw| {
            let origins: Vec<String> = raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        });

        Self {
            admin_token,
            db_path,
            bind_addr,
            log_level,
            cors_origins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("TRAVEL_ADMIN_TOKEN");
        env::remove_var("TRAVEL_DB_PATH");
        env::remove_var("TRAVEL_BIND_ADDR");
        env::remove_var("TRAVEL_LOG_LEVEL");
        env::remove_var("TRAVEL_CORS_ORIGINS");

        let config = Config::from_env();

        assert!(config.admin_token.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/travel.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert!(config.cors_origins.is_none());

        env::set_var(
            "TRAVEL_CORS_ORIGINS",
            "http://localhost:3000, https://localhost:3443",
        );
        let config = Config::from_env();
        assert_eq!(
            config.cors_origins,
            Some(vec![
                "http://localhost:3000".to_string(),
                "https://localhost:3443".to_string(),
            ])
        );
        env::remove_var("TRAVEL_CORS_ORIGINS");
    }
}
