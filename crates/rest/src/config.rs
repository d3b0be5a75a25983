//! Server configuration for the hospital records API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HOSPITAL_SERVER_PORT` | 8080 | Server port |
//! | `HOSPITAL_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `HOSPITAL_LOG_LEVEL` | info | Log level |
//! | `HOSPITAL_MAX_BODY_SIZE` | 1048576 | Max request body (bytes) |
//! | `HOSPITAL_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `HOSPITAL_ENABLE_CORS` | true | Enable CORS |
//! | `HOSPITAL_CORS_ORIGINS` | * | Allowed origins |
//! | `HOSPITAL_CORS_METHODS` | GET,POST,PUT,PATCH,DELETE,OPTIONS | Allowed methods |
//! | `HOSPITAL_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `HOSPITAL_BASE_URL` | http://localhost:8080 | Server base URL |
//! | `HOSPITAL_DATABASE_URL` | hospital.db | SQLite file, or `:memory:` |
//! | `HOSPITAL_DB_MAX_CONNECTIONS` | 10 | Connection pool size |
//! | `HOSPITAL_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//!
//! # Example
//!
//! ```rust
//! use clap::Parser;
//! use hospital_rest::ServerConfig;
//!
//! // Parse flags, falling back to HOSPITAL_* variables and then defaults
//! let config = ServerConfig::try_parse_from(["hospital", "--port", "9000"]).unwrap();
//! assert_eq!(config.port, 9000);
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     enable_cors: true,
//!     ..Default::default()
//! };
//! ```

use clap::Parser;
use url::Url;

/// Server configuration for the hospital records API.
///
/// This struct is parsed from command line arguments and `HOSPITAL_*`
/// environment variables using [`ServerConfig::parse`], or built programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "hospital")]
#[command(about = "Hospital records server: doctors and patients over JSON HTTP")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "HOSPITAL_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "HOSPITAL_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "HOSPITAL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "HOSPITAL_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "HOSPITAL_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "HOSPITAL_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "HOSPITAL_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "HOSPITAL_CORS_METHODS",
        default_value = "GET,POST,PUT,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "HOSPITAL_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Base URL for the server (used in Location headers).
    #[arg(long, env = "HOSPITAL_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// SQLite database file, or `:memory:`.
    #[arg(long, env = "HOSPITAL_DATABASE_URL", default_value = "hospital.db")]
    pub database_url: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "HOSPITAL_DB_MAX_CONNECTIONS", default_value = "10")]
    pub db_max_connections: u32,

    /// Enable request ID tracking.
    #[arg(long, env = "HOSPITAL_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1024 * 1024, // 1MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            base_url: "http://localhost:8080".to_string(),
            database_url: "hospital.db".to_string(),
            db_max_connections: 10,
            enable_request_id: true,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns whether the database lives in memory only.
    pub fn is_memory_database(&self) -> bool {
        self.database_url == ":memory:"
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.db_max_connections == 0 {
            errors.push("Database pool size cannot be 0".to_string());
        }

        if self.database_url.trim().is_empty() {
            errors.push("Database URL cannot be empty".to_string());
        }

        if let Err(e) = Url::parse(&self.base_url) {
            errors.push(format!("Invalid base URL '{}': {}", self.base_url, e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, an in-memory database, and disables
    /// features that might interfere with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            base_url: "http://localhost:8080".to_string(),
            database_url: ":memory:".to_string(),
            db_max_connections: 1,
            enable_request_id: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.database_url, "hospital.db");
        assert!(config.enable_cors);
    }

    #[test]
    fn test_clap_defaults_match_default_impl() {
        let parsed = ServerConfig::try_parse_from(["hospital"]).unwrap();
        let default = ServerConfig::default();
        assert_eq!(parsed.max_body_size, default.max_body_size);
        assert_eq!(parsed.db_max_connections, default.db_max_connections);
        assert_eq!(parsed.base_url, default.base_url);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = ServerConfig {
            base_url: "https://records.example.org/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "https://records.example.org");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = ServerConfig {
            max_body_size: 0,
            db_max_connections: 0,
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.contains("base URL")));
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert!(config.is_memory_database());
    }
}
