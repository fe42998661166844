//! Server configuration for the product search endpoint.
//!
//! This module provides configuration types for the server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AISLE_SERVER_PORT` | 8080 | Server port |
//! | `AISLE_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `AISLE_LOG_LEVEL` | info | Log level |
//! | `AISLE_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `AISLE_ENABLE_CORS` | true | Enable CORS |
//! | `AISLE_CORS_ORIGINS` | * | Allowed origins |
//! | `AISLE_CORS_METHODS` | GET,POST,OPTIONS | Allowed methods |
//! | `AISLE_CORS_HEADERS` | Content-Type,Accept | Allowed headers |
//! | `AISLE_SEARCH_NODES` | http://localhost:9200 | Search engine node URLs (comma-separated) |
//! | `AISLE_SEARCH_INDEX` | bbuy_products | Product index |
//! | `AISLE_SEARCH_USERNAME` | - | Basic auth username |
//! | `AISLE_SEARCH_PASSWORD` | - | Basic auth password |
//! | `AISLE_SEARCH_TIMEOUT_MS` | 30000 | Search request timeout (milliseconds) |
//! | `AISLE_SEARCH_INSECURE` | false | Skip TLS certificate validation |
//! | `AISLE_FILTER_POLICY` | lenient | `lenient` drops unknown filter kinds, `strict` rejects the request |
//!
//! # Example
//!
//! ```rust
//! use aisle_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env().unwrap();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! ```

use aisle_search::{DEFAULT_PRODUCT_INDEX, FilterPolicy};
use clap::Parser;

/// Server configuration for the product search endpoint.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "aisle")]
#[command(about = "Faceted product search server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "AISLE_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "AISLE_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "AISLE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "AISLE_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "AISLE_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "AISLE_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "AISLE_CORS_METHODS", default_value = "GET,POST,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "AISLE_CORS_HEADERS",
        default_value = "Content-Type,Accept"
    )]
    pub cors_headers: String,

    /// Search engine node URLs (comma-separated).
    #[arg(
        long,
        env = "AISLE_SEARCH_NODES",
        default_value = "http://localhost:9200"
    )]
    pub search_nodes: String,

    /// Index holding the product documents.
    #[arg(
        long,
        env = "AISLE_SEARCH_INDEX",
        default_value = DEFAULT_PRODUCT_INDEX
    )]
    pub search_index: String,

    /// Username for search engine basic auth.
    #[arg(long, env = "AISLE_SEARCH_USERNAME")]
    pub search_username: Option<String>,

    /// Password for search engine basic auth.
    #[arg(long, env = "AISLE_SEARCH_PASSWORD")]
    pub search_password: Option<String>,

    /// Search request timeout in milliseconds.
    #[arg(long, env = "AISLE_SEARCH_TIMEOUT_MS", default_value = "30000")]
    pub search_timeout_ms: u64,

    /// Skip TLS certificate validation for the search engine.
    #[arg(long, env = "AISLE_SEARCH_INSECURE", default_value = "false")]
    pub search_insecure: bool,

    /// Handling of filters with an unrecognized kind (lenient or strict).
    #[arg(long, env = "AISLE_FILTER_POLICY", default_value = "lenient")]
    pub filter_policy: FilterPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept".to_string(),
            search_nodes: "http://localhost:9200".to_string(),
            search_index: DEFAULT_PRODUCT_INDEX.to_string(),
            search_username: None,
            search_password: None,
            search_timeout_ms: 30000,
            search_insecure: false,
            filter_policy: FilterPolicy::Lenient,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// Command line arguments are ignored; unset variables take their
    /// defaults and a malformed value is an error.
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::try_parse_from(["aisle"])
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the search node URLs, trimmed, without empty entries.
    pub fn search_node_list(&self) -> Vec<String> {
        self.search_nodes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.search_node_list().is_empty() {
            errors.push("At least one search node is required".to_string());
        }

        if self.search_index.trim().is_empty() {
            errors.push("Search index cannot be empty".to_string());
        }

        if self.search_username.is_some() != self.search_password.is_some() {
            errors.push(
                "Search username and password must be set together".to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            search_index: "test_products".to_string(),
            search_timeout_ms: 1000,
            ..Default::default()
        }
    }
}
