//! Elasticsearch-compatible search client.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use elasticsearch::auth::Credentials;
use elasticsearch::cert::CertificateValidation;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::{Elasticsearch, SearchParts};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{SearchError, SearchResult};
use crate::query::SearchRequestDoc;

use super::SearchBackend;

const BACKEND_NAME: &str = "elasticsearch";

/// Authentication configuration for the search engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ElasticsearchAuth {
    /// Basic username/password authentication.
    Basic {
        /// The username for basic auth.
        username: String,
        /// The password for basic auth.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The bearer token.
        token: String,
    },
}

/// Configuration for the search client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticsearchConfig {
    /// Node URLs (e.g., `["http://localhost:9200"]`).
    /// Currently uses the first node (single-node connection pool).
    pub nodes: Vec<String>,

    /// Request timeout in milliseconds (default: 30000).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Optional authentication.
    #[serde(default)]
    pub auth: Option<ElasticsearchAuth>,

    /// Whether to disable certificate validation (default: false).
    /// Only use for development/testing.
    #[serde(default)]
    pub disable_certificate_validation: bool,
}

fn default_request_timeout_ms() -> u64 {
    30000
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            nodes: vec!["http://localhost:9200".to_string()],
            request_timeout_ms: default_request_timeout_ms(),
            auth: None,
            disable_certificate_validation: false,
        }
    }
}

/// Search client for Elasticsearch and OpenSearch clusters.
///
/// Built once at startup and shared by every request.
pub struct ElasticsearchClient {
    client: Elasticsearch,
    config: ElasticsearchConfig,
}

impl Debug for ElasticsearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchClient")
            .field("nodes", &self.config.nodes)
            .finish_non_exhaustive()
    }
}

impl ElasticsearchClient {
    /// Creates a new client with the given configuration.
    ///
    /// No request is sent; an unreachable cluster surfaces on the first search.
    pub fn new(config: ElasticsearchConfig) -> SearchResult<Self> {
        let client = Self::build_client(&config)?;
        Ok(Self { client, config })
    }

    fn build_client(config: &ElasticsearchConfig) -> SearchResult<Elasticsearch> {
        let url = config
            .nodes
            .first()
            .cloned()
            .unwrap_or_else(|| "http://localhost:9200".to_string());

        let parsed_url: elasticsearch::http::Url =
            url.parse().map_err(|e| SearchError::ConnectionFailed {
                backend_name: BACKEND_NAME.to_string(),
                message: format!("Invalid URL '{}': {}", url, e),
            })?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);

        let mut builder = TransportBuilder::new(conn_pool)
            .timeout(Duration::from_millis(config.request_timeout_ms));

        if config.disable_certificate_validation {
            builder = builder.cert_validation(CertificateValidation::None);
        }

        if let Some(ref auth) = config.auth {
            builder = match auth {
                ElasticsearchAuth::Basic { username, password } => {
                    builder.auth(Credentials::Basic(username.clone(), password.clone()))
                }
                ElasticsearchAuth::Bearer { token } => {
                    builder.auth(Credentials::Bearer(token.clone()))
                }
            };
        }

        let transport = builder.build().map_err(|e| SearchError::ConnectionFailed {
            backend_name: BACKEND_NAME.to_string(),
            message: format!("Failed to build transport: {}", e),
        })?;

        Ok(Elasticsearch::new(transport))
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ElasticsearchConfig {
        &self.config
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchClient {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn search(&self, index: &str, request: &SearchRequestDoc) -> SearchResult<Value> {
        debug!(index = %index, "Sending search request");

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(request.body().clone())
            .send()
            .await
            .map_err(|e| SearchError::Unavailable {
                message: e.to_string(),
            })?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::QueryFailed {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::InvalidResponse {
                message: e.to_string(),
            })
    }

    async fn ping(&self) -> SearchResult<()> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchError::Unavailable {
                message: e.to_string(),
            })?;

        if response.status_code().is_success() {
            Ok(())
        } else {
            Err(SearchError::Unavailable {
                message: format!("ping returned status {}", response.status_code().as_u16()),
            })
        }
    }
}
