//! Aisle
//!
//! Faceted product search over an Elasticsearch-compatible cluster.

use aisle_rest::{ServerConfig, create_app_with_config, init_logging};
use clap::Parser;
use tracing::info;

#[cfg(feature = "elasticsearch")]
use aisle_search::backend::{ElasticsearchAuth, ElasticsearchClient, ElasticsearchConfig};

/// Builds the search client from the server configuration.
#[cfg(feature = "elasticsearch")]
fn create_search_client(config: &ServerConfig) -> anyhow::Result<ElasticsearchClient> {
    let auth = match (&config.search_username, &config.search_password) {
        (Some(username), Some(password)) => Some(ElasticsearchAuth::Basic {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    let es_config = ElasticsearchConfig {
        nodes: config.search_node_list(),
        request_timeout_ms: config.search_timeout_ms,
        auth,
        disable_certificate_validation: config.search_insecure,
    };

    info!(
        nodes = ?es_config.nodes,
        index = %config.search_index,
        "Initializing search client"
    );

    Ok(ElasticsearchClient::new(es_config)?)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        filter_policy = %config.filter_policy,
        "Starting Aisle search server"
    );

    start(config).await
}

#[cfg(feature = "elasticsearch")]
async fn start(config: ServerConfig) -> anyhow::Result<()> {
    let client = create_search_client(&config)?;
    let app = create_app_with_config(client, config.clone());
    serve(app, &config).await
}

/// Fallback when no search client is compiled in.
#[cfg(not(feature = "elasticsearch"))]
async fn start(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "No search client available. \
         Build with: cargo build -p aisle-server --features elasticsearch"
    )
}
