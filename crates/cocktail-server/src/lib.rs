//! cocktail-server
//!
//! Stateless MCP-style tool server. One `POST` endpoint accepts JSON-RPC
//! requests; `tools/call` on `ask_cocktail_bot` runs the RAG chain on a
//! blocking worker and answers either as an SSE stream (with `: ping`
//! keep-alives while the model works) or as a plain JSON body.
use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use cocktail_core::config::ServerConfig;
use cocktail_core::traits::Chain;

mod handlers;
pub mod tool;

pub use tool::ask_cocktail_bot;

/// Routing instructions handed to MCP clients by `initialize`.
pub const INSTRUCTIONS: &str = "Your role is ONLY to route questions. You have no knowledge of your own. \
You are a simple bot that forwards questions to specialised systems. \
NEVER answer the user's question directly. \
For ALL user questions, regardless of topic, you MUST use the 'ask_cocktail_bot' tool. \
Pass the question on EXACTLY as you received it.";

#[derive(Clone)]
pub struct ServerState {
    pub chain: Arc<dyn Chain>,
    pub config: Arc<ServerConfig>,
}

impl ServerState {
    pub fn new(chain: Arc<dyn Chain>, config: ServerConfig) -> Self { Self { chain, config: Arc::new(config) } }
}

pub fn create_router(state: ServerState) -> Router {
    let path = state.config.path.clone();
    Router::new()
        .route(&path, post(handlers::handle_rpc))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `server.host:server.port` and serves until the process is stopped.
pub async fn start_server(state: ServerState) -> anyhow::Result<()> {
    let address = state.config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", address, e))?;
    info!(name = %state.config.name, "listening on http://{}{}", address, state.config.path);
    axum::serve(listener, create_router(state)).await.map_err(|e| anyhow::anyhow!("Server error: {}", e))?;
    Ok(())
}
