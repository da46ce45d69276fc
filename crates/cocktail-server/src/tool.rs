use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{error, info};

use cocktail_core::traits::Chain;
use cocktail_rpc::TOOL_NAME;

pub const TOOL_DESCRIPTION: &str = "Answers questions about cocktails using the local RAG database.";

/// `tools/list` entry for the cocktail tool.
pub fn tool_definition() -> Value {
    json!({
        "name": TOOL_NAME,
        "description": TOOL_DESCRIPTION,
        "inputSchema": {
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "The user's full question." }
            },
            "required": ["query"]
        }
    })
}

/// Runs the chain for `query` on a blocking worker. Failures come back as
/// answer text, never as an error.
pub async fn ask_cocktail_bot(chain: Arc<dyn Chain>, query: String) -> String {
    info!(%query, "tool query received");
    match tokio::task::spawn_blocking(move || chain.invoke(&query)).await {
        Ok(Ok(answer)) => {
            info!(%answer, "tool answer ready");
            answer
        }
        Ok(Err(e)) => {
            error!(error = %e, "chain failed");
            format!("Server error: {e}")
        }
        Err(e) => {
            error!(error = %e, "chain worker did not finish");
            format!("Server error: {e}")
        }
    }
}
