//! cocktail-rpc
//!
//! Wire types shared by the cocktail server and client: JSON-RPC 2.0
//! envelopes, the `tools/call` payloads and the SSE line classification the
//! client uses while reading a streamed response.
pub mod message;
pub mod sse;
pub mod tool;

pub use message::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
pub use sse::SseLine;
pub use tool::{answer_text, tool_call_request, CallToolParams, CallToolResult, QueryArguments, TextContent, NO_TEXT_ANSWER};

/// Name of the single tool the server exposes.
pub const TOOL_NAME: &str = "ask_cocktail_bot";

/// MCP protocol revision announced by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
