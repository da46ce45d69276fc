use std::convert::Infallible;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use serde_json::{json, Value};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use cocktail_rpc::{
    CallToolParams, CallToolResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, QueryArguments, PROTOCOL_VERSION,
    TOOL_NAME,
};

use crate::tool::{ask_cocktail_bot, tool_definition};
use crate::{ServerState, INSTRUCTIONS};

pub(crate) async fn handle_rpc(State(state): State<ServerState>, headers: HeaderMap, body: Bytes) -> Response {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "unparsable request body");
            let resp = JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e));
            return (StatusCode::BAD_REQUEST, Json(resp)).into_response();
        }
    };
    let request: JsonRpcRequest = match serde_json::from_value(raw.clone()) {
        Ok(r) => r,
        Err(e) => {
            let id = raw.get("id").cloned().unwrap_or(Value::Null);
            return respond(&headers, &state, JsonRpcResponse::failure(id, JsonRpcError::invalid_request(e)));
        }
    };
    if request.is_notification() {
        debug!(method = %request.method, "notification accepted");
        return StatusCode::ACCEPTED.into_response();
    }

    if wants_event_stream(&headers) {
        let pings = keep_alive(&state);
        let (tx, rx) = tokio::sync::mpsc::channel::<Result<Event, Infallible>>(1);
        tokio::spawn(async move {
            let response = dispatch(&state, request).await;
            let _ = tx.send(Ok(Event::default().event("message").data(encode(&response)))).await;
        });
        Sse::new(ReceiverStream::new(rx)).keep_alive(pings).into_response()
    } else {
        Json(dispatch(&state, request).await).into_response()
    }
}

fn respond(headers: &HeaderMap, state: &ServerState, response: JsonRpcResponse) -> Response {
    if !wants_event_stream(headers) { return Json(response).into_response(); }
    let event = Event::default().event("message").data(encode(&response));
    let stream = tokio_stream::once(Ok::<_, Infallible>(event));
    Sse::new(stream).keep_alive(keep_alive(state)).into_response()
}

fn keep_alive(state: &ServerState) -> KeepAlive {
    KeepAlive::new().interval(Duration::from_secs(state.config.keep_alive_secs.max(1))).text("ping")
}

fn wants_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains("text/event-stream"))
}

fn encode(response: &JsonRpcResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32603, "message": format!("Internal error: {e}")}}).to_string()
    })
}

async fn dispatch(state: &ServerState, request: JsonRpcRequest) -> JsonRpcResponse {
    let id = request.id.clone().unwrap_or(Value::Null);
    debug!(method = %request.method, %id, "dispatching");
    match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(id, initialize_result(state)),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": [tool_definition()] })),
        "tools/call" => match parse_query(request.params) {
            Ok(query) => {
                let answer = ask_cocktail_bot(state.chain.clone(), query).await;
                match serde_json::to_value(CallToolResult::text(answer)) {
                    Ok(result) => JsonRpcResponse::success(id, result),
                    Err(e) => JsonRpcResponse::failure(id, JsonRpcError::internal(e)),
                }
            }
            Err(e) => JsonRpcResponse::failure(id, e),
        },
        other => JsonRpcResponse::failure(id, JsonRpcError::method_not_found(other)),
    }
}

fn initialize_result(state: &ServerState) -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": { "name": state.config.name, "version": env!("CARGO_PKG_VERSION") },
        "instructions": INSTRUCTIONS,
    })
}

fn parse_query(params: Option<Value>) -> Result<String, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null)).map_err(JsonRpcError::invalid_params)?;
    if params.name != TOOL_NAME { return Err(JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name))); }
    let args: QueryArguments = serde_json::from_value(params.arguments).map_err(JsonRpcError::invalid_params)?;
    Ok(args.query)
}
