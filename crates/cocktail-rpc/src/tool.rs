use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::message::JsonRpcRequest;
use crate::TOOL_NAME;

/// Shown when a response carries no usable answer text.
pub const NO_TEXT_ANSWER: &str = "No text answer.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryArguments {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<TextContent>,
    #[serde(default)]
    pub is_error: bool,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self { content: vec![TextContent { kind: "text".to_string(), text: text.into() }], is_error: false }
    }
}

/// `tools/call` request asking the cocktail tool `query`.
pub fn tool_call_request(id: u64, query: &str) -> JsonRpcRequest {
    let params = serde_json::json!({ "name": TOOL_NAME, "arguments": { "query": query } });
    JsonRpcRequest::new(id, "tools/call", Some(params))
}

/// `result.content[0].text` of a JSON-RPC response, or [`NO_TEXT_ANSWER`].
pub fn answer_text(response: &Value) -> String {
    response
        .pointer("/result/content/0/text")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(NO_TEXT_ANSWER)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn answer_text_reads_first_content_item() {
        let v = json!({"jsonrpc": "2.0", "id": 1, "result": {"content": [{"type": "text", "text": "Shake well."}, {"type": "text", "text": "ignored"}]}});
        assert_eq!(answer_text(&v), "Shake well.");
    }

    #[test]
    fn answer_text_falls_back_when_missing_or_empty() {
        assert_eq!(answer_text(&json!({})), NO_TEXT_ANSWER);
        assert_eq!(answer_text(&json!({"result": {}})), NO_TEXT_ANSWER);
        assert_eq!(answer_text(&json!({"result": {"content": []}})), NO_TEXT_ANSWER);
        assert_eq!(answer_text(&json!({"result": {"content": [{"type": "text", "text": ""}]}})), NO_TEXT_ANSWER);
        assert_eq!(answer_text(&json!({"error": {"code": -32601, "message": "x"}})), NO_TEXT_ANSWER);
    }

    #[test]
    fn tool_call_request_has_expected_shape() {
        let req = tool_call_request(42, "What is in a Negroni?");
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({
            "jsonrpc": "2.0",
            "id": 42,
            "method": "tools/call",
            "params": {"name": "ask_cocktail_bot", "arguments": {"query": "What is in a Negroni?"}}
        }));
    }

    #[test]
    fn call_tool_result_serializes_camel_case() {
        let v = serde_json::to_value(CallToolResult::text("hi")).unwrap();
        assert_eq!(v, json!({"content": [{"type": "text", "text": "hi"}], "isError": false}));
    }
}
