use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tracing::debug;

use cocktail_core::config::LlmConfig;
use cocktail_core::traits::Generator;

use crate::error::LlmError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: usize,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completion server such as LM Studio.
///
/// `generate` blocks on the runtime captured at construction, so it must be
/// called from a blocking worker (`spawn_blocking`), never from async code.
pub struct RemoteLlm {
    client: reqwest::Client,
    base_url: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
    runtime: Handle,
}

impl RemoteLlm {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let runtime = Handle::try_current().map_err(|_| LlmError::NoRuntime)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.remote_url.trim_end_matches('/').to_string(),
            model: config.remote_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            runtime,
        })
    }

    pub async fn chat(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stream: false,
        };
        debug!(%url, "sending completion request");
        let response = self.client.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Status { status, body });
        }
        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or(LlmError::EmptyResponse)
    }
}

impl Generator for RemoteLlm {
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        Ok(self.runtime.block_on(self.chat(prompt))?)
    }
}
