use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

use cocktail_core::config::ClientConfig;
use cocktail_rpc::{answer_text, tool_call_request};

use crate::error::ClientError;
use crate::stream::read_answer;

/// Something that can put one question to the cocktail bot.
#[async_trait]
pub trait QuestionSender: Send + Sync {
    /// Where questions go; shown in the banner.
    fn endpoint(&self) -> &str;
    /// Sends `question`; progress markers may be written to `output`.
    async fn ask(&self, question: &str, output: &mut (dyn Write + Send)) -> Result<String, ClientError>;
}

pub struct HttpSender { client: reqwest::Client, url: String }

impl HttpSender {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
        Ok(Self { client, url: config.url.clone() })
    }
}

#[async_trait]
impl QuestionSender for HttpSender {
    fn endpoint(&self) -> &str { &self.url }

    async fn ask(&self, question: &str, output: &mut (dyn Write + Send)) -> Result<String, ClientError> {
        let id = rand::thread_rng().gen_range(1..=100_000u64);
        let request = tool_call_request(id, question);
        debug!(id, url = %self.url, "sending tools/call");
        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json, text/event-stream")
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { code: status.as_u16(), body });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));
        if is_json {
            let body = response.bytes().await?;
            let value: Value = serde_json::from_slice(&body)?;
            return Ok(answer_text(&value));
        }
        read_answer(response.bytes_stream(), output).await
    }
}
