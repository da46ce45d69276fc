use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error(transparent)]
    Connection(#[from] reqwest::Error),
    #[error("invalid JSON in response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("response stream ended without a data frame")]
    EmptyStream,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
