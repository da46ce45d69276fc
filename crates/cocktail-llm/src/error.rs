use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM backend '{0}' is not available in this build (rebuild with `--features local`)")]
    BackendUnavailable(&'static str),

    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    #[error("Prompt of {prompt} tokens does not fit a context of {n_ctx} with {max_tokens} new tokens")]
    ContextOverflow { prompt: usize, max_tokens: usize, n_ctx: u32 },

    #[error("LLM request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM returned no choices")]
    EmptyResponse,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("llama.cpp error: {0}")]
    LlamaCpp(String),

    #[error("No async runtime available for the remote LLM client")]
    NoRuntime,
}
