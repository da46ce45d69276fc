//! cocktail-llm
//!
//! Language-model backends behind the [`Generator`] trait: an in-process
//! GGUF model through llama.cpp (feature `local`) and an OpenAI-compatible
//! HTTP server for setups where the model runs elsewhere.
use tracing::info;

use cocktail_core::config::{LlmBackend, LlmConfig};
use cocktail_core::traits::Generator;

pub mod error;
#[cfg(feature = "local")]
pub mod local;
pub mod remote;

pub use error::LlmError;
#[cfg(feature = "local")]
pub use local::LocalLlm;
pub use remote::RemoteLlm;

/// Wraps a single user turn in the Llama 3 instruct chat format, leaving the
/// assistant header open for generation.
pub fn llama3_prompt(user: &str) -> String {
    format!(
        "<|begin_of_text|><|start_header_id|>user<|end_header_id|>\n\n{}<|eot_id|><|start_header_id|>assistant<|end_header_id|>\n\n",
        user.trim()
    )
}

/// Instantiates the backend selected by `llm.backend`.
pub fn build_generator(config: &LlmConfig) -> Result<Box<dyn Generator>, LlmError> {
    match config.backend {
        LlmBackend::Remote => {
            info!(url = %config.remote_url, model = %config.remote_model, "using remote LLM server");
            Ok(Box::new(RemoteLlm::new(config)?))
        }
        #[cfg(feature = "local")]
        LlmBackend::Local => Ok(Box::new(LocalLlm::load(config)?)),
        #[cfg(not(feature = "local"))]
        LlmBackend::Local => Err(LlmError::BackendUnavailable("local")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llama3_prompt_opens_assistant_turn() {
        let p = llama3_prompt("  What is in a Negroni?\n");
        assert!(p.starts_with("<|begin_of_text|><|start_header_id|>user<|end_header_id|>\n\nWhat is in a Negroni?<|eot_id|>"));
        assert!(p.ends_with("<|start_header_id|>assistant<|end_header_id|>\n\n"));
    }

    #[cfg(not(feature = "local"))]
    #[test]
    fn local_backend_needs_the_feature() {
        let err = build_generator(&LlmConfig::default()).err().expect("local backend must fail without the feature");
        assert!(matches!(err, LlmError::BackendUnavailable("local")));
    }

    #[test]
    fn remote_backend_needs_a_runtime() {
        let config = LlmConfig { backend: LlmBackend::Remote, ..Default::default() };
        assert!(matches!(build_generator(&config).err(), Some(LlmError::NoRuntime)));
    }
}
