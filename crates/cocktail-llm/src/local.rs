use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;

use llama_cpp_2::{
    context::params::LlamaContextParams,
    llama_backend::LlamaBackend,
    llama_batch::LlamaBatch,
    model::{params::LlamaModelParams, AddBos, LlamaModel, Special},
    sampling::LlamaSampler,
};
use tracing::{debug, info};

use cocktail_core::config::LlmConfig;
use cocktail_core::traits::Generator;

use crate::error::LlmError;
use crate::llama3_prompt;

const EOT_MARKER: &str = "<|eot_id|>";

/// GGUF model loaded once and shared; each call gets a fresh context.
pub struct LocalLlm {
    model: Arc<LlamaModel>,
    backend: Arc<LlamaBackend>,
    n_ctx: u32,
    n_batch: u32,
    max_tokens: usize,
    temperature: f32,
    seed: u32,
}

impl LocalLlm {
    pub fn load(config: &LlmConfig) -> Result<Self, LlmError> {
        let path = cocktail_core::config::expand_path(&config.model_path);
        if !Path::new(&path).exists() { return Err(LlmError::ModelNotFound(path.display().to_string())); }
        info!(path = %path.display(), n_gpu_layers = config.n_gpu_layers, "loading local model");

        let backend = LlamaBackend::init().map_err(|e| LlmError::LlamaCpp(format!("Failed to initialize llama backend: {e:?}")))?;
        let params = LlamaModelParams::default().with_n_gpu_layers(config.n_gpu_layers);
        let model = LlamaModel::load_from_file(&backend, &path, &params)
            .map_err(|e| LlmError::LlamaCpp(format!("Failed to load model: {e:?}")))?;
        info!("local model loaded");

        Ok(Self {
            model: Arc::new(model),
            backend: Arc::new(backend),
            n_ctx: config.n_ctx,
            n_batch: config.n_batch,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            seed: config.seed,
        })
    }

    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let ctx_params = LlamaContextParams::default()
            .with_n_ctx(NonZeroU32::new(self.n_ctx))
            .with_n_batch(self.n_batch);
        let mut ctx = self
            .model
            .new_context(&self.backend, ctx_params)
            .map_err(|e| LlmError::LlamaCpp(format!("Failed to create context: {e:?}")))?;

        let tokens = self
            .model
            .str_to_token(prompt, AddBos::Never)
            .map_err(|e| LlmError::LlamaCpp(format!("Tokenization failed: {e:?}")))?;
        if tokens.is_empty() { return Err(LlmError::LlamaCpp("prompt produced no tokens".into())); }
        if tokens.len() + self.max_tokens > self.n_ctx as usize {
            return Err(LlmError::ContextOverflow { prompt: tokens.len(), max_tokens: self.max_tokens, n_ctx: self.n_ctx });
        }
        debug!(prompt_tokens = tokens.len(), "decoding prompt");

        // The prompt is fed in n_batch sized pieces; only its last token needs logits.
        let chunk = (self.n_batch as usize).max(1);
        let mut batch = LlamaBatch::new(chunk, 1);
        let last = tokens.len() - 1;
        for (start, piece) in tokens.chunks(chunk).enumerate().map(|(i, p)| (i * chunk, p)) {
            batch.clear();
            for (offset, &token) in piece.iter().enumerate() {
                let pos = start + offset;
                batch
                    .add(token, pos as i32, &[0], pos == last)
                    .map_err(|e| LlmError::LlamaCpp(format!("Failed to add prompt token to batch: {e:?}")))?;
            }
            ctx.decode(&mut batch).map_err(|e| LlmError::LlamaCpp(format!("Failed to decode prompt: {e:?}")))?;
        }

        let mut sampler = if self.temperature > 0.0 {
            LlamaSampler::chain_simple([LlamaSampler::temp(self.temperature), LlamaSampler::dist(self.seed)])
        } else {
            LlamaSampler::greedy()
        };

        let mut generated = String::new();
        let mut next_pos = tokens.len() as i32;
        for _ in 0..self.max_tokens {
            let token = sampler.sample(&ctx, batch.n_tokens() - 1);
            sampler.accept(token);
            if self.model.is_eog_token(token) { break; }

            if let Ok(piece) = self.model.token_to_str(token, Special::Plaintext) {
                generated.push_str(&piece);
                if let Some(pos) = generated.find(EOT_MARKER) { generated.truncate(pos); break; }
            }

            batch.clear();
            batch
                .add(token, next_pos, &[0], true)
                .map_err(|e| LlmError::LlamaCpp(format!("Failed to add generated token to batch: {e:?}")))?;
            ctx.decode(&mut batch).map_err(|e| LlmError::LlamaCpp(format!("Failed to decode token: {e:?}")))?;
            next_pos += 1;
        }
        debug!(generated_tokens = next_pos as usize - tokens.len(), "generation finished");
        Ok(generated)
    }
}

impl Generator for LocalLlm {
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        Ok(self.complete(&llama3_prompt(prompt))?)
    }
}
