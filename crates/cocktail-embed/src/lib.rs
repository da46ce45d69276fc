//! cocktail-embed
//!
//! Sentence embeddings for drink documents and questions. The real embedder
//! runs a BERT sentence model (all-MiniLM-L6-v2 by default) with candle; the
//! fake embedder hashes tokens and is selected with `APP_USE_FAKE_EMBEDDINGS=1`
//! for fast, deterministic tests.
use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use cocktail_core::config::EmbeddingConfig;
use cocktail_core::traits::Embedder;

pub mod device;
pub mod pool;
pub mod tokenize;

pub use pool::masked_mean_l2;

/// Output size of all-MiniLM-L6-v2, used by the fake embedder too so the two
/// are interchangeable.
pub const DEFAULT_DIM: usize = 384;

pub struct SentenceEmbedder { model: BertModel, tokenizer: Tokenizer, device: Device, dim: usize, max_len: usize }

impl SentenceEmbedder {
    pub fn load(model_dir: &Path, max_len: usize) -> Result<Self> {
        let device = device::select_device();
        info!(dir = %model_dir.display(), "loading sentence embedding model");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;

        let config_path = model_dir.join("config.json");
        let raw_config = std::fs::read_to_string(&config_path).with_context(|| format!("reading {}", config_path.display()))?;
        let config: BertConfig = serde_json::from_str(&raw_config)?;
        let dim = serde_json::from_str::<serde_json::Value>(&raw_config)?
            .get("hidden_size")
            .and_then(serde_json::Value::as_u64)
            .map_or(DEFAULT_DIM, |d| d as usize);

        let weights = load_weights(model_dir, &device)?;
        let vb = VarBuilder::from_tensors(weights, DType::F32, &device);
        let model = BertModel::load(vb, &config)?;
        info!(dim, max_len, "sentence embedding model loaded");
        Ok(Self { model, tokenizer, device, dim, max_len })
    }

    pub fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let start = Instant::now();
        let (input_ids, attention_mask) = tokenize::tokenize_on_device(&self.tokenizer, text, self.max_len, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self.model.forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = masked_mean_l2(&hidden, &attention_mask.to_dtype(DType::F32)?)?;
        let emb = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1::<f32>()?;
        if emb.len() != self.dim { return Err(anyhow!("expected {} dims, model produced {}", self.dim, emb.len())); }
        if start.elapsed().as_millis() > 100 { debug!(ms = start.elapsed().as_millis() as u64, "slow embedding"); }
        Ok(emb)
    }
}

impl Embedder for SentenceEmbedder {
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { self.max_len }
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed_text(t)).collect()
    }
}

fn load_weights(model_dir: &Path, device: &Device) -> Result<HashMap<String, Tensor>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        debug!(path = %safetensors.display(), "reading safetensors weights");
        return Ok(candle_core::safetensors::load(&safetensors, device)?);
    }
    let pickle = model_dir.join("pytorch_model.bin");
    if pickle.exists() {
        debug!(path = %pickle.display(), "reading pytorch weights");
        let weights = candle_core::pickle::read_all(&pickle)?;
        return weights.into_iter().map(|(k, t)| Ok((k, t.to_device(device)?))).collect();
    }
    Err(anyhow!("No model.safetensors or pytorch_model.bin in {}", model_dir.display()))
}

/// Hashing embedder: every whitespace token bumps one bucket. Deterministic and
/// normalized, so texts sharing words land close together.
pub struct FakeEmbedder { dim: usize }

impl FakeEmbedder { pub fn new(dim: usize) -> Self { Self { dim } } }

impl Embedder for FakeEmbedder {
    fn dim(&self) -> usize { self.dim }
    fn max_len(&self) -> usize { usize::MAX }
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0f32; self.dim];
                for token in text.split_whitespace() {
                    let token = token.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
                    if token.is_empty() { continue; }
                    let mut hasher = XxHash64::with_seed(0);
                    token.hash(&mut hasher);
                    let h = hasher.finish();
                    v[(h as usize) % self.dim] += 1.0;
                }
                let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-6);
                for x in &mut v { *x /= norm; }
                v
            })
            .collect())
    }
}

fn fake_requested() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS").ok().is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Builds the embedder described by `config`, honouring `APP_USE_FAKE_EMBEDDINGS`.
pub fn build_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
    if config.fake || fake_requested() {
        warn!("using FakeEmbedder; retrieval quality is for testing only");
        return Ok(Box::new(FakeEmbedder::new(DEFAULT_DIM)));
    }
    let dir = resolve_model_dir(config)?;
    Ok(Box::new(SentenceEmbedder::load(&dir, config.max_len)?))
}

fn resolve_model_dir(config: &EmbeddingConfig) -> Result<PathBuf> {
    for var in ["APP_MODEL_DIR", "MODEL_DIR"] {
        if let Ok(dir) = std::env::var(var) {
            let p = PathBuf::from(&dir);
            if p.exists() { info!(var, dir = %p.display(), "using model dir from environment"); return Ok(p); }
        }
    }
    if let Some(dir) = &config.model_dir {
        let p = cocktail_core::config::expand_path(dir);
        if p.exists() { return Ok(p); }
        return Err(anyhow!("Configured embedding.model_dir does not exist: {}", p.display()));
    }
    for root in ["models", "../models"] {
        let p = Path::new(root).join(&config.model);
        if p.exists() { return Ok(p); }
    }
    Err(anyhow!("Could not locate the '{}' model directory (set APP_MODEL_DIR or embedding.model_dir)", config.model))
}
