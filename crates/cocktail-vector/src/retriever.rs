use anyhow::{anyhow, Result};
use tracing::debug;

use cocktail_core::traits::Embedder;
use cocktail_core::types::Document;

use crate::index::FlatIndex;

pub const DEFAULT_TOP_K: usize = 5;

/// Embeds a question and returns the `k` most similar documents.
pub struct Retriever { index: FlatIndex, embedder: Box<dyn Embedder>, k: usize }

impl Retriever {
    pub fn new(index: FlatIndex, embedder: Box<dyn Embedder>, k: usize) -> Self { Self { index, embedder, k } }

    pub fn retrieve(&self, question: &str) -> Result<Vec<Document>> {
        let query = self
            .embedder
            .embed_batch(&[question.to_string()])?
            .pop()
            .ok_or_else(|| anyhow!("embedder returned no vector for the question"))?;
        let hits = self.index.search(&query, self.k)?;
        debug!(hits = hits.len(), top_score = hits.first().map(|h| h.score), "retrieved documents");
        hits.iter()
            .map(|h| self.index.document(h.index).cloned().ok_or_else(|| anyhow!("hit {} outside index", h.index)))
            .collect()
    }
}
