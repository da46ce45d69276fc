use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use cocktail_core::traits::Embedder;
use cocktail_core::types::{Document, SearchHit};

const EMBED_BATCH: usize = 32;

/// Exhaustive cosine-similarity index: one vector per document.
pub struct FlatIndex { documents: Vec<Document>, vectors: Vec<Vec<f32>>, dim: usize }

impl FlatIndex {
    pub fn new(dim: usize) -> Self { Self { documents: Vec::new(), vectors: Vec::new(), dim } }

    /// Embeds every document's text and indexes it.
    pub fn from_documents(documents: Vec<Document>, embedder: &dyn Embedder) -> Result<Self> {
        let mut index = Self::new(embedder.dim());
        if documents.is_empty() { info!("no documents to index"); return Ok(index); }
        info!(count = documents.len(), dim = embedder.dim(), "building vector index");
        let pb = ProgressBar::new(documents.len() as u64);
        pb.set_style(ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%)")?.progress_chars("#>-"));
        for batch in documents.chunks(EMBED_BATCH) {
            let texts: Vec<String> = batch.iter().map(|d| d.page_content.clone()).collect();
            let vectors = embedder.embed_batch(&texts)?;
            if vectors.len() != batch.len() { bail!("embedder returned {} vectors for {} texts", vectors.len(), batch.len()); }
            for (doc, vector) in batch.iter().zip(vectors) { index.add(doc.clone(), vector)?; }
            pb.inc(batch.len() as u64);
        }
        pb.finish_and_clear();
        info!(count = index.len(), "vector index ready");
        Ok(index)
    }

    pub fn add(&mut self, document: Document, vector: Vec<f32>) -> Result<()> {
        if vector.len() != self.dim { bail!("vector for document {} has {} dims, index expects {}", document.id, vector.len(), self.dim); }
        self.documents.push(document);
        self.vectors.push(normalized(vector));
        Ok(())
    }

    pub fn dim(&self) -> usize { self.dim }
    pub fn len(&self) -> usize { self.documents.len() }
    pub fn is_empty(&self) -> bool { self.documents.is_empty() }
    pub fn document(&self, index: usize) -> Option<&Document> { self.documents.get(index) }

    /// Top `k` documents by cosine similarity to `query`, best first.
    /// Equal scores keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if query.len() != self.dim { bail!("query has {} dims, index expects {}", query.len(), self.dim); }
        let query = normalized(query.to_vec());
        let mut hits: Vec<SearchHit> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, v)| SearchHit { index, score: dot(&query, v) })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        Ok(hits)
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() }

fn normalized(mut v: Vec<f32>) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 1e-12 { for x in &mut v { *x /= norm; } }
    v
}
