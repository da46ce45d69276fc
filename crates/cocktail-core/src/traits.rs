/// Turns text into fixed-size vectors.
///
/// Implementations must return L2-normalized vectors of length `dim()`.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// A language model that completes a fully rendered prompt.
///
/// Calls block until the whole answer is produced; async callers run them
/// on a blocking worker.
pub trait Generator: Send + Sync {
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Question in, answer text out.
pub trait Chain: Send + Sync {
    fn invoke(&self, question: &str) -> anyhow::Result<String>;
}
