use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cocktail_core::config::{expand_path, Config};
use cocktail_core::data_processor::load_documents;
use cocktail_core::Error;
use cocktail_embed::build_embedder;
use cocktail_llm::build_generator;
use cocktail_rag::{cocktail_prompt, RagChain};
use cocktail_server::{start_server, ServerState};
use cocktail_vector::{FlatIndex, Retriever};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    info!("starting cocktail bot server");

    let drinks_file = expand_path(&settings.data.drinks_file);
    info!(path = %drinks_file.display(), "step 1: loading drink data");
    let documents = match load_documents(&drinks_file) {
        Ok(docs) => docs,
        Err(Error::NotFound(path)) => {
            eprintln!("ERROR: file {} not found!", path);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("ERROR while loading JSON: {}", e);
            std::process::exit(1);
        }
    };
    info!(count = documents.len(), "loaded cocktail documents");

    info!(model = %settings.embedding.model, "step 2: loading embedding model");
    let embedder = build_embedder(&settings.embedding)?;

    info!("step 3: building vector index");
    let index = FlatIndex::from_documents(documents, embedder.as_ref())?;

    info!(k = settings.retrieval.top_k, "step 4: creating retriever");
    let retriever = Retriever::new(index, embedder, settings.retrieval.top_k);

    info!(backend = ?settings.llm.backend, "step 5: initialising LLM");
    let llm = build_generator(&settings.llm).context("initialising the language model")?;

    info!("step 6: building RAG chain");
    let chain = RagChain::new(retriever, cocktail_prompt(), llm);

    info!(name = %settings.server.name, "step 7: starting tool server");
    start_server(ServerState::new(Arc::new(chain), settings.server)).await
}
