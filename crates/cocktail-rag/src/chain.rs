use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, info};

use cocktail_core::data_processor::format_docs;
use cocktail_core::traits::{Chain, Generator};
use cocktail_vector::Retriever;

use crate::prompt::PromptTemplate;

/// retriever -> format_docs -> prompt -> llm, built once at startup.
pub struct RagChain { retriever: Retriever, prompt: PromptTemplate, llm: Box<dyn Generator> }

impl RagChain {
    pub fn new(retriever: Retriever, prompt: PromptTemplate, llm: Box<dyn Generator>) -> Self {
        Self { retriever, prompt, llm }
    }

    /// The filled prompt for `question`, without calling the model.
    pub fn render_prompt(&self, question: &str) -> Result<String> {
        let docs = self.retriever.retrieve(question)?;
        debug!(docs = ?docs.iter().map(|d| d.metadata.name.as_str()).collect::<Vec<_>>(), "context documents");
        let context = format_docs(&docs);
        let values = HashMap::from([("context", context.as_str()), ("question", question)]);
        Ok(self.prompt.render(&values)?)
    }

    pub fn invoke(&self, question: &str) -> Result<String> {
        let prompt = self.render_prompt(question)?;
        info!(prompt_chars = prompt.len(), "generating answer");
        self.llm.generate(&prompt)
    }
}

impl Chain for RagChain {
    fn invoke(&self, question: &str) -> Result<String> { Self::invoke(self, question) }
}
