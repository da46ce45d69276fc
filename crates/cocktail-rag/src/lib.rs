//! cocktail-rag
//!
//! The retrieval + generation chain: top-k documents from the vector index
//! are stuffed into a fixed instructional prompt together with the question,
//! and the language model's raw text is the answer.
pub mod chain;
pub mod prompt;

pub use chain::RagChain;
pub use prompt::{PromptTemplate, TemplateError};

/// What the model is told to say when the context does not cover the question.
pub const NO_INFORMATION_REPLY: &str = "Unfortunately, I don't have information about that in my cocktail database.";

pub const COCKTAIL_TEMPLATE: &str = "
You are a cocktail expert. Answer the user's question using only the context below.
If the answer is not in the context, say \"Unfortunately, I don't have information about that in my cocktail database.\".
Do not make up ingredients or instructions.

Context (cocktails found):

{context}

User question: {question}

Answer:
";

/// The fixed template, parsed.
pub fn cocktail_prompt() -> PromptTemplate {
    // COCKTAIL_TEMPLATE is a compile-time constant covered by tests.
    match PromptTemplate::from_template(COCKTAIL_TEMPLATE) {
        Ok(t) => t,
        Err(e) => unreachable!("built-in template is malformed: {e}"),
    }
}
