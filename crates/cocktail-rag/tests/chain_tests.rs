use std::sync::{Arc, Mutex};

use cocktail_core::data_processor::{document_from_drink, DOC_SEPARATOR};
use cocktail_core::traits::{Chain, Generator};
use cocktail_core::types::{DrinkRecord, Ingredient};
use cocktail_embed::{FakeEmbedder, DEFAULT_DIM};
use cocktail_rag::{cocktail_prompt, RagChain, COCKTAIL_TEMPLATE, NO_INFORMATION_REPLY};
use cocktail_vector::{FlatIndex, Retriever};

/// Records the prompt it receives and answers with a canned string.
struct RecordingLlm { seen: Arc<Mutex<Vec<String>>>, reply: String }

impl Generator for RecordingLlm {
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self.seen.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

struct FailingLlm;

impl Generator for FailingLlm {
    fn generate(&self, _prompt: &str) -> anyhow::Result<String> { anyhow::bail!("model exploded") }
}

fn retriever(k: usize) -> Retriever {
    let names = ["Negroni", "Margarita", "Mojito", "Daiquiri", "Paloma", "Martini", "Sazerac"];
    let docs = names
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let drink = DrinkRecord {
                name: Some(n.to_string()),
                instructions: Some(format!("Build the {n} over ice.")),
                ingredients: vec![Ingredient { name: Some("Ice".into()), measure: None }],
                ..Default::default()
            };
            document_from_drink(&drink, i)
        })
        .collect();
    let index = FlatIndex::from_documents(docs, &FakeEmbedder::new(DEFAULT_DIM)).unwrap();
    Retriever::new(index, Box::new(FakeEmbedder::new(DEFAULT_DIM)), k)
}

#[test]
fn template_declares_context_and_question_and_fallback() {
    let vars: Vec<_> = cocktail_prompt().input_variables().map(String::from).collect();
    assert_eq!(vars, vec!["context".to_string(), "question".to_string()]);
    assert!(COCKTAIL_TEMPLATE.contains(NO_INFORMATION_REPLY));
    assert!(COCKTAIL_TEMPLATE.contains("only the context"));
}

#[test]
fn chain_fills_prompt_with_top_five_documents_and_question() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let llm = RecordingLlm { seen: seen.clone(), reply: "  Stir it.  ".into() };
    let chain = RagChain::new(retriever(5), cocktail_prompt(), Box::new(llm));

    let answer = Chain::invoke(&chain, "How do I build a Sazerac?").unwrap();
    assert_eq!(answer, "  Stir it.  ", "model output is returned untouched");

    let prompts = seen.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(prompt.contains("User question: How do I build a Sazerac?"));
    assert_eq!(prompt.matches("Cocktail name: ").count(), 5);
    assert_eq!(prompt.matches(DOC_SEPARATOR).count(), 4);
    let context_start = prompt.find("Context (cocktails found):\n\n").unwrap();
    assert!(prompt[context_start..].trim_start_matches("Context (cocktails found):\n\n").starts_with("Cocktail name: Sazerac"));
}

#[test]
fn generator_errors_propagate_out_of_the_chain() {
    let chain = RagChain::new(retriever(2), cocktail_prompt(), Box::new(FailingLlm));
    let err = chain.invoke("anything").unwrap_err();
    assert!(err.to_string().contains("model exploded"));
}
