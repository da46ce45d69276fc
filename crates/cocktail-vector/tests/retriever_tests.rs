use cocktail_core::data_processor::document_from_drink;
use cocktail_core::types::{DrinkRecord, Ingredient};
use cocktail_embed::{FakeEmbedder, DEFAULT_DIM};
use cocktail_vector::{FlatIndex, Retriever, DEFAULT_TOP_K};

fn drink(name: &str, ingredients: &[&str]) -> DrinkRecord {
    DrinkRecord {
        name: Some(name.to_string()),
        instructions: Some("Stir and serve.".to_string()),
        ingredients: ingredients.iter().map(|n| Ingredient { name: Some(n.to_string()), measure: None }).collect(),
        ..Default::default()
    }
}

fn catalogue() -> Vec<DrinkRecord> {
    vec![
        drink("Negroni", &["Gin", "Campari", "Sweet Vermouth"]),
        drink("Margarita", &["Tequila", "Triple sec", "Lime juice"]),
        drink("Mojito", &["White rum", "Mint", "Soda water"]),
        drink("Daiquiri", &["Light rum", "Lime", "Sugar syrup"]),
        drink("Paloma", &["Tequila", "Grapefruit soda"]),
        drink("Martini", &["Gin", "Dry Vermouth", "Olive"]),
        drink("Cuba Libre", &["Rum", "Coca-Cola", "Lime"]),
    ]
}

#[test]
fn retriever_returns_top_k_with_best_match_first() {
    let docs: Vec<_> = catalogue().iter().enumerate().map(|(i, d)| document_from_drink(d, i)).collect();
    let index = FlatIndex::from_documents(docs, &FakeEmbedder::new(DEFAULT_DIM)).expect("index");
    assert_eq!(index.len(), 7);

    let retriever = Retriever::new(index, Box::new(FakeEmbedder::new(DEFAULT_DIM)), DEFAULT_TOP_K);
    let found = retriever.retrieve("What goes into a Margarita with Tequila?").expect("retrieve");

    assert_eq!(found.len(), 5);
    assert_eq!(found[0].metadata.name, "Margarita");
}

#[test]
fn retriever_never_returns_more_than_the_collection() {
    let docs: Vec<_> = catalogue().iter().take(2).enumerate().map(|(i, d)| document_from_drink(d, i)).collect();
    let index = FlatIndex::from_documents(docs, &FakeEmbedder::new(DEFAULT_DIM)).unwrap();
    let retriever = Retriever::new(index, Box::new(FakeEmbedder::new(DEFAULT_DIM)), 5);
    assert_eq!(retriever.retrieve("anything at all").unwrap().len(), 2);
}
