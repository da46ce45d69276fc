//! Domain types shared by the loader, the vector index and the chain.

use serde::{Deserialize, Deserializer, Serialize};

/// One ingredient line of a drink. Either field may be absent in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub measure: Option<String>,
}

/// A drink as stored in the static JSON collection.
///
/// Every field is optional; defaults are applied when the record is turned
/// into a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "flag_as_text")]
    pub alcoholic: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

/// Metadata carried next to each document's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkMetadata {
    pub name: String,
    pub category: String,
    pub alcoholic: String,
    pub tags: Vec<String>,
}

/// The retrievable unit: one per drink, created once at startup.
///
/// - `id`: position of the drink in the source collection
/// - `page_content`: the text that is embedded and handed to the model
/// - `metadata`: name, category, alcoholic flag and tags of the drink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: usize,
    pub page_content: String,
    pub metadata: DrinkMetadata,
}

/// A nearest-neighbour match. `index` points into the index's document list,
/// `score` is cosine similarity (higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub index: usize,
    pub score: f32,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

// The collection uses both "Alcoholic"/"Non alcoholic" strings and booleans.
fn flag_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Flag>::deserialize(deserializer)?.map(|flag| match flag {
        Flag::Bool(true) => "Alcoholic".to_string(),
        Flag::Bool(false) => "Non alcoholic".to_string(),
        Flag::Text(text) => text,
    }))
}
