use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{Document, DrinkMetadata, DrinkRecord};

pub const MISSING_NAME: &str = "No name";
pub const MISSING_INSTRUCTIONS: &str = "No instructions";
pub const MISSING_FIELD: &str = "None";

/// Separator placed between documents when they are stuffed into a prompt.
pub const DOC_SEPARATOR: &str = "\n\n\n\n";

/// Reads the drink collection and derives one [`Document`] per drink.
#[derive(Default)]
pub struct DataProcessor;

impl DataProcessor {
    pub fn new() -> Self { Self }

    pub fn process_file(&self, path: &Path) -> Result<Vec<Document>> {
        info!(path = %path.display(), "loading drink collection");
        let drinks = self.load_drinks(path)?;
        let documents: Vec<Document> = drinks.iter().enumerate().map(|(i, d)| document_from_drink(d, i)).collect();
        info!(count = documents.len(), "built cocktail documents");
        Ok(documents)
    }

    pub fn load_drinks(&self, path: &Path) -> Result<Vec<DrinkRecord>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(Error::Io(e)),
        };
        let drinks: Vec<DrinkRecord> = serde_json::from_str(&raw).map_err(|e| Error::InvalidData {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!(count = drinks.len(), "parsed drink records");
        Ok(drinks)
    }
}

/// Loads the drink file and derives its documents in one step.
pub fn load_documents(path: &Path) -> Result<Vec<Document>> { DataProcessor::new().process_file(path) }

/// Renders a drink as the text block that gets embedded and shown to the model.
pub fn document_from_drink(drink: &DrinkRecord, id: usize) -> Document {
    let name = drink.name.clone().unwrap_or_else(|| MISSING_NAME.to_string());
    let instructions = drink.instructions.clone().unwrap_or_else(|| MISSING_INSTRUCTIONS.to_string());

    let ingredients: Vec<String> = drink
        .ingredients
        .iter()
        .filter_map(|ing| {
            // Only absent or empty values count as missing; whitespace is kept and trimmed.
            let ing_name = ing.name.as_deref().filter(|n| !n.is_empty())?.trim();
            match ing.measure.as_deref().filter(|m| !m.is_empty()) {
                Some(measure) => Some(format!("{ing_name} ({})", measure.trim())),
                None => Some(ing_name.to_string()),
            }
        })
        .collect();

    let page_content = format!(
        "Cocktail name: {}\nIngredients: {}\nInstructions: {}",
        name,
        ingredients.join(", "),
        instructions
    );

    let metadata = DrinkMetadata {
        name,
        category: drink.category.clone().unwrap_or_else(|| MISSING_FIELD.to_string()),
        alcoholic: drink.alcoholic.clone().unwrap_or_else(|| MISSING_FIELD.to_string()),
        tags: drink.tags.clone(),
    };
    Document { id, page_content, metadata }
}

/// Joins document texts into a single context block.
pub fn format_docs(docs: &[Document]) -> String {
    docs.iter().map(|d| d.page_content.as_str()).collect::<Vec<_>>().join(DOC_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ingredient;

    fn ing(name: Option<&str>, measure: Option<&str>) -> Ingredient {
        Ingredient { name: name.map(String::from), measure: measure.map(String::from) }
    }

    #[test]
    fn measures_are_trimmed_and_parenthesised() {
        let drink = DrinkRecord {
            name: Some("Mojito".into()),
            instructions: Some("Muddle mint.".into()),
            ingredients: vec![ing(Some(" White rum "), Some(" 2 oz ")), ing(Some("Mint"), None), ing(Some("Soda"), Some("  "))],
            ..Default::default()
        };
        let doc = document_from_drink(&drink, 3);
        assert_eq!(doc.id, 3);
        assert_eq!(doc.page_content, "Cocktail name: Mojito\nIngredients: White rum (2 oz), Mint, Soda ()\nInstructions: Muddle mint.");
    }

    #[test]
    fn whitespace_only_name_is_kept_as_empty_entry() {
        let drink = DrinkRecord {
            name: Some("Spritz".into()),
            ingredients: vec![ing(Some("   "), None), ing(Some("Prosecco"), Some("3 oz"))],
            ..Default::default()
        };
        let doc = document_from_drink(&drink, 0);
        assert!(doc.page_content.contains("Ingredients: , Prosecco (3 oz)\n"));
    }

    #[test]
    fn nameless_ingredients_are_skipped() {
        let drink = DrinkRecord {
            name: Some("Gimlet".into()),
            ingredients: vec![ing(None, Some("1 oz")), ing(Some(""), None), ing(Some("Gin"), None)],
            ..Default::default()
        };
        let doc = document_from_drink(&drink, 0);
        assert!(doc.page_content.contains("Ingredients: Gin\n"));
    }

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let doc = document_from_drink(&DrinkRecord::default(), 0);
        assert_eq!(doc.metadata.name, MISSING_NAME);
        assert_eq!(doc.metadata.category, MISSING_FIELD);
        assert_eq!(doc.metadata.alcoholic, MISSING_FIELD);
        assert!(doc.metadata.tags.is_empty());
        assert!(doc.page_content.ends_with(&format!("Instructions: {MISSING_INSTRUCTIONS}")));
    }

    #[test]
    fn format_docs_uses_blank_line_separator() {
        let a = document_from_drink(&DrinkRecord { name: Some("A".into()), ..Default::default() }, 0);
        let b = document_from_drink(&DrinkRecord { name: Some("B".into()), ..Default::default() }, 1);
        let joined = format_docs(&[a.clone(), b.clone()]);
        assert_eq!(joined, format!("{}\n\n\n\n{}", a.page_content, b.page_content));
        assert_eq!(format_docs(&[]), "");
    }
}
