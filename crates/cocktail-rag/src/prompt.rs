use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed '{{' at byte {0}")]
    Unclosed(usize),
    #[error("unmatched '}}' at byte {0}")]
    Unmatched(usize),
    #[error("empty or invalid variable name at byte {0}")]
    BadName(usize),
    #[error("missing value for template variable '{0}'")]
    Missing(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Var(String),
}

/// `{name}` placeholders filled at render time; `{{` and `}}` are literal braces.
#[derive(Debug, Clone)]
pub struct PromptTemplate { parts: Vec<Part>, variables: BTreeSet<String> }

impl PromptTemplate {
    pub fn from_template(template: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut variables = BTreeSet::new();
        let mut text = String::new();
        let mut chars = template.char_indices().peekable();
        while let Some((at, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|&(_, n)| n) == Some('{') => { chars.next(); text.push('{'); }
                '}' if chars.peek().map(|&(_, n)| n) == Some('}') => { chars.next(); text.push('}'); }
                '}' => return Err(TemplateError::Unmatched(at)),
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, ch)) => name.push(ch),
                            None => return Err(TemplateError::Unclosed(at)),
                        }
                    }
                    let name = name.trim().to_string();
                    if name.is_empty() || !name.chars().all(|ch| ch.is_alphanumeric() || ch == '_') {
                        return Err(TemplateError::BadName(at));
                    }
                    if !text.is_empty() { parts.push(Part::Text(std::mem::take(&mut text))); }
                    variables.insert(name.clone());
                    parts.push(Part::Var(name));
                }
                _ => text.push(c),
            }
        }
        if !text.is_empty() { parts.push(Part::Text(text)); }
        Ok(Self { parts, variables })
    }

    pub fn input_variables(&self) -> impl Iterator<Item = &str> { self.variables.iter().map(String::as_str) }

    pub fn render(&self, values: &HashMap<&str, &str>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Text(t) => out.push_str(t),
                Part::Var(name) => out.push_str(values.get(name.as_str()).ok_or_else(|| TemplateError::Missing(name.clone()))?),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_every_occurrence() {
        let t = PromptTemplate::from_template("Q: {question}\nC: {context}\nQ again: {question}").unwrap();
        assert_eq!(t.input_variables().collect::<Vec<_>>(), vec!["context", "question"]);
        let values = HashMap::from([("question", "why?"), ("context", "because")]);
        assert_eq!(t.render(&values).unwrap(), "Q: why?\nC: because\nQ again: why?");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let t = PromptTemplate::from_template("{{json}} {x}").unwrap();
        assert_eq!(t.render(&HashMap::from([("x", "1")])).unwrap(), "{json} 1");
    }

    #[test]
    fn values_are_not_reinterpreted() {
        let t = PromptTemplate::from_template("{a}").unwrap();
        assert_eq!(t.render(&HashMap::from([("a", "{b}")])).unwrap(), "{b}");
    }

    #[test]
    fn malformed_templates_are_rejected() {
        assert_eq!(PromptTemplate::from_template("oops {x").unwrap_err(), TemplateError::Unclosed(5));
        assert_eq!(PromptTemplate::from_template("a } b").unwrap_err(), TemplateError::Unmatched(2));
        assert_eq!(PromptTemplate::from_template("{ }").unwrap_err(), TemplateError::BadName(0));
    }

    #[test]
    fn missing_value_is_an_error() {
        let t = PromptTemplate::from_template("{context}").unwrap();
        assert_eq!(t.render(&HashMap::new()).unwrap_err(), TemplateError::Missing("context".into()));
    }
}
