// Abstract Syntax Tree types for text templates

use serde::Deserialize;

use super::parser::TemplateParser;

/// Represents a parsed template as a list of parts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Template {
    pub parts: Vec<TemplatePart>,
}

impl Template {
    pub fn new(parts: Vec<TemplatePart>) -> Self {
        Self { parts }
    }

    /// Get all slot names in this template, in order of appearance
    pub fn slots(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Slot(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots().contains(&name)
    }
}

impl TryFrom<String> for Template {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TemplateParser::parse(&value)
    }
}

/// A template consists of literal strings and named slots
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Slot(String),
}
