// Template slot resolution

use anyhow::{bail, Result};

use super::ast::{Template, TemplatePart};

/// Resolves the slots of a template to produce the final text
pub struct TemplateResolver;

impl TemplateResolver {
    /// Resolve a template, asking `lookup` for the value of each slot in order.
    ///
    /// A slot that appears twice is looked up twice, so a sampling lookup may
    /// fill each occurrence differently. Bind a value up front when every
    /// occurrence must agree.
    pub fn resolve<F>(template: &Template, mut lookup: F) -> Result<String>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut result = String::new();

        for part in &template.parts {
            match part {
                TemplatePart::Literal(s) => result.push_str(s),
                TemplatePart::Slot(name) => match lookup(name) {
                    Some(value) => result.push_str(&value),
                    None => bail!("Missing value for slot: {}", name),
                },
            }
        }

        Ok(result)
    }

    /// Return the slots of `template` that are not in `known`
    pub fn unknown_slots<'a>(template: &'a Template, known: &[&str]) -> Vec<&'a str> {
        template
            .slots()
            .into_iter()
            .filter(|slot| !known.contains(slot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::parser::TemplateParser;
    use std::collections::HashMap;

    #[test]
    fn test_resolve_from_map() {
        let template = TemplateParser::parse("New to {topic}? Try {content_detail}.").unwrap();

        let mut vars = HashMap::new();
        vars.insert("topic", "GraphQL API design".to_string());
        vars.insert("content_detail", "schema stitching".to_string());

        let result = TemplateResolver::resolve(&template, |name| vars.get(name).cloned()).unwrap();
        assert_eq!(result, "New to GraphQL API design? Try schema stitching.");
    }

    #[test]
    fn test_resolve_leaves_values_untouched() {
        let template = TemplateParser::parse("{topic}").unwrap();
        let result =
            TemplateResolver::resolve(&template, |_| Some("a b/c & {d}".to_string())).unwrap();
        assert_eq!(result, "a b/c & {d}");
    }

    #[test]
    fn test_resolve_repeated_slot_calls_lookup_each_time() {
        let template = TemplateParser::parse("{n}-{n}").unwrap();
        let mut counter = 0;
        let result = TemplateResolver::resolve(&template, |_| {
            counter += 1;
            Some(counter.to_string())
        })
        .unwrap();
        assert_eq!(result, "1-2");
    }

    #[test]
    fn test_resolve_missing_slot_fails() {
        let template = TemplateParser::parse("about {root_cause}").unwrap();
        let result = TemplateResolver::resolve(&template, |_| None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("root_cause"));
    }

    #[test]
    fn test_unknown_slots() {
        let template = TemplateParser::parse("{topic} in {context} via {approach}").unwrap();
        let unknown = TemplateResolver::unknown_slots(&template, &["topic", "approach"]);
        assert_eq!(unknown, vec!["context"]);
    }
}
