// Static vocabulary for the content generator, loaded from YAML

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use crate::domain::template::{Template, TemplateResolver};
use crate::error::{Result, SeedError};

const BUILTIN_VOCABULARY: &str = include_str!("../../vocabulary.yml");

static BUILTIN: OnceLock<Vocabulary> = OnceLock::new();

/// Slot bound to the topic of the record being generated
pub const TOPIC_SLOT: &str = "topic";
/// Slot bound to a detail of the post's own topic
pub const CONTENT_DETAIL_SLOT: &str = "content_detail";
/// Slot bound to the generated question of an opening message
pub const QUESTION_DETAIL_SLOT: &str = "question_detail";
/// Filler list the opening question is built from
pub const TOPIC_DETAIL_FILLER: &str = "topic_detail";

#[derive(Debug, Clone, Deserialize)]
pub struct Vocabulary {
    pub posts: PostVocabulary,
    pub queries: QueryVocabulary,
    pub messages: MessageVocabulary,
    /// Values for every other slot, keyed by slot name
    pub fillers: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostVocabulary {
    pub topics: Vec<PostTopic>,
    pub templates: Vec<PostTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostTopic {
    pub name: String,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostTemplate {
    pub title: Template,
    pub content: Template,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryVocabulary {
    pub topics: Vec<String>,
    pub templates: Vec<Template>,
    pub departments: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageVocabulary {
    pub opening: Template,
    pub question_prefix: String,
    pub replies: Vec<Template>,
}

impl Vocabulary {
    /// The vocabulary shipped with the binary, parsed on first use.
    pub fn builtin() -> &'static Vocabulary {
        BUILTIN.get_or_init(|| {
            Self::from_yaml(BUILTIN_VOCABULARY).expect("Invalid built-in vocabulary.yml")
        })
    }

    pub fn from_yaml(yml: &str) -> Result<Self> {
        let vocabulary: Vocabulary = serde_yaml::from_str(yml)
            .map_err(|e| SeedError::Vocabulary(format!("Invalid yaml vocabulary: {}", e)))?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let yml = std::fs::read_to_string(path).map_err(|e| {
            SeedError::Vocabulary(format!("Could not read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&yml)
    }

    pub fn filler(&self, slot: &str) -> Option<&[String]> {
        self.fillers.get(slot).map(|values| values.as_slice())
    }

    /// Check that every template can be fully resolved and every list can be
    /// sampled from.
    pub fn validate(&self) -> Result<()> {
        non_empty("posts.topics", &self.posts.topics)?;
        non_empty("posts.templates", &self.posts.templates)?;
        non_empty("queries.topics", &self.queries.topics)?;
        non_empty("queries.templates", &self.queries.templates)?;
        non_empty("queries.departments", &self.queries.departments)?;
        non_empty("messages.replies", &self.messages.replies)?;

        for topic in &self.posts.topics {
            non_empty(&format!("details of post topic '{}'", topic.name), &topic.details)?;
        }
        for (slot, values) in &self.fillers {
            non_empty(&format!("fillers.{}", slot), values)?;
        }

        let post_slots = [TOPIC_SLOT, CONTENT_DETAIL_SLOT];
        for template in &self.posts.templates {
            check_slots("posts.templates", &template.title, &post_slots)?;
            check_slots("posts.templates", &template.content, &post_slots)?;
        }

        check_slots(
            "messages.opening",
            &self.messages.opening,
            &[TOPIC_SLOT, QUESTION_DETAIL_SLOT],
        )?;
        if self.messages.opening.has_slot(QUESTION_DETAIL_SLOT)
            && self.filler(TOPIC_DETAIL_FILLER).is_none()
        {
            return Err(SeedError::Vocabulary(format!(
                "messages.opening needs a '{}' filler list",
                TOPIC_DETAIL_FILLER
            )));
        }

        let mut filled_slots: Vec<&str> = self.fillers.keys().map(String::as_str).collect();
        filled_slots.push(TOPIC_SLOT);
        for template in &self.queries.templates {
            check_slots("queries.templates", template, &filled_slots)?;
        }
        for template in &self.messages.replies {
            check_slots("messages.replies", template, &filled_slots)?;
        }

        Ok(())
    }
}

fn non_empty<T>(what: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(SeedError::Vocabulary(format!("{} must not be empty", what)));
    }
    Ok(())
}

fn check_slots(what: &str, template: &Template, known: &[&str]) -> Result<()> {
    let unknown = TemplateResolver::unknown_slots(template, known);
    if let Some(slot) = unknown.first() {
        return Err(SeedError::Vocabulary(format!(
            "{} uses unknown slot '{}'",
            what, slot
        )));
    }
    Ok(())
}
