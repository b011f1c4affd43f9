// Template-driven posts, queries and message conversations

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::vocabulary::{
    PostTemplate, PostTopic, Vocabulary, CONTENT_DETAIL_SLOT, QUESTION_DETAIL_SLOT,
    TOPIC_DETAIL_FILLER, TOPIC_SLOT,
};
use crate::domain::template::{Template, TemplateResolver};
use crate::domain::{MessagePair, Post, Query};
use crate::error::{Result, SeedError, TemplateResultExt};

/// One post for every (topic, template) combination, then random
/// combinations until `target` posts exist.
pub fn generate_posts<R: Rng + ?Sized>(
    vocabulary: &Vocabulary,
    target: usize,
    rng: &mut R,
) -> Result<Vec<Post>> {
    let posts_vocab = &vocabulary.posts;
    let mut posts = Vec::with_capacity(target);

    for topic in &posts_vocab.topics {
        for template in &posts_vocab.templates {
            posts.push(render_post(topic, template, rng)?);
        }
    }

    while posts.len() < target {
        let topic = pick(&posts_vocab.topics, "posts.topics", rng)?;
        let template = pick(&posts_vocab.templates, "posts.templates", rng)?;
        posts.push(render_post(topic, template, rng)?);
    }

    Ok(posts)
}

fn render_post<R: Rng + ?Sized>(
    topic: &PostTopic,
    template: &PostTemplate,
    rng: &mut R,
) -> Result<Post> {
    let detail = pick(&topic.details, "post topic details", rng)?;
    let lookup = |slot: &str| match slot {
        TOPIC_SLOT => Some(topic.name.clone()),
        CONTENT_DETAIL_SLOT => Some(detail.clone()),
        _ => None,
    };

    Ok(Post {
        title: TemplateResolver::resolve(&template.title, lookup).template_err()?,
        content: TemplateResolver::resolve(&template.content, lookup).template_err()?,
        topic: topic.name.clone(),
    })
}

pub fn generate_queries<R: Rng + ?Sized>(
    vocabulary: &Vocabulary,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Query>> {
    let queries_vocab = &vocabulary.queries;
    let mut queries = Vec::with_capacity(count);

    for _ in 0..count {
        let topic = pick(&queries_vocab.topics, "queries.topics", rng)?;
        let template = pick(&queries_vocab.templates, "queries.templates", rng)?;
        let text = fill_from_vocabulary(template, vocabulary, topic, rng)?;
        let department = pick(&queries_vocab.departments, "queries.departments", rng)?;

        queries.push(Query {
            text,
            department: department.clone(),
            user_mail: String::new(),
        });
    }

    Ok(queries)
}

pub fn generate_message_pairs<R: Rng + ?Sized>(
    vocabulary: &Vocabulary,
    count: usize,
    rng: &mut R,
) -> Result<Vec<MessagePair>> {
    let messages_vocab = &vocabulary.messages;
    let mut pairs = Vec::with_capacity(count);

    for _ in 0..count {
        let topic = pick(&vocabulary.queries.topics, "queries.topics", rng)?;

        let question_detail = question_detail(vocabulary, rng)?;
        let initial = TemplateResolver::resolve(&messages_vocab.opening, |slot| match slot {
            TOPIC_SLOT => Some(topic.clone()),
            QUESTION_DETAIL_SLOT => Some(question_detail.clone()),
            _ => None,
        })
        .template_err()?;

        let reply = pick(&messages_vocab.replies, "messages.replies", rng)?;
        let response = fill_from_vocabulary(reply, vocabulary, topic, rng)?;

        pairs.push(MessagePair { initial, response });
    }

    Ok(pairs)
}

/// `question_prefix` followed by a topic detail with the leading
/// "specifically" dropped, so it reads as a question.
fn question_detail<R: Rng + ?Sized>(vocabulary: &Vocabulary, rng: &mut R) -> Result<String> {
    let details = vocabulary.filler(TOPIC_DETAIL_FILLER).unwrap_or_default();
    let detail = pick(details, "fillers.topic_detail", rng)?;
    let detail = detail.replace("specifically", "");

    Ok(format!(
        "{}{}",
        vocabulary.messages.question_prefix,
        detail.trim()
    ))
}

/// Resolve `template` with `topic` bound and every other slot sampled from the
/// filler list of the same name.
fn fill_from_vocabulary<R: Rng + ?Sized>(
    template: &Template,
    vocabulary: &Vocabulary,
    topic: &str,
    rng: &mut R,
) -> Result<String> {
    TemplateResolver::resolve(template, |slot| {
        if slot == TOPIC_SLOT {
            Some(topic.to_string())
        } else {
            vocabulary
                .filler(slot)
                .and_then(|values| values.choose(&mut *rng))
                .cloned()
        }
    })
    .template_err()
}

fn pick<'a, T, R: Rng + ?Sized>(values: &'a [T], what: &str, rng: &mut R) -> Result<&'a T> {
    values
        .choose(rng)
        .ok_or_else(|| SeedError::Vocabulary(format!("{} must not be empty", what)))
}
