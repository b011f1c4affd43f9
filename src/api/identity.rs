// User id extraction from signup/login responses

use serde_json::{Map, Value};

use crate::domain::UserId;

/// Where a user id may live in a response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRule {
    /// `body[parent][key]`
    Nested {
        parent: &'static str,
        key: &'static str,
    },
    /// `body[key]`
    TopLevel(&'static str),
    /// The first key of `body[parent]`, in document order, whose lowercase
    /// form contains `needle`
    NestedContaining {
        parent: &'static str,
        needle: &'static str,
    },
}

/// Probed in order; the first rule whose key is present wins, even when its
/// value turns out to be unusable.
pub const USER_ID_RULES: [IdRule; 6] = [
    IdRule::Nested {
        parent: "user",
        key: "user_id",
    },
    IdRule::TopLevel("userId"),
    IdRule::TopLevel("user_id"),
    IdRule::Nested {
        parent: "user",
        key: "id",
    },
    IdRule::TopLevel("id"),
    IdRule::NestedContaining {
        parent: "user",
        needle: "id",
    },
];

impl IdRule {
    pub fn apply<'a>(&self, body: &'a Map<String, Value>) -> Option<&'a Value> {
        match *self {
            IdRule::Nested { parent, key } => body.get(parent)?.as_object()?.get(key),
            IdRule::TopLevel(key) => body.get(key),
            IdRule::NestedContaining { parent, needle } => body
                .get(parent)?
                .as_object()?
                .iter()
                .find(|(key, _)| key.to_lowercase().contains(needle))
                .map(|(_, value)| value),
        }
    }
}

/// Return the value selected by the first matching rule.
pub fn find_user_id(body: &Value) -> Option<&Value> {
    let object = body.as_object()?;
    USER_ID_RULES.iter().find_map(|rule| rule.apply(object))
}

/// Parse a raw response body and pull the user id out of it.
///
/// Never fails: malformed JSON, a missing id or an unusable id all yield
/// `None` and log the body.
pub fn extract_user_id(raw: &str) -> Option<UserId> {
    let body: Value = match serde_json::from_str(raw) {
        Ok(body) => body,
        Err(_) => {
            tracing::warn!("Could not parse JSON response: {}", raw);
            return None;
        }
    };

    match find_user_id(&body) {
        Some(value) => {
            let id = UserId::new(value.clone());
            if id.is_none() {
                tracing::warn!("User ID in response is empty: {}", body);
            }
            id
        }
        None => {
            tracing::warn!("Could not find user ID in response: {}", body);
            None
        }
    }
}
