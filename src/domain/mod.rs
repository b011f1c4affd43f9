// Domain records produced by the generators and consumed by the seeders

pub mod template;

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Credentials for one of the users the populate job signs up
#[derive(Debug, Clone, PartialEq)]
pub struct UserSpec {
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
}

/// The fixed set of users created (or logged into) on every run
pub const SEED_USERS: [UserSpec; 4] = [
    UserSpec {
        email: "john.doe@example.com",
        password: "Password123!",
        name: "John Doe",
    },
    UserSpec {
        email: "jane.smith@example.com",
        password: "SecurePass456!",
        name: "Jane Smith",
    },
    UserSpec {
        email: "michael.johnson@example.com",
        password: "MJohnson789!",
        name: "Michael Johnson",
    },
    UserSpec {
        email: "sarah.williams@example.com",
        password: "Williams2024!",
        name: "Sarah Williams",
    },
];

/// Opaque user identifier as returned by the API.
///
/// The backend may hand out strings or numbers depending on its state, so the
/// JSON value is kept as-is and sent back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UserId(Value);

impl UserId {
    /// Wrap a JSON value, rejecting values that cannot identify anyone
    /// (`null`, `false`, `0`, `""` and empty containers).
    pub fn new(value: Value) -> Option<Self> {
        let usable = match &value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
        };
        usable.then_some(Self(value))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

/// A user whose id has been resolved through signup or login
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUser {
    pub id: UserId,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub title: String,
    pub content: String,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub text: String,
    pub department: String,
    /// Filled in when the query is assigned to a user
    pub user_mail: String,
}

/// One exchange between two users: the opening message and its reply
#[derive(Debug, Clone, PartialEq)]
pub struct MessagePair {
    pub initial: String,
    pub response: String,
}

/// A row of opaque random text for the table seeder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RandomRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Content")]
    pub content: String,
}
