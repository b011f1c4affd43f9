// Runtime configuration for the two seeding jobs

pub mod vocabulary;

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::{Result, SeedError};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_SUPABASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_SUPABASE_KEY: &str = "None";
pub const DEFAULT_TABLE: &str = "Posts";
pub const DEFAULT_ENV_FILE: &str = "backend/.env";

/// Fixed delays between requests so the target service is not overwhelmed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    pub after_post: Duration,
    pub after_query: Duration,
    pub after_message_pair: Duration,
    pub after_row: Duration,
}

impl Pacing {
    /// No delays at all, for tests against local mocks
    pub fn none() -> Self {
        Self {
            after_post: Duration::ZERO,
            after_query: Duration::ZERO,
            after_message_pair: Duration::ZERO,
            after_row: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            after_post: Duration::from_millis(200),
            after_query: Duration::from_millis(200),
            after_message_pair: Duration::from_millis(300),
            after_row: Duration::from_secs(1),
        }
    }
}

/// Settings for `seeder populate`
#[derive(Debug, Clone)]
pub struct PopulateConfig {
    pub base_url: Url,
    pub vocabulary: Option<PathBuf>,
    pub pacing: Pacing,
}

impl PopulateConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            vocabulary: None,
            pacing: Pacing::default(),
        })
    }

    pub fn with_vocabulary(mut self, path: PathBuf) -> Self {
        self.vocabulary = Some(path);
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Where random rows are inserted
#[derive(Debug, Clone, PartialEq)]
pub enum RowTarget {
    /// A Supabase/PostgREST project
    Postgrest { url: Url, key: String },
    /// A local SQLite database file
    Sqlite { path: String },
}

/// Settings for `seeder random-rows`
#[derive(Debug, Clone)]
pub struct RowsConfig {
    pub target: RowTarget,
    pub table: String,
    pub pacing: Pacing,
}

impl RowsConfig {
    pub fn postgrest(url: &str, key: &str) -> Result<Self> {
        Ok(Self {
            target: RowTarget::Postgrest {
                url: parse_base_url(url)?,
                key: key.to_string(),
            },
            table: DEFAULT_TABLE.to_string(),
            pacing: Pacing::default(),
        })
    }

    pub fn sqlite(path: &str) -> Self {
        Self {
            target: RowTarget::Sqlite {
                path: path.to_string(),
            },
            table: DEFAULT_TABLE.to_string(),
            pacing: Pacing::default(),
        }
    }

    pub fn with_table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Parse an http(s) base URL, making sure its path ends in `/` so later
/// joins append to it instead of replacing the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)
        .map_err(|e| SeedError::Config(format!("Invalid base URL '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SeedError::Config(format!(
            "Base URL '{}' must use http or https",
            raw
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Join an endpoint path such as `auth/signup` onto a base URL
pub fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path.trim_start_matches('/'))
        .map_err(|e| SeedError::Config(format!("Invalid endpoint '{}': {}", path, e)))
}
