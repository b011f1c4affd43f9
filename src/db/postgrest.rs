// Supabase/PostgREST table endpoint

use async_trait::async_trait;
use url::Url;

use super::RowSink;
use crate::config;
use crate::domain::RandomRow;
use crate::error::{Result, SeedError};

pub struct PostgrestTable {
    http: reqwest::Client,
    endpoint: Url,
    key: String,
}

impl PostgrestTable {
    /// `project_url` is the project root; rows go to `{project_url}/rest/v1/{table}`.
    pub fn new(project_url: &Url, key: &str, table: &str) -> Result<Self> {
        if !is_plain_table_name(table) {
            return Err(SeedError::Config(format!("Invalid table name '{}'", table)));
        }
        let endpoint = config::join(project_url, &format!("rest/v1/{}", table))?;

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            key: key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RowSink for PostgrestTable {
    fn describe(&self) -> String {
        self.endpoint.to_string()
    }

    async fn insert(&self, row: &RandomRow) -> Result<()> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(SeedError::Status {
                url: self.endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Only `[A-Za-z0-9_]`, so the name can't escape its path segment
fn is_plain_table_name(table: &str) -> bool {
    !table.is_empty() && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
