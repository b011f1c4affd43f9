// Local SQLite table via sqlx

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use super::RowSink;
use crate::domain::RandomRow;
use crate::error::Result;

pub struct SqliteTable {
    pool: SqlitePool,
    table: String,
}

impl SqliteTable {
    /// Open (or create) the database at `db_path` and make sure `table` exists.
    pub async fn connect(db_path: &str, table: &str) -> Result<Self> {
        let database_url = if db_path == ":memory:" {
            "sqlite::memory:".to_string()
        } else {
            // Create the database file if it doesn't exist
            if !std::path::Path::new(db_path).exists() {
                std::fs::File::create(db_path)?;
            }
            format!("sqlite:{}", db_path)
        };

        // Rows are inserted strictly one after another, and a single
        // connection keeps an in-memory database alive for the pool's lifetime
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await?;

        Self::with_pool(pool, table).await
    }

    pub async fn with_pool(pool: SqlitePool, table: &str) -> Result<Self> {
        let create = format!(
            "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, \"Title\" TEXT NOT NULL, \"Content\" TEXT NOT NULL)",
            quote_ident(table)
        );
        sqlx::query(&create).execute(&pool).await?;

        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RowSink for SqliteTable {
    fn describe(&self) -> String {
        format!("sqlite table {}", self.table)
    }

    async fn insert(&self, row: &RandomRow) -> Result<()> {
        let insert = format!(
            "INSERT INTO {} (\"Title\", \"Content\") VALUES (?, ?)",
            quote_ident(&self.table)
        );
        sqlx::query(&insert)
            .bind(&row.title)
            .bind(&row.content)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
