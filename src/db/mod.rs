// Table sinks for the random-row seeder

pub mod postgrest;
pub mod sqlite;

use async_trait::async_trait;

use crate::domain::RandomRow;
use crate::error::Result;

pub use postgrest::PostgrestTable;
pub use sqlite::SqliteTable;

/// A table that random rows can be inserted into, one at a time
#[async_trait]
pub trait RowSink: Send + Sync {
    /// Human-readable target for log lines
    fn describe(&self) -> String;

    async fn insert(&self, row: &RandomRow) -> Result<()>;
}
