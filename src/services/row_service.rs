// Row service - inserts random rows into a table sink

use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

use super::pace;
use crate::db::RowSink;
use crate::error::Result;
use crate::generator::generate_rows;

/// Generate `count` random rows and insert them one at a time.
///
/// The first failed insert aborts the run; rows already inserted stay.
pub async fn seed_rows<R: Rng + ?Sized>(
    sink: &dyn RowSink,
    count: usize,
    delay: Duration,
    rng: &mut R,
) -> Result<usize> {
    let rows = generate_rows(rng, count);
    info!("Inserting {} random rows into {}", rows.len(), sink.describe());

    for (i, row) in rows.iter().enumerate() {
        sink.insert(row).await?;
        debug!("Inserted row {}/{}: {}", i + 1, rows.len(), row.title);
        pace(delay).await;
    }

    info!("Inserted {} rows", rows.len());
    Ok(rows.len())
}
