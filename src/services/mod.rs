// Seeding jobs built on the generators, the API client and the row sinks

pub mod populate_service;
pub mod row_service;

use std::time::Duration;

pub use populate_service::{PopulateService, SeedReport};
pub use row_service::seed_rows;

/// Sleep for a pacing delay; zero delays return immediately.
pub(crate) async fn pace(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
