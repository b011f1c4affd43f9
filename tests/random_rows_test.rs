// Integration tests for the random-row job

mod common;

use common::{reply, MockApi};
use rand::rngs::StdRng;
use rand::SeedableRng;
use seeder::config::{Pacing, RowsConfig};
use seeder::db::{RowSink, SqliteTable};
use seeder::error::SeedError;
use seeder::generator::{ROW_CONTENT_LEN, ROW_COUNT, ROW_TITLE_LEN};
use seeder::services::seed_rows;
use serde_json::json;
use sqlx::Row;
use std::time::Duration;

#[tokio::test]
async fn test_postgrest_rows_are_posted_with_api_key() {
    let api = MockApi::builder()
        .route("/rest/v1/Posts", |_| (201, String::new()))
        .spawn()
        .await;

    let config = RowsConfig::postgrest(&api.url(), "test-key")
        .unwrap()
        .with_pacing(Pacing::none());
    let inserted = seeder::run_random_rows(&config).await.unwrap();

    assert_eq!(inserted, ROW_COUNT);

    let requests = api.requests_to("/rest/v1/Posts");
    assert_eq!(requests.len(), ROW_COUNT);
    for request in &requests {
        assert_eq!(request.method, "POST");
        assert_eq!(request.headers.get("apikey").map(String::as_str), Some("test-key"));
        assert_eq!(
            request.headers.get("authorization").map(String::as_str),
            Some("Bearer test-key")
        );
        assert_eq!(
            request.headers.get("prefer").map(String::as_str),
            Some("return=minimal")
        );

        let title = request.body["Title"].as_str().unwrap();
        let content = request.body["Content"].as_str().unwrap();
        assert_eq!(title.len(), ROW_TITLE_LEN);
        assert_eq!(content.len(), ROW_CONTENT_LEN);
        assert!(title.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}

#[tokio::test]
async fn test_postgrest_custom_table() {
    let api = MockApi::builder().spawn().await;

    let config = RowsConfig::postgrest(&api.url(), "k")
        .unwrap()
        .with_table("Drafts")
        .with_pacing(Pacing::none());
    seeder::run_random_rows(&config).await.unwrap();

    assert_eq!(api.requests_to("/rest/v1/Drafts").len(), ROW_COUNT);
}

#[tokio::test]
async fn test_postgrest_rejection_aborts_run() {
    let api = MockApi::builder()
        .route("/rest/v1/Posts", |_| {
            reply(401, json!({"message": "Invalid API key"}))
        })
        .spawn()
        .await;

    let config = RowsConfig::postgrest(&api.url(), "wrong")
        .unwrap()
        .with_pacing(Pacing::none());
    let result = seeder::run_random_rows(&config).await;

    match result {
        Err(SeedError::Status { status, body, .. }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("Expected status error, got {:?}", other),
    }
    assert_eq!(api.requests().len(), 1);
}

#[tokio::test]
async fn test_sqlite_rows_are_inserted() {
    let table = SqliteTable::connect(":memory:", "Posts").await.unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let inserted = seed_rows(&table, ROW_COUNT, Duration::ZERO, &mut rng)
        .await
        .unwrap();
    assert_eq!(inserted, ROW_COUNT);

    let rows = sqlx::query("SELECT \"Title\", \"Content\" FROM \"Posts\"")
        .fetch_all(table.pool())
        .await
        .unwrap();
    assert_eq!(rows.len(), ROW_COUNT);
    for row in &rows {
        assert_eq!(row.get::<String, _>("Title").len(), ROW_TITLE_LEN);
        assert_eq!(row.get::<String, _>("Content").len(), ROW_CONTENT_LEN);
    }
}

#[tokio::test]
async fn test_sqlite_file_target() {
    let db_path = common::temp_path("seeder_rows", "db");
    let db_path = db_path.to_str().unwrap().to_string();

    let config = RowsConfig::sqlite(&db_path).with_pacing(Pacing::none());
    seeder::run_random_rows(&config).await.unwrap();
    seeder::run_random_rows(&config).await.unwrap();

    let table = SqliteTable::connect(&db_path, "Posts").await.unwrap();
    assert!(table.describe().contains("Posts"));
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM \"Posts\"")
        .fetch_one(table.pool())
        .await
        .unwrap();
    assert_eq!(count, (ROW_COUNT * 2) as i64);

    drop(table);
    let _ = std::fs::remove_file(&db_path);
}
