pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod generator;
pub mod services;

use clap::{Arg, ArgMatches};
use std::path::{Path, PathBuf};

use api::ApiClient;
use config::vocabulary::Vocabulary;
use config::{PopulateConfig, RowTarget, RowsConfig};
use db::{PostgrestTable, RowSink, SqliteTable};
use domain::SEED_USERS;
use error::Result;
use generator::ROW_COUNT;
use services::{seed_rows, PopulateService, SeedReport};

/// Command-line interface: one subcommand per seeding job
pub fn build_cli() -> clap::Command {
    clap::Command::new("seeder")
        .about("Seed a web API and a database table with synthetic data")
        .subcommand_required(true)
        .arg(
            Arg::new("env_file")
                .long("env-file")
                .value_name("ENV_FILE")
                .help("Path to a .env file loaded before reading settings")
                .default_value(config::DEFAULT_ENV_FILE)
                .global(true),
        )
        .subcommand(
            clap::Command::new("populate")
                .about("Create users, posts, queries and messages through the API")
                .arg(
                    Arg::new("base_url")
                        .short('u')
                        .long("base-url")
                        .value_name("BASE_URL")
                        .help("API base URL [env: SEED_API_URL] [default: http://localhost:8000/api]"),
                )
                .arg(
                    Arg::new("vocabulary")
                        .short('v')
                        .long("vocabulary")
                        .value_name("VOCABULARY")
                        .help("Path to a YAML vocabulary replacing the built-in one"),
                ),
        )
        .subcommand(
            clap::Command::new("random-rows")
                .about("Insert random alphanumeric rows into a table")
                .arg(
                    Arg::new("url")
                        .long("url")
                        .value_name("URL")
                        .help("Supabase project URL [env: SUPABASE_URL] [default: http://localhost:8000]"),
                )
                .arg(
                    Arg::new("key")
                        .long("key")
                        .value_name("KEY")
                        .help("Supabase API key [env: SUPABASE_KEY]"),
                )
                .arg(
                    Arg::new("table")
                        .short('t')
                        .long("table")
                        .value_name("TABLE")
                        .help("Table to insert into")
                        .default_value(config::DEFAULT_TABLE),
                )
                .arg(
                    Arg::new("sqlite")
                        .long("sqlite")
                        .value_name("SQLITE")
                        .help("Insert into a local SQLite database file instead of Supabase"),
                ),
        )
}

/// Load the `.env` file named on the command line, if it exists.
pub fn load_env_file(matches: &ArgMatches) {
    let path = matches
        .get_one::<String>("env_file")
        .map(|s| s.as_str())
        .unwrap_or(config::DEFAULT_ENV_FILE);

    if Path::new(path).exists() {
        if let Err(e) = dotenvy::from_path(path) {
            eprintln!("Could not load {}: {}", path, e);
        }
    }
}

/// Command-line value, then environment variable, then default
fn setting(matches: &ArgMatches, id: &str, env_key: &str, default: &str) -> String {
    matches
        .get_one::<String>(id)
        .cloned()
        .or_else(|| std::env::var(env_key).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| default.to_string())
}

pub fn populate_config(matches: &ArgMatches) -> Result<PopulateConfig> {
    let base_url = setting(matches, "base_url", "SEED_API_URL", config::DEFAULT_API_URL);
    let mut populate = PopulateConfig::new(&base_url)?;
    if let Some(path) = matches.get_one::<String>("vocabulary") {
        populate = populate.with_vocabulary(PathBuf::from(path));
    }
    Ok(populate)
}

pub fn rows_config(matches: &ArgMatches) -> Result<RowsConfig> {
    let table = matches
        .get_one::<String>("table")
        .map(|s| s.as_str())
        .unwrap_or(config::DEFAULT_TABLE);

    let rows = match matches.get_one::<String>("sqlite") {
        Some(path) => RowsConfig::sqlite(path),
        None => {
            let url = setting(matches, "url", "SUPABASE_URL", config::DEFAULT_SUPABASE_URL);
            let key = setting(matches, "key", "SUPABASE_KEY", config::DEFAULT_SUPABASE_KEY);
            RowsConfig::postgrest(&url, &key)?
        }
    };
    Ok(rows.with_table(table))
}

/// Run the populate job against the configured API.
pub async fn run_populate(populate: &PopulateConfig) -> Result<SeedReport> {
    let custom;
    let vocabulary = match &populate.vocabulary {
        Some(path) => {
            custom = Vocabulary::from_path(path)?;
            &custom
        }
        None => Vocabulary::builtin(),
    };

    let service = PopulateService::new(
        ApiClient::new(populate.base_url.clone()),
        vocabulary,
        populate.pacing,
    );
    let mut rng = rand::rng();
    service.run(&SEED_USERS, &mut rng).await
}

/// Run the random-row job against the configured table.
pub async fn run_random_rows(rows: &RowsConfig) -> Result<usize> {
    let sink: Box<dyn RowSink> = match &rows.target {
        RowTarget::Postgrest { url, key } => Box::new(PostgrestTable::new(url, key, &rows.table)?),
        RowTarget::Sqlite { path } => Box::new(SqliteTable::connect(path, &rows.table).await?),
    };

    let mut rng = rand::rng();
    seed_rows(&*sink, ROW_COUNT, rows.pacing.after_row, &mut rng).await
}

/// Dispatch the parsed command line to the matching job.
pub async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    use anyhow::Context;

    match matches.subcommand() {
        Some(("populate", sub)) => {
            let populate = populate_config(sub).context("Invalid populate settings")?;
            let report = run_populate(&populate).await.context("Populate failed")?;
            tracing::info!(
                users = report.users.len(),
                posts = report.posts.created,
                queries = report.queries.created,
                messages = report.messages.created,
                "Seeding summary"
            );
        }
        Some(("random-rows", sub)) => {
            let rows = rows_config(sub).context("Invalid random-rows settings")?;
            run_random_rows(&rows).await.context("Random-row seeding failed")?;
        }
        _ => anyhow::bail!("Unknown command"),
    }

    Ok(())
}
