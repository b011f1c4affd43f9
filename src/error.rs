// Error handling for the seeders

use thiserror::Error;

/// Errors raised while generating or submitting seed data
#[derive(Error, Debug)]
pub enum SeedError {
    /// Transport-level HTTP failure (connection refused, bad body, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-2xx status
    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Neither signup nor login produced a single usable user
    #[error("No users created or found")]
    NoUsers,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SeedError>;

// Extension trait for template result handling
pub trait TemplateResultExt<T> {
    /// Convert template errors to SeedError::Template
    fn template_err(self) -> Result<T>;
}

impl<T> TemplateResultExt<T> for anyhow::Result<T> {
    fn template_err(self) -> Result<T> {
        self.map_err(|e| SeedError::Template(e.to_string()))
    }
}
