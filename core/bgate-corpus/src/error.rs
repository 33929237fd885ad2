use bgate_parser::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response status {0}")]
    Status(u16),

    #[error("unexpected page structure: {0}")]
    MalformedPage(String),

    #[error("translation not downloaded: {0}")]
    TranslationNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CorpusError>;
