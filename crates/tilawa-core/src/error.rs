use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Quran API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("Invalid bookmark id: {0}")]
    InvalidBookmarkId(String),

    #[error("Invalid surah number: {0} (expected 1-114)")]
    InvalidSurah(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
