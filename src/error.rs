use thiserror::Error;

/// Failures outside the session core. Typing itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("word list `{0}` not found")]
    LanguageNotFound(String),

    #[error("word list `{name}` is not valid utf-8")]
    LanguageEncoding { name: String },

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
