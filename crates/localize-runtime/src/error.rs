use localize_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("invalid hash format")]
    InvalidHash,
    #[error("hash mismatch for {0}")]
    HashMismatch(String),
    #[error("language is not registered: {0}")]
    UnknownLanguage(String),
    #[error("single-language source {0} does not name a language")]
    MissingSourceLanguage(String),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
