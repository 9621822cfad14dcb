// File: src/error.rs
use crate::core::types::{EntryKey, LanguageCode, Translation};
use thiserror::Error;

/// Why a lookup produced no translation. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("'{word}' is not in the dictionary for '{lang}'")]
    NotFound { word: String, lang: LanguageCode },
    #[error("entry '{key}' has no spelling for '{lang}'")]
    MissingTranslation { key: EntryKey, lang: LanguageCode },
    #[error("unsupported language code: '{0}'")]
    UnsupportedLanguage(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The store exists but its content cannot be used.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("empty key")]
    EmptyKey,
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("key '{key}' is longer than max_match = {max_match}")]
    KeyTooLong { key: String, max_match: usize },
    #[error("max_match must be at least 1")]
    ZeroMaxMatch,
    #[error("cannot read table file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("table '{path}': {source}")]
    Table { path: String, source: TableError },
}

/// A failed lookup, or a successful one whose history record could not be written.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// The lookup succeeded; `translation` is still valid.
    #[error("history not saved: {source}")]
    HistoryNotSaved {
        translation: Box<Translation>,
        #[source]
        source: StoreError,
    },
}
