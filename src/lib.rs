// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod ledger;
pub mod persistence;
pub mod trace_init;

pub use crate::config::Settings;
pub use crate::core::converter::transliterate;
pub use crate::core::engine::TranslateEngine;
pub use crate::core::types::{LanguageCode, LedgerEntry, Translation};
pub use crate::error::{EngineError, LookupError};
