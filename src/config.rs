// File: src/config.rs
//! Settings loaded from TOML. Every section and field is optional; anything
//! left out takes the value in `default_settings.toml`.

use crate::core::table::{ScriptTables, TransliterationTable};
use crate::core::types::Script;
use crate::error::SettingsError;
use crate::ledger::DEFAULT_HISTORY_LIMIT;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub ledger: LedgerSettings,
    pub tables: TableSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub dictionary: PathBuf,
    pub history: PathBuf,
    pub favorites: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            dictionary: PathBuf::from("sozluk.json"),
            history: PathBuf::from("gecmis.json"),
            favorites: PathBuf::from("favoriler.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    pub history_limit: usize,
    /// How many history entries the console shows.
    pub recent: usize,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self { history_limit: DEFAULT_HISTORY_LIMIT, recent: 5 }
    }
}

/// Optional replacement tables, one TOML file per script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub cyrillic: Option<PathBuf>,
    pub greek: Option<PathBuf>,
}

impl Settings {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, SettingsError> {
        let settings: Settings =
            toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Resolves relative data paths against `dir`.
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        for path in [&mut self.paths.dictionary, &mut self.paths.history, &mut self.paths.favorites] {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
        self
    }

    /// The built-in tables with any configured replacements applied.
    pub fn load_tables(&self) -> Result<ScriptTables, SettingsError> {
        let mut tables = ScriptTables::builtin();
        let overrides = [
            (Script::Cyrillic, &self.tables.cyrillic),
            (Script::Greek, &self.tables.greek),
        ];
        for (script, path) in overrides {
            let Some(path) = path else { continue };
            let table = TransliterationTable::from_file(path).map_err(|source| {
                SettingsError::Table { path: path.display().to_string(), source }
            })?;
            debug!(?script, table = table.name(), rules = table.len(), "custom table loaded");
            tables.set_table(script, table);
        }
        Ok(tables)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.ledger.history_limit == 0 {
            return Err(invalid("ledger.history_limit", "must be > 0"));
        }
        if self.ledger.recent == 0 {
            return Err(invalid("ledger.recent", "must be > 0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue { field: field.to_string(), reason: reason.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn embedded_defaults_match_default_impl() {
        let parsed = Settings::from_toml_str(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(parsed, Settings::default());
        assert_eq!(parsed.ledger.history_limit, 200);
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let settings = Settings::from_toml_str("[ledger]\nrecent = 20\n").unwrap();
        assert_eq!(settings.ledger.recent, 20);
        assert_eq!(settings.ledger.history_limit, 200);
        assert_eq!(settings.paths.favorites, PathBuf::from("favoriler.json"));
    }

    #[test]
    fn zero_history_limit_is_rejected() {
        let err = Settings::from_toml_str("[ledger]\nhistory_limit = 0\n").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = Settings::from_toml_str("[ledger\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn data_dir_applies_to_relative_paths_only() {
        let mut settings = Settings::default();
        settings.paths.history = PathBuf::from("/var/h.json");
        let settings = settings.with_data_dir(Path::new("/data"));
        assert_eq!(settings.paths.dictionary, PathBuf::from("/data/sozluk.json"));
        assert_eq!(settings.paths.history, PathBuf::from("/var/h.json"));
    }

    #[test]
    fn custom_table_replaces_builtin() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("greek.toml");
        fs::write(&path, "[mappings]\nb = \"β\"\n").unwrap();

        let mut settings = Settings::default();
        settings.tables.greek = Some(path);
        let tables = settings.load_tables().unwrap();
        assert_eq!(tables.table_for(Script::Greek).unwrap().get("b"), Some("β"));
        assert_eq!(tables.table_for(Script::Cyrillic).unwrap().get("sht"), Some("щ"));
    }

    #[test]
    fn broken_custom_table_names_the_file() {
        let mut settings = Settings::default();
        settings.tables.cyrillic = Some(PathBuf::from("/nonexistent/cyr.toml"));
        let err = settings.load_tables().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/cyr.toml"));
    }
}
