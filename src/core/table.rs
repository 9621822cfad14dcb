// File: src/core/table.rs
use crate::core::types::Script;
use crate::error::TableError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

pub const CYRILLIC_TOML: &str = include_str!("tables/cyrillic.toml");
pub const GREEK_TOML: &str = include_str!("tables/greek.toml");

#[derive(Deserialize)]
struct TableConfig {
    name: Option<String>,
    max_match: Option<usize>,
    mappings: BTreeMap<String, String>,
}

/// Latin substring -> target-script output, plus the longest key length
/// the scanner should try at each position.
#[derive(Debug, Clone)]
pub struct TransliterationTable {
    name: String,
    max_match: usize,
    rules: HashMap<String, String>,
}

impl TransliterationTable {
    /// Builds a table whose `max_match` is its longest key.
    /// An empty table is allowed and maps nothing.
    pub fn from_pairs<K, V>(
        name: &str,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, TableError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut rules = HashMap::new();
        for (key, value) in pairs {
            let (key, value) = (key.into(), value.into());
            if key.is_empty() {
                return Err(TableError::EmptyKey);
            }
            if value.is_empty() {
                return Err(TableError::EmptyValue(key));
            }
            rules.insert(key, value);
        }
        let max_match = rules.keys().map(|k| k.chars().count()).max().unwrap_or(0);
        Ok(Self { name: name.to_string(), max_match, rules })
    }

    /// Caps the match length. Keys longer than `max_match` would never be tried,
    /// so they are rejected.
    pub fn with_max_match(mut self, max_match: usize) -> Result<Self, TableError> {
        if max_match == 0 {
            return Err(TableError::ZeroMaxMatch);
        }
        if let Some(key) = self.rules.keys().find(|k| k.chars().count() > max_match) {
            return Err(TableError::KeyTooLong { key: key.clone(), max_match });
        }
        self.max_match = max_match;
        Ok(self)
    }

    /// Parses a table from TOML text (`name`, `max_match`, `[mappings]`).
    pub fn from_toml_str(toml_str: &str) -> Result<Self, TableError> {
        let config: TableConfig =
            toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;
        if config.mappings.is_empty() {
            return Err(TableError::Empty);
        }
        let name = config.name.unwrap_or_else(|| "custom".to_string());
        let table = Self::from_pairs(&name, config.mappings)?;
        match config.max_match {
            Some(n) => table.with_max_match(n),
            None => Ok(table),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_match(&self) -> usize {
        self.max_match
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.rules.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The rendering tables for every non-Latin script.
#[derive(Debug, Clone)]
pub struct ScriptTables {
    cyrillic: TransliterationTable,
    greek: TransliterationTable,
}

impl ScriptTables {
    pub fn new(cyrillic: TransliterationTable, greek: TransliterationTable) -> Self {
        Self { cyrillic, greek }
    }

    /// The tables compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            cyrillic: TransliterationTable::from_toml_str(CYRILLIC_TOML)
                .expect("built-in cyrillic table must be valid"),
            greek: TransliterationTable::from_toml_str(GREEK_TOML)
                .expect("built-in greek table must be valid"),
        }
    }

    /// `None` for Latin: those spellings are shown as-is.
    pub fn table_for(&self, script: Script) -> Option<&TransliterationTable> {
        match script {
            Script::Latin => None,
            Script::Cyrillic => Some(&self.cyrillic),
            Script::Greek => Some(&self.greek),
        }
    }

    pub fn set_table(&mut self, script: Script, table: TransliterationTable) {
        match script {
            Script::Latin => {}
            Script::Cyrillic => self.cyrillic = table,
            Script::Greek => self.greek = table,
        }
    }
}

impl Default for ScriptTables {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_parse() {
        let cyrillic = TransliterationTable::from_toml_str(CYRILLIC_TOML).unwrap();
        assert_eq!(cyrillic.name(), "cyrillic");
        assert_eq!(cyrillic.max_match(), 3);
        assert_eq!(cyrillic.get("sht"), Some("щ"));
        assert_eq!(cyrillic.len(), 29);

        let greek = TransliterationTable::from_toml_str(GREEK_TOML).unwrap();
        assert_eq!(greek.max_match(), 2);
        assert_eq!(greek.get("b"), Some("μπ"));
        assert_eq!(greek.get("ps"), Some("ψ"));
    }

    #[test]
    fn max_match_defaults_to_longest_key() {
        let toml = r#"
[mappings]
a = "а"
sch = "щ"
"#;
        let table = TransliterationTable::from_toml_str(toml).unwrap();
        assert_eq!(table.max_match(), 3);
        assert_eq!(table.name(), "custom");
    }

    #[test]
    fn key_lengths_count_chars_not_bytes() {
        let table = TransliterationTable::from_pairs("t", [("ç", "ч")]).unwrap();
        assert_eq!(table.max_match(), 1);
    }

    #[test]
    fn error_empty_mappings() {
        let err = TransliterationTable::from_toml_str("[mappings]\n").unwrap_err();
        assert!(matches!(err, TableError::Empty));
    }

    #[test]
    fn error_empty_value() {
        let toml = r#"
[mappings]
a = ""
"#;
        let err = TransliterationTable::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, TableError::EmptyValue(_)));
    }

    #[test]
    fn error_key_longer_than_max_match() {
        let toml = r#"
max_match = 2
[mappings]
sht = "щ"
"#;
        let err = TransliterationTable::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, TableError::KeyTooLong { max_match: 2, .. }));
    }

    #[test]
    fn error_zero_max_match() {
        let toml = r#"
max_match = 0
[mappings]
a = "α"
"#;
        let err = TransliterationTable::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, TableError::ZeroMaxMatch));
    }

    #[test]
    fn error_invalid_toml() {
        let err = TransliterationTable::from_toml_str("not valid toml {{{").unwrap_err();
        assert!(matches!(err, TableError::Parse(_)));
    }

    #[test]
    fn latin_has_no_table() {
        let tables = ScriptTables::builtin();
        assert!(tables.table_for(Script::Latin).is_none());
        assert_eq!(tables.table_for(Script::Greek).unwrap().name(), "greek");
    }
}
