// File: src/persistence.rs
use crate::core::dictionary::Dictionary;
use crate::core::types::{DictionaryEntry, LanguageCode, LedgerEntry};
use crate::error::StoreError;
use crate::ledger::{LedgerKind, LedgerStore};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Loads the dictionary, degrading to an empty one when the file is
/// missing or unusable.
pub fn load_dictionary(path: &Path) -> Dictionary {
    match read_dictionary(path) {
        Ok(dict) => {
            debug!(path = %path.display(), entries = dict.len(), "dictionary loaded");
            dict
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "dictionary unavailable, using an empty one");
            Dictionary::new()
        }
    }
}

pub fn read_dictionary(path: &Path) -> Result<Dictionary, StoreError> {
    let text = fs::read_to_string(path)?;
    parse_dictionary(&text)
}

/// Parses `{ "<key>": { "<lang>": "<spelling>", ... }, ... }` keeping file order.
///
/// Malformed entries and spellings are skipped; only a document that is not
/// a JSON object at all is an error.
pub fn parse_dictionary(json: &str) -> Result<Dictionary, StoreError> {
    // Files saved by some editors start with a BOM.
    let value: Value = serde_json::from_str(json.trim_start_matches('\u{feff}'))?;
    let Value::Object(map) = value else {
        return Err(StoreError::Unavailable("dictionary root is not a JSON object".into()));
    };

    let mut dict = Dictionary::new();
    for (key, spellings) in map {
        let Value::Object(spellings) = spellings else {
            warn!(key = %key, "skipping dictionary entry that is not an object");
            continue;
        };
        let mut entry = DictionaryEntry::new();
        for (code, spelling) in spellings {
            let Ok(lang) = code.parse::<LanguageCode>() else {
                debug!(key = %key, code = %code, "ignoring unsupported language");
                continue;
            };
            match spelling {
                Value::String(s) => entry.insert(lang, s),
                other => warn!(key = %key, code = %code, value = %other, "skipping non-string spelling"),
            }
        }
        dict.insert(key, entry);
    }
    Ok(dict)
}

/// Replaces `path` with the pretty-printed JSON of `value`. The data goes to a
/// temp file in the same directory first, so a failed write leaves the old file.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// The history and favorites collections as two JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    history_path: PathBuf,
    favorites_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(history_path: impl Into<PathBuf>, favorites_path: impl Into<PathBuf>) -> Self {
        Self { history_path: history_path.into(), favorites_path: favorites_path.into() }
    }

    pub fn path(&self, kind: LedgerKind) -> &Path {
        match kind {
            LedgerKind::History => &self.history_path,
            LedgerKind::Favorites => &self.favorites_path,
        }
    }
}

impl LedgerStore for JsonFileStore {
    /// A missing file is an empty collection; a malformed one is an error.
    fn load(&self, kind: LedgerKind) -> Result<Vec<LedgerEntry>, StoreError> {
        let text = match fs::read_to_string(self.path(kind)) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(text.trim_start_matches('\u{feff}'))?)
    }

    fn save(&mut self, kind: LedgerKind, entries: &[LedgerEntry]) -> Result<(), StoreError> {
        save_json(self.path(kind), entries)
    }
}

/// In-process store. Nothing touches the file system.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: HashMap<LedgerKind, Vec<LedgerEntry>>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one collection.
    pub fn with(kind: LedgerKind, entries: Vec<LedgerEntry>) -> Self {
        let mut store = Self::new();
        store.collections.insert(kind, entries);
        store
    }

    /// What the last `save` for `kind` wrote, if any collection is held.
    pub fn saved(&self, kind: LedgerKind) -> Option<&[LedgerEntry]> {
        self.collections.get(&kind).map(Vec::as_slice)
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self, kind: LedgerKind) -> Result<Vec<LedgerEntry>, StoreError> {
        Ok(self.collections.get(&kind).cloned().unwrap_or_default())
    }

    fn save(&mut self, kind: LedgerKind, entries: &[LedgerEntry]) -> Result<(), StoreError> {
        self.collections.insert(kind, entries.to_vec());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(input: &str) -> LedgerEntry {
        LedgerEntry {
            from: LanguageCode::Tr,
            to: LanguageCode::El,
            input: input.to_string(),
            output: "νερο".to_string(),
            pronunciation: "nero".to_string(),
        }
    }

    #[test]
    fn parse_keeps_definition_order_and_skips_bad_values() {
        let json = r#"{
            "zebra": {"tr": "zebra", "de": "Zebra"},
            "apple": {"tr": "elma", "ru": 5, "fr": "pomme"},
            "broken": "not an object"
        }"#;
        let dict = parse_dictionary(json).unwrap();
        let keys: Vec<&str> = dict.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zebra", "apple"]);
        let apple = dict.get("apple").unwrap();
        assert_eq!(apple.spelling(LanguageCode::Tr), Some("elma"));
        assert_eq!(apple.spelling(LanguageCode::Ru), None);
    }

    #[test]
    fn parse_accepts_bom() {
        let dict = parse_dictionary("\u{feff}{\"a\": {\"tr\": \"su\"}}").unwrap();
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn parse_rejects_non_object_root() {
        assert!(matches!(parse_dictionary("[1, 2]"), Err(StoreError::Unavailable(_))));
        assert!(matches!(parse_dictionary("{oops"), Err(StoreError::Json(_))));
    }

    #[test]
    fn missing_or_corrupt_dictionary_is_empty() {
        let dir = tempdir().unwrap();
        assert!(load_dictionary(&dir.path().join("nope.json")).is_empty());

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{ not json").unwrap();
        assert!(load_dictionary(&corrupt).is_empty());
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("h.json"), dir.path().join("f.json"));
        assert!(store.load(LedgerKind::History).unwrap().is_empty());

        store.save(LedgerKind::History, &[entry("su")]).unwrap();
        assert_eq!(store.load(LedgerKind::History).unwrap(), vec![entry("su")]);
        assert!(store.load(LedgerKind::Favorites).unwrap().is_empty());

        let text = fs::read_to_string(dir.path().join("h.json")).unwrap();
        assert!(text.contains("\"pron\": \"nero\""));
        assert!(text.contains("νερο"), "non-ASCII must be written as-is");
    }

    #[test]
    fn file_store_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("f.json");
        let mut store = JsonFileStore::new(dir.path().join("h.json"), &nested);
        store.save(LedgerKind::Favorites, &[entry("ev")]).unwrap();
        assert!(nested.exists());
    }

    #[test]
    fn malformed_ledger_file_is_an_error() {
        let dir = tempdir().unwrap();
        let history = dir.path().join("h.json");
        fs::write(&history, r#"[{"input": "su"}]"#).unwrap();
        let store = JsonFileStore::new(&history, dir.path().join("f.json"));
        assert!(matches!(store.load(LedgerKind::History), Err(StoreError::Json(_))));
    }
}
