// File: src/core/dictionary.rs
use crate::core::types::{DictionaryEntry, EntryKey, LanguageCode};
use crate::error::LookupError;
use std::collections::HashMap;

/// Read-only word store: entry key -> per-language spellings, in definition order.
///
/// An index from (language, lowercased spelling) to entry position is built on
/// insert. Slots are never overwritten, so the first entry defined wins.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<(EntryKey, DictionaryEntry)>,
    positions: HashMap<EntryKey, usize>,
    index: HashMap<(LanguageCode, String), usize>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. A repeated key is ignored; the earlier definition stays.
    pub fn insert(&mut self, key: impl Into<EntryKey>, entry: DictionaryEntry) -> bool {
        let key = key.into();
        if self.positions.contains_key(&key) {
            return false;
        }
        let pos = self.entries.len();
        for (lang, spelling) in entry.spellings() {
            self.index.entry((lang, spelling.to_lowercase())).or_insert(pos);
        }
        self.positions.insert(key.clone(), pos);
        self.entries.push((key, entry));
        true
    }

    /// Finds the entry whose `lang` spelling equals `word`, ignoring case.
    pub fn resolve(&self, word: &str, lang: LanguageCode) -> Result<&EntryKey, LookupError> {
        self.index
            .get(&(lang, word.to_lowercase()))
            .map(|&pos| &self.entries[pos].0)
            .ok_or_else(|| LookupError::NotFound { word: word.to_string(), lang })
    }

    /// The raw spelling of `key` in `lang`.
    pub fn spelling(&self, key: &str, lang: LanguageCode) -> Result<&str, LookupError> {
        self.get(key)
            .and_then(|entry| entry.spelling(lang))
            .ok_or_else(|| LookupError::MissingTranslation { key: key.to_string(), lang })
    }

    pub fn get(&self, key: &str) -> Option<&DictionaryEntry> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntryKey, &DictionaryEntry)> {
        self.entries.iter().map(|(k, e)| (k, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<EntryKey>> FromIterator<(K, DictionaryEntry)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, DictionaryEntry)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for (key, entry) in iter {
            dict.insert(key, entry);
        }
        dict
    }
}
