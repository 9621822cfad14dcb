// File: src/core/engine.rs
use crate::config::Settings;
use crate::core::converter::transliterate;
use crate::core::dictionary::Dictionary;
use crate::core::table::ScriptTables;
use crate::core::types::{LanguageCode, LedgerEntry, Translation};
use crate::error::{EngineError, LookupError, SettingsError, StoreError};
use crate::ledger::{LedgerStore, SessionLedger};
use crate::persistence::{load_dictionary, JsonFileStore};
use tracing::{debug, info};

/// One translation session: the dictionary, the rendering tables and the
/// ledger, passed around explicitly instead of living in globals.
pub struct TranslateEngine<S> {
    dictionary: Dictionary,
    tables: ScriptTables,
    ledger: SessionLedger<S>,
    last: Option<LedgerEntry>,
}

impl TranslateEngine<JsonFileStore> {
    /// Wires the file-backed collaborators named in `settings`.
    pub fn open(settings: &Settings) -> Result<Self, SettingsError> {
        let tables = settings.load_tables()?;
        let dictionary = load_dictionary(&settings.paths.dictionary);
        let store = JsonFileStore::new(&settings.paths.history, &settings.paths.favorites);
        let ledger = SessionLedger::with_history_limit(store, settings.ledger.history_limit);
        info!(entries = dictionary.len(), "translation session opened");
        Ok(Self::new(dictionary, tables, ledger))
    }
}

impl<S: LedgerStore> TranslateEngine<S> {
    pub fn new(dictionary: Dictionary, tables: ScriptTables, ledger: SessionLedger<S>) -> Self {
        Self { dictionary, tables, ledger, last: None }
    }

    /// Looks `word` up with language codes as typed by the user.
    /// Codes are checked before anything else; a failed lookup records nothing.
    pub fn lookup_and_transliterate(
        &mut self,
        word: &str,
        source: &str,
        target: &str,
    ) -> Result<Translation, EngineError> {
        let from: LanguageCode = source.parse()?;
        let to: LanguageCode = target.parse()?;
        self.lookup(word, from, to)
    }

    pub fn lookup(
        &mut self,
        word: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, EngineError> {
        let translation = self.translate(word, from, to)?;
        let entry = translation.to_ledger_entry();
        self.last = Some(entry.clone());
        match self.ledger.record_history(entry) {
            Ok(_) => Ok(translation),
            Err(source) => {
                Err(EngineError::HistoryNotSaved { translation: Box::new(translation), source })
            }
        }
    }

    /// Resolves and renders without touching the ledger. The input is kept
    /// as typed (trimmed); matching ignores case.
    pub fn translate(
        &self,
        word: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, LookupError> {
        let input = word.trim().to_string();
        if input.is_empty() {
            return Err(LookupError::NotFound { word: input, lang: from });
        }
        let key = self.dictionary.resolve(&input, from)?;
        let pronunciation = self.dictionary.spelling(key, to)?;
        let source = self.dictionary.spelling(key, from)?;
        debug!(key = %key, %from, %to, "resolved");

        Ok(Translation {
            key: key.clone(),
            from,
            to,
            input,
            source: self.render(source, from),
            output: self.render(pronunciation, to),
            pronunciation: pronunciation.to_string(),
        })
    }

    /// Shows a raw spelling in `lang`'s script. Latin-script spellings are unchanged.
    pub fn render(&self, spelling: &str, lang: LanguageCode) -> String {
        match self.tables.table_for(lang.script()) {
            Some(table) => transliterate(&spelling.to_lowercase(), table),
            None => spelling.to_string(),
        }
    }

    /// The most recent successful lookup or recalled entry.
    pub fn last_translation(&self) -> Option<&LedgerEntry> {
        self.last.as_ref()
    }

    /// Makes a ledger entry the current translation again, e.g. when picked from a list.
    pub fn recall(&mut self, entry: LedgerEntry) {
        self.last = Some(entry);
    }

    /// Adds the current translation to favorites. `Ok(false)` when there is
    /// none or it is already a favorite.
    pub fn favorite_last(&mut self) -> Result<bool, StoreError> {
        match self.last.clone() {
            Some(entry) => self.ledger.add_favorite(entry),
            None => Ok(false),
        }
    }

    pub fn record_history(&mut self, entry: LedgerEntry) -> Result<bool, StoreError> {
        self.ledger.record_history(entry)
    }

    pub fn add_favorite(&mut self, entry: LedgerEntry) -> Result<bool, StoreError> {
        self.ledger.add_favorite(entry)
    }

    pub fn remove_history(&mut self, entry: &LedgerEntry) -> Result<bool, StoreError> {
        self.ledger.remove_history(entry)
    }

    pub fn remove_favorite(&mut self, entry: &LedgerEntry) -> Result<bool, StoreError> {
        self.ledger.remove_favorite(entry)
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        self.ledger.clear_history()
    }

    pub fn clear_favorites(&mut self) -> Result<(), StoreError> {
        self.ledger.clear_favorites()
    }

    pub fn ledger(&self) -> &SessionLedger<S> {
        &self.ledger
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn tables(&self) -> &ScriptTables {
        &self.tables
    }
}
