// File: src/ledger.rs
use crate::core::types::LedgerEntry;
use crate::error::StoreError;
use tracing::{debug, warn};

pub const DEFAULT_HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerKind {
    History,
    Favorites,
}

impl LedgerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Favorites => "favorites",
        }
    }
}

/// Persistence for the two ledger collections. `save` always receives the
/// full collection and replaces whatever was stored.
pub trait LedgerStore {
    fn load(&self, kind: LedgerKind) -> Result<Vec<LedgerEntry>, StoreError>;
    fn save(&mut self, kind: LedgerKind, entries: &[LedgerEntry]) -> Result<(), StoreError>;
}

/// History and favorites for one session, written through to `store`
/// after every change.
pub struct SessionLedger<S> {
    store: S,
    history: Vec<LedgerEntry>,
    favorites: Vec<LedgerEntry>,
    history_limit: usize,
}

impl<S: LedgerStore> SessionLedger<S> {
    pub fn open(store: S) -> Self {
        Self::with_history_limit(store, DEFAULT_HISTORY_LIMIT)
    }

    /// Loads both collections. A collection the store cannot produce starts empty.
    pub fn with_history_limit(store: S, history_limit: usize) -> Self {
        let history_limit = history_limit.max(1);
        let mut history = load_or_empty(&store, LedgerKind::History);
        let excess = history.len().saturating_sub(history_limit);
        history.drain(..excess);
        let favorites = load_or_empty(&store, LedgerKind::Favorites);
        debug!(history = history.len(), favorites = favorites.len(), "ledger loaded");
        Self { store, history, favorites, history_limit }
    }

    /// Appends to history, evicting the oldest entries beyond the limit.
    /// On a failed write the history is left as it was.
    pub fn record_history(&mut self, entry: LedgerEntry) -> Result<bool, StoreError> {
        self.history.push(entry);
        let excess = self.history.len().saturating_sub(self.history_limit);
        let evicted: Vec<LedgerEntry> = self.history.drain(..excess).collect();
        if let Err(e) = self.persist(LedgerKind::History) {
            self.history.pop();
            self.history.splice(0..0, evicted);
            return Err(e);
        }
        Ok(true)
    }

    /// Appends unless a favorite with the same input word (ignoring case) exists.
    pub fn add_favorite(&mut self, entry: LedgerEntry) -> Result<bool, StoreError> {
        if self.is_favorite(&entry.input) {
            return Ok(false);
        }
        self.favorites.push(entry);
        if let Err(e) = self.persist(LedgerKind::Favorites) {
            self.favorites.pop();
            return Err(e);
        }
        Ok(true)
    }

    pub fn remove_history(&mut self, entry: &LedgerEntry) -> Result<bool, StoreError> {
        let Some((pos, removed)) = remove_first(&mut self.history, entry) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(LedgerKind::History) {
            self.history.insert(pos, removed);
            return Err(e);
        }
        Ok(true)
    }

    pub fn remove_favorite(&mut self, entry: &LedgerEntry) -> Result<bool, StoreError> {
        let Some((pos, removed)) = remove_first(&mut self.favorites, entry) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(LedgerKind::Favorites) {
            self.favorites.insert(pos, removed);
            return Err(e);
        }
        Ok(true)
    }

    pub fn clear_history(&mut self) -> Result<(), StoreError> {
        let previous = std::mem::take(&mut self.history);
        if let Err(e) = self.persist(LedgerKind::History) {
            self.history = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn clear_favorites(&mut self) -> Result<(), StoreError> {
        let previous = std::mem::take(&mut self.favorites);
        if let Err(e) = self.persist(LedgerKind::Favorites) {
            self.favorites = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Oldest first.
    pub fn history(&self) -> &[LedgerEntry] {
        &self.history
    }

    pub fn favorites(&self) -> &[LedgerEntry] {
        &self.favorites
    }

    /// The last `n` history entries, oldest first.
    pub fn recent_history(&self, n: usize) -> &[LedgerEntry] {
        &self.history[self.history.len().saturating_sub(n)..]
    }

    pub fn is_favorite(&self, word: &str) -> bool {
        let word = fold(word);
        self.favorites.iter().any(|f| fold(&f.input) == word)
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, kind: LedgerKind) -> Result<(), StoreError> {
        let entries = match kind {
            LedgerKind::History => &self.history,
            LedgerKind::Favorites => &self.favorites,
        };
        self.store.save(kind, entries)
    }
}

fn load_or_empty<S: LedgerStore>(store: &S, kind: LedgerKind) -> Vec<LedgerEntry> {
    store.load(kind).unwrap_or_else(|e| {
        warn!(kind = kind.as_str(), error = %e, "ledger store unavailable, starting empty");
        Vec::new()
    })
}

/// Favorites are keyed on the input word, trimmed and case-folded.
fn fold(word: &str) -> String {
    word.trim().to_lowercase()
}

fn remove_first(entries: &mut Vec<LedgerEntry>, entry: &LedgerEntry) -> Option<(usize, LedgerEntry)> {
    let pos = entries.iter().position(|e| e == entry)?;
    Some((pos, entries.remove(pos)))
}
