// src/core/types.rs
use crate::error::LookupError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Opaque identifier grouping one concept's spellings across languages.
pub type EntryKey = String;

/// The closed set of languages the dictionary carries.
/// Declaration order is the canonical order of an entry's spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    Tr,
    Ru,
    El,
    De,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 4] = [Self::Tr, Self::Ru, Self::El, Self::De];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::Ru => "ru",
            Self::El => "el",
            Self::De => "de",
        }
    }

    /// The script a spelling in this language is displayed in.
    pub fn script(self) -> Script {
        match self {
            Self::Ru => Script::Cyrillic,
            Self::El => Script::Greek,
            Self::Tr | Self::De => Script::Latin,
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = LookupError;

    /// Accepts codes with surrounding whitespace and in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tr" => Ok(Self::Tr),
            "ru" => Ok(Self::Ru),
            "el" => Ok(Self::El),
            "de" => Ok(Self::De),
            _ => Err(LookupError::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Latin,
    Cyrillic,
    Greek,
}

/// One concept's phonetic spellings, at most one per language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryEntry {
    spellings: BTreeMap<LanguageCode, String>,
}

impl DictionaryEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert. A second spelling for the same language replaces the first.
    pub fn with(mut self, lang: LanguageCode, spelling: impl Into<String>) -> Self {
        self.spellings.insert(lang, spelling.into());
        self
    }

    pub(crate) fn insert(&mut self, lang: LanguageCode, spelling: String) {
        self.spellings.insert(lang, spelling);
    }

    pub fn spelling(&self, lang: LanguageCode) -> Option<&str> {
        self.spellings.get(&lang).map(String::as_str)
    }

    /// Spellings in canonical language order.
    pub fn spellings(&self) -> impl Iterator<Item = (LanguageCode, &str)> {
        self.spellings.iter().map(|(lang, s)| (*lang, s.as_str()))
    }
}

/// A recorded lookup. `pronunciation` is the raw Latin spelling before rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub input: String,
    pub output: String,
    #[serde(rename = "pron")]
    pub pronunciation: String,
}

/// The result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub key: EntryKey,
    pub from: LanguageCode,
    pub to: LanguageCode,
    /// The query word, trimmed and lowercased.
    pub input: String,
    /// The source spelling rendered in the source language's script.
    pub source: String,
    /// The target spelling rendered in the target language's script.
    pub output: String,
    pub pronunciation: String,
}

impl Translation {
    pub fn to_ledger_entry(&self) -> LedgerEntry {
        LedgerEntry {
            from: self.from,
            to: self.to,
            input: self.input.clone(),
            output: self.output.clone(),
            pronunciation: self.pronunciation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_codes_case_insensitively() {
        assert_eq!(" RU ".parse::<LanguageCode>(), Ok(LanguageCode::Ru));
        assert_eq!("el".parse::<LanguageCode>(), Ok(LanguageCode::El));
    }

    #[test]
    fn rejects_unsupported_code() {
        assert_eq!(
            "fr".parse::<LanguageCode>(),
            Err(LookupError::UnsupportedLanguage("fr".into()))
        );
    }

    #[test]
    fn scripts_follow_language() {
        assert_eq!(LanguageCode::Ru.script(), Script::Cyrillic);
        assert_eq!(LanguageCode::El.script(), Script::Greek);
        assert_eq!(LanguageCode::Tr.script(), Script::Latin);
        assert_eq!(LanguageCode::De.script(), Script::Latin);
    }

    #[test]
    fn ledger_entry_uses_short_field_names() {
        let entry = LedgerEntry {
            from: LanguageCode::Tr,
            to: LanguageCode::Ru,
            input: "merhaba".into(),
            output: "мерхаба".into(),
            pronunciation: "merhaba".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["from"], "tr");
        assert_eq!(json["to"], "ru");
        assert_eq!(json["pron"], "merhaba");
    }
}
