use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Zh => Language::En,
            Language::En => Language::Zh,
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_lowercase().as_str() {
            "zh" => Some(Language::Zh),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }
}

pub type TranslationTable = HashMap<String, String>;

/// Current language plus the string tables. Display only: filtering always
/// works on the raw labels.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    language: Language,
    tables: HashMap<Language, TranslationTable>,
}

impl Translator {
    pub fn new(language: Language, tables: HashMap<Language, TranslationTable>) -> Self {
        Translator { language, tables }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggled();
    }

    /// Translation of `key`, or `key` itself when there is none.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.tables.get(&self.language)
            .and_then(|table| table.get(key))
            .map(|s| s.as_str())
            .unwrap_or(key)
    }
}
