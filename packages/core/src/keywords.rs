//! Ranked keyword sets produced per document.

use serde::{Deserialize, Serialize};

use crate::JobId;

/// Default number of keywords kept per word class.
pub const DEFAULT_TOP_N: usize = 20;

/// Coarse grammatical bucket a keyword set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordClass {
    Noun,
    Verb,
    /// Every stopword-filtered lemma, before the noun/verb split.
    All,
}

impl WordClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordClass::Noun => "Noun",
            WordClass::Verb => "Verb",
            WordClass::All => "All",
        }
    }
}

impl std::fmt::Display for WordClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked keyword and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: u32,
}

/// Ranked keywords of one class for one document.
///
/// `keywords` is ordered by count descending; equal counts keep the order in
/// which the lemma first appeared in the filtered token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub document_id: JobId,
    pub word_class: WordClass,
    pub keywords: Vec<KeywordCount>,
}

impl KeywordResult {
    pub fn new(document_id: JobId, word_class: WordClass, keywords: Vec<KeywordCount>) -> Self {
        Self {
            document_id,
            word_class,
            keywords,
        }
    }

    /// Count recorded for `word`, if it made the ranking.
    pub fn get(&self, word: &str) -> Option<u32> {
        self.keywords
            .iter()
            .find(|keyword| keyword.word == word)
            .map(|keyword| keyword.count)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Ranked words, highest count first.
    pub fn words(&self) -> Vec<&str> {
        self.keywords.iter().map(|keyword| keyword.word.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_class_serializes_with_display_names() {
        let json = serde_json::to_string(&WordClass::Noun).unwrap_or_default();
        assert_eq!(json, "\"Noun\"");
        assert_eq!(WordClass::Verb.to_string(), "Verb");
    }

    #[test]
    fn lookup_by_word() {
        let result = KeywordResult::new(
            JobId::from("1"),
            WordClass::Noun,
            vec![
                KeywordCount { word: "race".into(), count: 4 },
                KeywordCount { word: "climb".into(), count: 2 },
            ],
        );
        assert_eq!(result.get("climb"), Some(2));
        assert_eq!(result.get("bike"), None);
        assert_eq!(result.words(), vec!["race", "climb"]);
    }
}
