//! Part-of-speech tagging with Penn Treebank tags.

use serde::{Deserialize, Serialize};

use crate::lexicon;
use crate::stage::StageError;

/// Penn Treebank part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosTag {
    #[serde(rename = "NN")]
    Noun,
    #[serde(rename = "NNS")]
    NounPlural,
    #[serde(rename = "NNP")]
    ProperNoun,
    #[serde(rename = "NNPS")]
    ProperNounPlural,
    #[serde(rename = "VB")]
    VerbBase,
    #[serde(rename = "VBD")]
    VerbPast,
    #[serde(rename = "VBG")]
    VerbGerund,
    #[serde(rename = "VBN")]
    VerbPastParticiple,
    #[serde(rename = "VBP")]
    VerbPresent,
    #[serde(rename = "VBZ")]
    VerbThirdPerson,
    #[serde(rename = "JJ")]
    Adjective,
    #[serde(rename = "JJR")]
    AdjectiveComparative,
    #[serde(rename = "JJS")]
    AdjectiveSuperlative,
    #[serde(rename = "RB")]
    Adverb,
    #[serde(rename = "DT")]
    Determiner,
    #[serde(rename = "IN")]
    Preposition,
    #[serde(rename = "CC")]
    Conjunction,
    #[serde(rename = "PRP")]
    Pronoun,
    #[serde(rename = "PRP$")]
    PossessivePronoun,
    #[serde(rename = "WP")]
    WhWord,
    #[serde(rename = "MD")]
    Modal,
    #[serde(rename = "TO")]
    To,
    #[serde(rename = "EX")]
    Existential,
    #[serde(rename = "CD")]
    Number,
    #[serde(rename = "UH")]
    Interjection,
}

impl PosTag {
    /// The Penn Treebank code.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NN",
            PosTag::NounPlural => "NNS",
            PosTag::ProperNoun => "NNP",
            PosTag::ProperNounPlural => "NNPS",
            PosTag::VerbBase => "VB",
            PosTag::VerbPast => "VBD",
            PosTag::VerbGerund => "VBG",
            PosTag::VerbPastParticiple => "VBN",
            PosTag::VerbPresent => "VBP",
            PosTag::VerbThirdPerson => "VBZ",
            PosTag::Adjective => "JJ",
            PosTag::AdjectiveComparative => "JJR",
            PosTag::AdjectiveSuperlative => "JJS",
            PosTag::Adverb => "RB",
            PosTag::Determiner => "DT",
            PosTag::Preposition => "IN",
            PosTag::Conjunction => "CC",
            PosTag::Pronoun => "PRP",
            PosTag::PossessivePronoun => "PRP$",
            PosTag::WhWord => "WP",
            PosTag::Modal => "MD",
            PosTag::To => "TO",
            PosTag::Existential => "EX",
            PosTag::Number => "CD",
            PosTag::Interjection => "UH",
        }
    }

    /// NN, NNS, NNP or NNPS.
    pub fn is_noun(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::NounPlural | PosTag::ProperNoun | PosTag::ProperNounPlural
        )
    }

    /// VB, VBD, VBG, VBN, VBP or VBZ.
    pub fn is_verb(&self) -> bool {
        matches!(
            self,
            PosTag::VerbBase
                | PosTag::VerbPast
                | PosTag::VerbGerund
                | PosTag::VerbPastParticiple
                | PosTag::VerbPresent
                | PosTag::VerbThirdPerson
        )
    }

    /// Tags a noun phrase can open with, used by the context rules.
    fn opens_noun_phrase(&self) -> bool {
        matches!(
            self,
            PosTag::Determiner
                | PosTag::PossessivePronoun
                | PosTag::Adjective
                | PosTag::AdjectiveComparative
                | PosTag::AdjectiveSuperlative
        )
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token with its part of speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub word: String,
    pub tag: PosTag,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: PosTag) -> Self {
        Self {
            word: word.into(),
            tag,
        }
    }
}

/// Trait for part-of-speech taggers.
///
/// Implementations must be deterministic: the same tokens always get the same
/// tags.
pub trait Tagger: Send + Sync {
    fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, StageError>;
}

/// Lexicon and suffix based tagger with a small set of context rules.
///
/// Lookup order per token: closed-class lexicon, irregular verb forms,
/// irregular plurals, known verb bases, suffix heuristics, then `NN`. A second
/// pass applies transformation rules using the previous tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    fn lexical_tag(word: &str) -> PosTag {
        let lower = word.to_lowercase();
        let w = lower.as_str();

        if let Some(tag) = lexicon::fixed_tag(w) {
            return tag;
        }
        if lexicon::is_verb_base(w) {
            return PosTag::VerbBase;
        }
        if let Some((_, tag)) = lexicon::irregular_verb(w) {
            return tag;
        }
        if lexicon::irregular_plural(w).is_some() {
            return PosTag::NounPlural;
        }
        Self::suffix_tag(w)
    }

    fn suffix_tag(w: &str) -> PosTag {
        let len = w.chars().count();

        if len > 4 && w.ends_with("ing") && !lexicon::ING_NOUNS.contains(&w) {
            return PosTag::VerbGerund;
        }
        if len > 3 && w.ends_with("ed") && !w.ends_with("eed") && !lexicon::ED_NON_VERBS.contains(&w) {
            return PosTag::VerbPast;
        }
        if len > 3 && w.ends_with("ly") && !lexicon::LY_NON_ADVERBS.contains(&w) {
            return PosTag::Adverb;
        }
        const ADJECTIVE_SUFFIXES: &[&str] =
            &["ous", "ful", "ive", "able", "ible", "ical", "ial", "less", "ish"];
        if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|suffix| w.ends_with(suffix)) {
            return PosTag::Adjective;
        }
        if len > 4 && w.ends_with("ic") && !lexicon::IC_NOUNS.contains(&w) {
            return PosTag::Adjective;
        }
        if len > 3 && w.ends_with('s') && !w.ends_with("ss") && !w.ends_with("us") && !w.ends_with("is") {
            if Self::third_person_base(w).is_some_and(lexicon::is_verb_base) {
                return PosTag::VerbThirdPerson;
            }
            return PosTag::NounPlural;
        }
        PosTag::Noun
    }

    /// Candidate base for an `-s`/`-es`/`-ies` verb form that is a known base.
    fn third_person_base(w: &str) -> Option<&str> {
        let stripped = w.strip_suffix('s')?;
        if lexicon::is_verb_base(stripped) {
            return Some(stripped);
        }
        let stripped = w.strip_suffix("es")?;
        lexicon::is_verb_base(stripped).then_some(stripped)
    }

    /// Transformation rules keyed on the previous tag.
    fn apply_context(tags: &mut [PosTag]) {
        for i in 1..tags.len() {
            let previous = tags[i - 1];
            let current = tags[i];
            // "the run", "a great climb"
            if previous.opens_noun_phrase() && matches!(current, PosTag::VerbBase | PosTag::VerbPresent) {
                tags[i] = PosTag::Noun;
            }
            // "could work", "to work"
            if matches!(previous, PosTag::Modal | PosTag::To) && current == PosTag::Noun {
                tags[i] = PosTag::VerbBase;
            }
            // "had finished"
            if previous.is_verb() && current == PosTag::VerbPast && is_auxiliary(previous) {
                tags[i] = PosTag::VerbPastParticiple;
            }
        }
    }
}

fn is_auxiliary(tag: PosTag) -> bool {
    matches!(
        tag,
        PosTag::VerbThirdPerson | PosTag::VerbPresent | PosTag::VerbPast | PosTag::VerbGerund
    )
}

impl Tagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, StageError> {
        let mut tags: Vec<PosTag> = tokens.iter().map(|t| Self::lexical_tag(t)).collect();
        Self::apply_context(&mut tags);
        Ok(tokens
            .iter()
            .zip(tags)
            .map(|(word, tag)| TaggedToken::new(word.clone(), tag))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_words(words: &[&str]) -> Vec<PosTag> {
        let tokens: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        LexiconTagger::new()
            .tag(&tokens)
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.tag)
            .collect()
    }

    #[test]
    fn tags_simple_sentence() {
        assert_eq!(
            tag_words(&["ran", "quickly", "dog", "ran"]),
            vec![PosTag::VerbPast, PosTag::Adverb, PosTag::Noun, PosTag::VerbPast]
        );
    }

    #[test]
    fn suffix_heuristics() {
        assert_eq!(
            tag_words(&["spinning", "watched", "spectators", "celebrates", "picturesque"]),
            vec![
                PosTag::VerbGerund,
                PosTag::VerbPast,
                PosTag::NounPlural,
                PosTag::VerbThirdPerson,
                PosTag::Noun,
            ]
        );
        assert_eq!(tag_words(&["famous"]), vec![PosTag::Adjective]);
        assert_eq!(tag_words(&["morning"]), vec![PosTag::Noun]);
        assert_eq!(tag_words(&["children"]), vec![PosTag::NounPlural]);
    }

    #[test]
    fn context_rules() {
        assert_eq!(tag_words(&["the", "work"]), vec![PosTag::Determiner, PosTag::Noun]);
        assert_eq!(tag_words(&["could", "climb"]), vec![PosTag::Modal, PosTag::VerbBase]);
        assert_eq!(
            tag_words(&["had", "watched"]),
            vec![PosTag::VerbPast, PosTag::VerbPastParticiple]
        );
    }

    #[test]
    fn class_membership() {
        assert!(PosTag::ProperNounPlural.is_noun());
        assert!(PosTag::VerbThirdPerson.is_verb());
        assert!(!PosTag::Adjective.is_noun());
        assert!(!PosTag::Modal.is_verb());
        assert_eq!(PosTag::PossessivePronoun.to_string(), "PRP$");
    }
}
