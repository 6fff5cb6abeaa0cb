//! Dictionary base forms for nouns and verbs.

use crate::lexicon;
use crate::tagger::PosTag;

/// Which rule set reduces a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LemmaClass {
    Noun,
    Verb,
}

impl LemmaClass {
    /// Verbs use verb rules; every other tag uses noun rules.
    pub fn for_tag(tag: PosTag) -> Self {
        if tag.is_verb() {
            LemmaClass::Verb
        } else {
            LemmaClass::Noun
        }
    }
}

/// Rule-based lemmatizer backed by the irregular-form tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lemmatizer;

impl Lemmatizer {
    pub fn new() -> Self {
        Self
    }

    pub fn lemmatize(&self, word: &str, class: LemmaClass) -> String {
        match class {
            LemmaClass::Noun => noun_lemma(word),
            LemmaClass::Verb => verb_lemma(word),
        }
    }
}

fn noun_lemma(word: &str) -> String {
    if let Some(singular) = lexicon::irregular_plural(word) {
        return singular.to_string();
    }
    if word.chars().count() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies").filter(|stem| stem.len() > 1) {
        return format!("{}y", stem);
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

fn verb_lemma(word: &str) -> String {
    if lexicon::is_verb_base(word) {
        return word.to_string();
    }
    if let Some((base, _)) = lexicon::irregular_verb(word) {
        return base.to_string();
    }
    if let Some(stem) = word.strip_suffix("ied").filter(|stem| stem.len() > 1) {
        return format!("{}y", stem);
    }
    if let Some(stem) = word.strip_suffix("ies").filter(|stem| stem.len() > 1) {
        return format!("{}y", stem);
    }
    if let Some(stem) = word.strip_suffix("eed").filter(|stem| !stem.is_empty()) {
        return format!("{}ee", stem);
    }
    if let Some(stem) = word.strip_suffix("ing").filter(|stem| has_vowel(stem) && stem.len() >= 2) {
        return restore_stem(stem);
    }
    if let Some(stem) = word.strip_suffix("ed").filter(|stem| has_vowel(stem) && stem.len() >= 2) {
        return restore_stem(stem);
    }
    for suffix in ["sses", "shes", "ches", "xes", "zes", "oes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with('s') && !word.ends_with("ss") && word.len() > 3 {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}

/// Undo spelling changes made when `-ed` or `-ing` was attached.
fn restore_stem(stem: &str) -> String {
    let with_e = format!("{}e", stem);
    if lexicon::is_verb_base(stem) {
        return stem.to_string();
    }
    if lexicon::is_verb_base(&with_e) {
        return with_e;
    }

    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();

    // stopped -> stop, running -> run; but falling, passed, buzzed keep the pair
    if n >= 3 && chars[n - 1] == chars[n - 2] && is_consonant(chars[n - 1]) && !matches!(chars[n - 1], 'l' | 's' | 'z' | 'f') {
        return chars[..n - 1].iter().collect();
    }

    // celebrat-ed, organiz-ed, struggl-ed, arriv-ed, merg-ed, danc-ed, mov-ed
    const E_ENDINGS: &[&str] = &[
        "at", "iz", "is", "bl", "dl", "gl", "kl", "pl", "tl", "zl", "iv", "rg", "dg", "nc", "rc",
        "ac", "ov", "uc",
    ];
    if E_ENDINGS.iter().any(|ending| stem.ends_with(ending)) && n > 2 {
        return with_e;
    }
    // caus-ed, us-ed; focus-ed keeps its stem
    if stem.ends_with("us") && n <= 4 {
        return with_e;
    }
    // hop-ed -> hope, bak-ed -> bake
    if n <= 3 && is_cvc(&chars) {
        return with_e;
    }
    stem.to_string()
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    c.is_alphabetic() && !is_vowel(c)
}

fn has_vowel(stem: &str) -> bool {
    stem.chars().any(|c| is_vowel(c) || c == 'y')
}

/// Consonant-vowel-consonant ending, where the final consonant is not w, x or y.
fn is_cvc(chars: &[char]) -> bool {
    let n = chars.len();
    if n < 2 {
        return false;
    }
    let last = chars[n - 1];
    let middle = chars[n - 2];
    let first_ok = n < 3 || is_consonant(chars[n - 3]);
    first_ok && is_vowel(middle) && is_consonant(last) && !matches!(last, 'w' | 'x' | 'y')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verb(word: &str) -> String {
        Lemmatizer::new().lemmatize(word, LemmaClass::Verb)
    }

    fn noun(word: &str) -> String {
        Lemmatizer::new().lemmatize(word, LemmaClass::Noun)
    }

    #[test]
    fn irregular_verbs() {
        assert_eq!(verb("ran"), "run");
        assert_eq!(verb("went"), "go");
        assert_eq!(verb("told"), "tell");
        assert_eq!(verb("lay"), "lay");
    }

    #[test]
    fn regular_verbs() {
        assert_eq!(verb("watched"), "watch");
        assert_eq!(verb("stopped"), "stop");
        assert_eq!(verb("running"), "run");
        assert_eq!(verb("making"), "make");
        assert_eq!(verb("celebrated"), "celebrate");
        assert_eq!(verb("struggled"), "struggle");
        assert_eq!(verb("falling"), "fall");
        assert_eq!(verb("pursued"), "pursue");
        assert_eq!(verb("persisted"), "persist");
        assert_eq!(verb("hoped"), "hope");
        assert_eq!(verb("carried"), "carry");
        assert_eq!(verb("agreed"), "agree");
        assert_eq!(verb("celebrates"), "celebrate");
        assert_eq!(verb("watches"), "watch");
        assert_eq!(verb("spinning"), "spin");
    }

    #[test]
    fn nouns() {
        assert_eq!(noun("dogs"), "dog");
        assert_eq!(noun("children"), "child");
        assert_eq!(noun("climbs"), "climb");
        assert_eq!(noun("stories"), "story");
        assert_eq!(noun("boxes"), "box");
        assert_eq!(noun("glasses"), "glass");
        assert_eq!(noun("class"), "class");
        assert_eq!(noun("status"), "status");
        assert_eq!(noun("was"), "was");
        assert_eq!(noun("dog"), "dog");
    }

    #[test]
    fn class_follows_tag() {
        assert_eq!(LemmaClass::for_tag(PosTag::VerbGerund), LemmaClass::Verb);
        assert_eq!(LemmaClass::for_tag(PosTag::Adverb), LemmaClass::Noun);
    }
}
