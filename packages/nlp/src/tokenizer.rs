//! Word tokenization.

use std::sync::LazyLock;

use regex::Regex;

/// Letter/digit runs joined by inner apostrophes, hyphens or periods, or any
/// single non-space symbol.
static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’\-.][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]")
        .unwrap_or_else(|e| panic!("word pattern must compile: {e}"))
});

const CLITICS: &[&str] = &["s", "m", "d", "ll", "re", "ve"];

/// Trait for tokenization.
pub trait Tokenizer: Send + Sync {
    /// Split raw text into an ordered sequence of tokens.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// English tokenizer in the Penn Treebank style.
///
/// Punctuation marks become their own tokens, hyphenated words stay whole,
/// and clitics are split off: `don't` becomes `do` + `n't`, `Hinault's`
/// becomes `Hinault` + `'s`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreebankTokenizer;

impl TreebankTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn split_clitic(token: &str, out: &mut Vec<String>) {
        let Some(i) = token.rfind(['\'', '’']) else {
            out.push(token.to_string());
            return;
        };
        let (head, tail) = token.split_at(i);
        let suffix: String = tail.chars().skip(1).collect::<String>().to_lowercase();

        // did + n't
        if suffix == "t" && head.len() > 1 && (head.ends_with('n') || head.ends_with('N')) {
            let split = i - 1;
            out.push(token[..split].to_string());
            out.push(token[split..].to_string());
            return;
        }
        if !head.is_empty() && CLITICS.contains(&suffix.as_str()) {
            out.push(head.to_string());
            out.push(tail.to_string());
            return;
        }
        out.push(token.to_string());
    }
}

impl Tokenizer for TreebankTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for m in WORD_PATTERN.find_iter(text) {
            Self::split_clitic(m.as_str(), &mut tokens);
        }
        tokens
    }
}

/// Very naive whitespace tokenizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}
