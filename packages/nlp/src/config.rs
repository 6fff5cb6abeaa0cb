//! Pipeline configuration.

use keyword_core::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};

/// Default upper bound on document text accepted by the tokenizer (1 MiB).
pub const DEFAULT_MAX_TEXT_BYTES: usize = 1024 * 1024;

/// Settings for a [`KeywordPipeline`](crate::KeywordPipeline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Keywords kept per word class.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Texts longer than this degrade the tokenize stage.
    #[serde(default = "default_max_text_bytes")]
    pub max_text_bytes: usize,
    /// Replacement stopword list; `None` uses the English list.
    #[serde(default)]
    pub stopwords: Option<Vec<String>>,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_max_text_bytes() -> usize {
    DEFAULT_MAX_TEXT_BYTES
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            stopwords: None,
        }
    }
}

impl PipelineConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_max_text_bytes(mut self, max_text_bytes: usize) -> Self {
        self.max_text_bytes = max_text_bytes;
        self
    }

    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stopwords = Some(words.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"top_n": 5}"#).unwrap_or_default();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.max_text_bytes, DEFAULT_MAX_TEXT_BYTES);
        assert!(config.stopwords.is_none());
    }

    #[test]
    fn builder_overrides() {
        let config = PipelineConfig::default()
            .with_top_n(3)
            .with_stopwords(["a", "b"]);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.stopwords, Some(vec!["a".to_string(), "b".to_string()]));
    }
}
