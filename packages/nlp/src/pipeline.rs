//! The keyword extraction pipeline.
//!
//! Text flows through eight stages in a fixed order: tokenize, alphabetic
//! filter, suspected entity filter, stopword filter, part-of-speech tagging,
//! class extraction, lemmatization and frequency ranking. Each stage returns a
//! [`StageOutcome`]; a degraded stage passes an empty sequence on and leaves
//! a diagnostic behind.

use std::collections::HashMap;

use keyword_core::{Document, JobId, KeywordCount, KeywordResult, WordClass};
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::lemmatizer::{LemmaClass, Lemmatizer};
use crate::stage::{Stage, StageDiagnostic, StageError, StageOutcome};
use crate::stopwords::Stopwords;
use crate::tagger::{LexiconTagger, TaggedToken, Tagger};
use crate::tokenizer::{Tokenizer, TreebankTokenizer};

/// Ranked keyword sets for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordExtraction {
    pub document_id: JobId,
    pub nouns: KeywordResult,
    pub verbs: KeywordResult,
    pub all: KeywordResult,
    /// Stages that degraded while producing this extraction.
    pub diagnostics: Vec<StageDiagnostic>,
}

impl KeywordExtraction {
    /// Whether any stage degraded, as opposed to the text simply having no
    /// keywords.
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The noun and verb sets, which are the ones written to the graph.
    pub fn persistable(&self) -> [&KeywordResult; 2] {
        [&self.nouns, &self.verbs]
    }
}

/// Lemmas split by word class, in token order.
#[derive(Debug, Default)]
struct ClassLemmas {
    nouns: Vec<String>,
    verbs: Vec<String>,
    all: Vec<String>,
}

/// Tagged tokens split by word class, in token order.
#[derive(Debug, Default)]
struct ClassTokens {
    nouns: Vec<TaggedToken>,
    verbs: Vec<TaggedToken>,
    all: Vec<TaggedToken>,
}

/// Deterministic text to keyword transformation.
///
/// The pipeline holds no per-call state, so one instance can serve any number
/// of documents and the same text always yields the same extraction.
pub struct KeywordPipeline {
    tokenizer: Box<dyn Tokenizer>,
    tagger: Box<dyn Tagger>,
    stopwords: Stopwords,
    lemmatizer: Lemmatizer,
    config: PipelineConfig,
}

impl std::fmt::Debug for KeywordPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordPipeline")
            .field("stopwords", &self.stopwords.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for KeywordPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl KeywordPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let stopwords = match &config.stopwords {
            Some(words) => Stopwords::from_words(words.iter().cloned()),
            None => Stopwords::english(),
        };
        Self {
            tokenizer: Box::new(TreebankTokenizer::new()),
            tagger: Box::new(LexiconTagger::new()),
            stopwords,
            lemmatizer: Lemmatizer::new(),
            config,
        }
    }

    /// Replace the part-of-speech tagger.
    pub fn with_tagger(mut self, tagger: impl Tagger + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    /// Replace the tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    pub fn with_stopwords(mut self, stopwords: Stopwords) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage over a document's text.
    pub fn extract(&self, document: &Document) -> KeywordExtraction {
        self.extract_text(document.id.clone(), &document.text)
    }

    /// Run every stage over raw text attributed to `document_id`.
    pub fn extract_text(&self, document_id: JobId, text: &str) -> KeywordExtraction {
        let mut diagnostics = Vec::new();

        let tokens = self.settle(&document_id, self.tokenize(text), &mut diagnostics);
        let tokens = self.settle(&document_id, self.alphabetic_filter(tokens), &mut diagnostics);
        let tokens = self.settle(&document_id, self.suspected_entity_filter(tokens), &mut diagnostics);
        let tokens = self.settle(&document_id, self.stopword_filter(tokens), &mut diagnostics);
        let tagged = self.settle(&document_id, self.tag(&tokens), &mut diagnostics);
        let classes = self.settle(&document_id, self.class_extract(tagged), &mut diagnostics);
        let lemmas = self.settle(&document_id, self.lemmatize(classes), &mut diagnostics);

        let nouns = self.settle(
            &document_id,
            self.frequency_rank(&document_id, WordClass::Noun, &lemmas.nouns),
            &mut diagnostics,
        );
        let verbs = self.settle(
            &document_id,
            self.frequency_rank(&document_id, WordClass::Verb, &lemmas.verbs),
            &mut diagnostics,
        );
        let all = self.settle(
            &document_id,
            self.frequency_rank(&document_id, WordClass::All, &lemmas.all),
            &mut diagnostics,
        );

        tracing::debug!(
            "Extracted {} nouns, {} verbs from document {}",
            nouns.len(),
            verbs.len(),
            document_id
        );

        KeywordExtraction {
            nouns: KeywordResult::new(document_id.clone(), WordClass::Noun, nouns),
            verbs: KeywordResult::new(document_id.clone(), WordClass::Verb, verbs),
            all: KeywordResult::new(document_id.clone(), WordClass::All, all),
            document_id,
            diagnostics,
        }
    }

    /// Take a stage's output, logging and recording a degraded stage.
    fn settle<T: Default>(
        &self,
        document_id: &JobId,
        outcome: StageOutcome<T>,
        diagnostics: &mut Vec<StageDiagnostic>,
    ) -> T {
        if let StageOutcome::Degraded(diagnostic) = &outcome {
            tracing::warn!(
                "Stage {} degraded for document {}: {}",
                diagnostic.stage,
                document_id,
                diagnostic.reason
            );
        }
        outcome.into_output(diagnostics)
    }

    fn tokenize(&self, text: &str) -> StageOutcome<Vec<String>> {
        let result = if text.len() > self.config.max_text_bytes {
            Err(StageError::InputTooLarge {
                len: text.len(),
                limit: self.config.max_text_bytes,
            })
        } else {
            Ok(self.tokenizer.tokenize(text))
        };
        StageOutcome::from_result(Stage::Tokenize, result)
    }

    fn alphabetic_filter(&self, tokens: Vec<String>) -> StageOutcome<Vec<String>> {
        StageOutcome::Success(
            tokens
                .into_iter()
                .filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
                .collect(),
        )
    }

    /// Drops every token that starts with an uppercase letter, which also
    /// removes sentence-initial words.
    fn suspected_entity_filter(&self, tokens: Vec<String>) -> StageOutcome<Vec<String>> {
        StageOutcome::Success(
            tokens
                .into_iter()
                .filter(|token| !token.chars().next().is_some_and(char::is_uppercase))
                .collect(),
        )
    }

    fn stopword_filter(&self, tokens: Vec<String>) -> StageOutcome<Vec<String>> {
        StageOutcome::Success(
            tokens
                .into_iter()
                .filter(|token| !self.stopwords.contains(token))
                .collect(),
        )
    }

    fn tag(&self, tokens: &[String]) -> StageOutcome<Vec<TaggedToken>> {
        StageOutcome::from_result(Stage::PartOfSpeechTag, self.tagger.tag(tokens))
    }

    fn class_extract(&self, tagged: Vec<TaggedToken>) -> StageOutcome<ClassTokens> {
        let mut classes = ClassTokens::default();
        for token in tagged {
            if token.tag.is_noun() {
                classes.nouns.push(token.clone());
            } else if token.tag.is_verb() {
                classes.verbs.push(token.clone());
            }
            classes.all.push(token);
        }
        StageOutcome::Success(classes)
    }

    fn lemmatize(&self, classes: ClassTokens) -> StageOutcome<ClassLemmas> {
        let lemma = |token: &TaggedToken| {
            self.lemmatizer
                .lemmatize(&token.word, LemmaClass::for_tag(token.tag))
        };
        StageOutcome::Success(ClassLemmas {
            nouns: classes.nouns.iter().map(&lemma).collect(),
            verbs: classes.verbs.iter().map(&lemma).collect(),
            all: classes.all.iter().map(&lemma).collect(),
        })
    }

    fn frequency_rank(
        &self,
        document_id: &JobId,
        word_class: WordClass,
        lemmas: &[String],
    ) -> StageOutcome<Vec<KeywordCount>> {
        let ranked = rank(lemmas, self.config.top_n);
        tracing::trace!(
            "Ranked {} {} keywords for document {}",
            ranked.len(),
            word_class,
            document_id
        );
        StageOutcome::Success(ranked)
    }
}

/// Count lemmas and keep the `top_n` most frequent.
///
/// Ties keep first-occurrence order because the sort is stable.
pub fn rank(lemmas: &[String], top_n: usize) -> Vec<KeywordCount> {
    let mut counts: Vec<KeywordCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for lemma in lemmas {
        match index.get(lemma.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(lemma.as_str(), counts.len());
                counts.push(KeywordCount {
                    word: lemma.clone(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}
