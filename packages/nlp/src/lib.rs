//! Linguistic keyword extraction.
//!
//! This crate turns document text into ranked noun and verb keyword sets:
//! - Treebank-style tokenization
//! - Alphabetic, suspected entity and stopword filters
//! - Part-of-speech tagging behind the [`Tagger`] trait
//! - Lemmatization and frequency ranking
//!
//! Every stage reports an explicit [`StageOutcome`]. The pipeline never fails;
//! degraded stages are listed in [`KeywordExtraction::diagnostics`].

mod config;
mod lemmatizer;
mod lexicon;
mod pipeline;
mod sample;
mod stage;
mod stopwords;
mod tagger;
mod tokenizer;

pub use config::{DEFAULT_MAX_TEXT_BYTES, PipelineConfig};
pub use lemmatizer::{LemmaClass, Lemmatizer};
pub use pipeline::{KeywordExtraction, KeywordPipeline, rank};
pub use sample::SAMPLE_TEXT;
pub use stage::{Stage, StageDiagnostic, StageError, StageOutcome};
pub use stopwords::{ENGLISH_STOPWORDS, Stopwords};
pub use tagger::{LexiconTagger, PosTag, TaggedToken, Tagger};
pub use tokenizer::{Tokenizer, TreebankTokenizer, WhitespaceTokenizer};
