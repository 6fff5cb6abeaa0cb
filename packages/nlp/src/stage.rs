//! Stage identifiers and per-stage outcomes.
//!
//! A stage either succeeds with its output or degrades with a reason. A
//! degraded stage hands an empty sequence to the next stage, and the reason
//! is kept in the extraction's diagnostics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Steps of the extraction pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Tokenize,
    AlphabeticFilter,
    SuspectedEntityFilter,
    StopwordFilter,
    PartOfSpeechTag,
    ClassExtract,
    Lemmatize,
    FrequencyRank,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Tokenize => "tokenize",
            Stage::AlphabeticFilter => "alphabetic_filter",
            Stage::SuspectedEntityFilter => "suspected_entity_filter",
            Stage::StopwordFilter => "stopword_filter",
            Stage::PartOfSpeechTag => "part_of_speech_tag",
            Stage::ClassExtract => "class_extract",
            Stage::Lemmatize => "lemmatize",
            Stage::FrequencyRank => "frequency_rank",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a stage can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
    #[error("text is {len} bytes, limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },
    #[error("tagger failed: {0}")]
    Tagger(String),
}

/// Record of a stage that degraded to an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDiagnostic {
    pub stage: Stage,
    pub reason: String,
}

/// Explicit result of running one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome<T> {
    Success(T),
    Degraded(StageDiagnostic),
}

impl<T> StageOutcome<T> {
    pub fn from_result(stage: Stage, result: Result<T, StageError>) -> Self {
        match result {
            Ok(output) => StageOutcome::Success(output),
            Err(e) => StageOutcome::Degraded(StageDiagnostic {
                stage,
                reason: e.to_string(),
            }),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutcome::Degraded(_))
    }
}

impl<T: Default> StageOutcome<T> {
    /// Unwrap the stage output, substituting an empty value for a degraded
    /// stage and recording its diagnostic.
    pub fn into_output(self, diagnostics: &mut Vec<StageDiagnostic>) -> T {
        match self {
            StageOutcome::Success(output) => output,
            StageOutcome::Degraded(diagnostic) => {
                diagnostics.push(diagnostic);
                T::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_outcome_yields_empty_output() {
        let mut diagnostics = Vec::new();
        let outcome: StageOutcome<Vec<String>> = StageOutcome::from_result(
            Stage::Tokenize,
            Err(StageError::InputTooLarge { len: 10, limit: 5 }),
        );
        assert!(outcome.is_degraded());
        assert!(outcome.into_output(&mut diagnostics).is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].stage, Stage::Tokenize);
        assert_eq!(diagnostics[0].reason, "text is 10 bytes, limit is 5");
    }

    #[test]
    fn success_passes_output_through() {
        let mut diagnostics = Vec::new();
        let outcome = StageOutcome::Success(vec![1, 2]);
        assert_eq!(outcome.into_output(&mut diagnostics), vec![1, 2]);
        assert!(diagnostics.is_empty());
    }
}
