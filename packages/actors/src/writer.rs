//! Idempotent persistence of keyword sets.

use std::sync::Arc;

use keyword_core::{CollaboratorError, KeywordResult, KeywordStore, UpsertAck};
use serde::{Deserialize, Serialize};

/// What happened to each keyword of one persisted set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistReport {
    /// Edges created or overwritten.
    pub written: usize,
    /// Writes acknowledged as `DocumentMissing`.
    pub missing_document: usize,
    /// Keywords not attempted after the store became unavailable.
    pub skipped: usize,
    /// Whether the call stopped early on an unavailable store.
    pub interrupted: bool,
}

impl PersistReport {
    pub fn merge(&mut self, other: PersistReport) {
        self.written += other.written;
        self.missing_document += other.missing_document;
        self.skipped += other.skipped;
        self.interrupted |= other.interrupted;
    }
}

/// Writes keyword results into the graph, one upsert per keyword.
///
/// Writes are not batched: edges written before a failure stay written.
#[derive(Clone)]
pub struct KeywordGraphWriter {
    store: Arc<dyn KeywordStore>,
}

impl KeywordGraphWriter {
    pub fn new(store: Arc<dyn KeywordStore>) -> Self {
        Self { store }
    }

    /// Upsert every keyword of `result` in ranked order.
    ///
    /// An unavailable store ends the call early and is reported in the
    /// returned [`PersistReport`]. Any other store error is returned.
    pub async fn persist(&self, result: &KeywordResult) -> Result<PersistReport, CollaboratorError> {
        let mut report = PersistReport::default();
        let total = result.keywords.len();

        for (i, keyword) in result.keywords.iter().enumerate() {
            let ack = self
                .store
                .upsert(&result.document_id, &keyword.word, keyword.count, result.word_class)
                .await;

            match ack {
                Ok(UpsertAck::Written) => {
                    report.written += 1;
                    tracing::debug!(
                        "Wrote keyword {} ({}, {}) for document {}",
                        keyword.word,
                        result.word_class,
                        keyword.count,
                        result.document_id
                    );
                }
                Ok(UpsertAck::DocumentMissing) => {
                    report.missing_document += 1;
                    tracing::warn!(
                        "Document {} not in graph, keyword {} not written",
                        result.document_id,
                        keyword.word
                    );
                }
                Err(e) if e.is_unavailable() => {
                    report.skipped = total - i - 1;
                    report.interrupted = true;
                    tracing::warn!(
                        "Could not write keyword {} for document {}: {} ({} remaining skipped)",
                        keyword.word,
                        result.document_id,
                        e,
                        report.skipped
                    );
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use keyword_core::{CollabFuture, JobId, KeywordCount, WordClass};

    use super::*;

    /// Store that fails on the `fail_at`-th call.
    struct ScriptedStore {
        calls: Mutex<Vec<String>>,
        fail_at: Option<(usize, CollaboratorError)>,
        missing: bool,
    }

    impl ScriptedStore {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_at: None,
                missing: false,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    impl KeywordStore for ScriptedStore {
        fn upsert<'a>(
            &'a self,
            _document_id: &'a JobId,
            word: &'a str,
            _frequency: u32,
            _word_class: WordClass,
        ) -> CollabFuture<'a, UpsertAck> {
            Box::pin(async move {
                let n = {
                    let mut calls = self.calls.lock().unwrap();
                    calls.push(word.to_string());
                    calls.len() - 1
                };
                if let Some((at, e)) = &self.fail_at
                    && *at == n
                {
                    return Err(e.clone());
                }
                if self.missing {
                    Ok(UpsertAck::DocumentMissing)
                } else {
                    Ok(UpsertAck::Written)
                }
            })
        }
    }

    fn result(words: &[&str]) -> KeywordResult {
        KeywordResult::new(
            JobId::new("doc"),
            WordClass::Noun,
            words
                .iter()
                .map(|w| KeywordCount {
                    word: w.to_string(),
                    count: 1,
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn writes_every_keyword_in_order() {
        let store = Arc::new(ScriptedStore::new());
        let writer = KeywordGraphWriter::new(store.clone());

        let report = writer.persist(&result(&["a", "b", "c"])).await.unwrap();

        assert_eq!(report.written, 3);
        assert!(!report.interrupted);
        assert_eq!(store.calls(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn empty_set_writes_nothing() {
        let store = Arc::new(ScriptedStore::new());
        let writer = KeywordGraphWriter::new(store.clone());

        let report = writer.persist(&result(&[])).await.unwrap();

        assert_eq!(report, PersistReport::default());
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn unavailable_store_skips_remaining_writes() {
        let mut store = ScriptedStore::new();
        store.fail_at = Some((1, CollaboratorError::Unavailable("connection refused".into())));
        let store = Arc::new(store);
        let writer = KeywordGraphWriter::new(store.clone());

        let report = writer.persist(&result(&["a", "b", "c", "d"])).await.unwrap();

        assert_eq!(report.written, 1);
        assert_eq!(report.skipped, 2);
        assert!(report.interrupted);
        assert_eq!(store.calls(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn missing_document_is_counted_and_continues() {
        let mut store = ScriptedStore::new();
        store.missing = true;
        let store = Arc::new(store);
        let writer = KeywordGraphWriter::new(store.clone());

        let report = writer.persist(&result(&["a", "b"])).await.unwrap();

        assert_eq!(report.written, 0);
        assert_eq!(report.missing_document, 2);
        assert_eq!(store.calls().len(), 2);
    }

    #[tokio::test]
    async fn other_store_errors_propagate() {
        let mut store = ScriptedStore::new();
        store.fail_at = Some((0, CollaboratorError::Store("bad query".into())));
        let writer = KeywordGraphWriter::new(Arc::new(store));

        let err = writer.persist(&result(&["a"])).await.unwrap_err();
        assert_eq!(err, CollaboratorError::Store("bad query".into()));
    }
}
