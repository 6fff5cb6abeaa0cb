//! The backlog run loop.
//!
//! [`Orchestrator`] owns the [`JobQueue`] and the status machine. It is driven
//! by [`OrchestratorActor`](crate::OrchestratorActor), which processes one
//! message at a time, so every method here runs without concurrent callers.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use keyword_core::{
    CollaboratorError, DocumentSource, DrainReport, JobId, JobQueue, KeywordEvent, KeywordStore,
    OrchestratorStatus, RunId, StateError,
};
use nlp::{KeywordExtraction, KeywordPipeline};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::writer::{KeywordGraphWriter, PersistReport};

/// Capacity of the event channel.
const EVENT_CAPACITY: usize = 1024;

/// Errors returned by orchestrator operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    #[error("orchestrator is stopped")]
    Stopped,
    #[error("orchestrator is {0}, not running")]
    NotRunning(OrchestratorStatus),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

/// Sequences document processing for the keyword backlog.
pub struct Orchestrator {
    queue: JobQueue,
    status: OrchestratorStatus,
    source: Arc<dyn DocumentSource>,
    writer: KeywordGraphWriter,
    pipeline: Arc<KeywordPipeline>,
    event_tx: broadcast::Sender<KeywordEvent>,
}

impl Orchestrator {
    /// Create a paused orchestrator with an empty backlog.
    pub fn new(
        source: Arc<dyn DocumentSource>,
        store: Arc<dyn KeywordStore>,
        pipeline: Arc<KeywordPipeline>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            queue: JobQueue::new(),
            status: OrchestratorStatus::default(),
            source,
            writer: KeywordGraphWriter::new(store),
            pipeline,
            event_tx,
        }
    }

    pub fn status(&self) -> OrchestratorStatus {
        self.status
    }

    /// Pending jobs, oldest first.
    pub fn list(&self) -> Vec<JobId> {
        self.queue.list()
    }

    pub fn size(&self) -> usize {
        self.queue.len()
    }

    /// Subscribe to orchestrator events.
    pub fn subscribe(&self) -> broadcast::Receiver<KeywordEvent> {
        self.event_tx.subscribe()
    }

    fn broadcast(&self, event: KeywordEvent) {
        let _ = self.event_tx.send(event);
    }

    fn ensure_accepting(&self) -> Result<(), OrchestratorError> {
        if self.status.accepts_jobs() {
            Ok(())
        } else {
            Err(OrchestratorError::Stopped)
        }
    }

    fn queued(&self, added: usize) {
        if added > 0 {
            self.broadcast(KeywordEvent::JobsQueued {
                added,
                pending: self.queue.len(),
                timestamp: Utc::now(),
            });
        }
    }

    /// Queue one job. Returns `false` if it was already pending.
    pub fn add(&mut self, job: JobId) -> Result<bool, OrchestratorError> {
        self.ensure_accepting()?;
        let added = self.queue.add(job);
        self.queued(usize::from(added));
        Ok(added)
    }

    /// Queue jobs in order, skipping any already pending.
    pub fn bulk_add(&mut self, jobs: Vec<JobId>) -> Result<usize, OrchestratorError> {
        self.ensure_accepting()?;
        let added = self.queue.bulk_add(jobs);
        self.queued(added);
        Ok(added)
    }

    /// Drop a pending job. Returns `false` if it was not queued.
    pub fn remove(&mut self, job: &JobId) -> Result<bool, OrchestratorError> {
        self.ensure_accepting()?;
        Ok(self.queue.remove(job))
    }

    /// Queue every document the source has that carries no keywords yet.
    ///
    /// Ids are queued in the order the source lists them. Running it again
    /// without changes to the graph queues nothing new.
    pub async fn refresh_backlog(&mut self) -> Result<usize, OrchestratorError> {
        self.ensure_accepting()?;

        let all = self.source.list_all_document_ids().await?;
        let annotated = self.source.list_annotated_document_ids().await?;
        let total = all.len();

        let pending: Vec<JobId> = all.into_iter().filter(|id| !annotated.contains(id)).collect();
        let added = self.queue.bulk_add(pending);

        tracing::info!(
            "Refreshed backlog: {} documents, {} annotated, {} newly queued",
            total,
            annotated.len(),
            added
        );
        self.queued(added);
        Ok(added)
    }

    pub fn start(&mut self) -> Result<OrchestratorStatus, OrchestratorError> {
        self.set_status(OrchestratorStatus::Running)
    }

    pub fn pause(&mut self) -> Result<OrchestratorStatus, OrchestratorError> {
        self.set_status(OrchestratorStatus::Paused)
    }

    /// Stop for good. The backlog is kept but can no longer change or drain.
    pub fn stop(&mut self) -> Result<OrchestratorStatus, OrchestratorError> {
        self.set_status(OrchestratorStatus::Stopped)
    }

    fn set_status(&mut self, to: OrchestratorStatus) -> Result<OrchestratorStatus, OrchestratorError> {
        let old_status = self.status;
        let new_status = old_status.transition(to)?;
        if new_status != old_status {
            self.status = new_status;
            tracing::info!("Orchestrator {} -> {}", old_status, new_status);
            self.broadcast(KeywordEvent::StatusChanged {
                old_status,
                new_status,
                timestamp: Utc::now(),
            });
        }
        Ok(new_status)
    }

    /// Process every pending job, oldest first, until the backlog is empty.
    ///
    /// A job that fails is logged and dropped; the drain moves on to the next
    /// one. Only allowed while running.
    pub async fn drain(&mut self) -> Result<DrainReport, OrchestratorError> {
        if !self.status.can_drain() {
            return Err(OrchestratorError::NotRunning(self.status));
        }

        let run_id = RunId::new();
        let started_at = Utc::now();
        let mut processed = 0;
        let mut failed = 0;

        tracing::info!("Drain {} started with {} pending jobs", run_id, self.queue.len());

        while let Ok(job_id) = self.queue.get_first_job() {
            self.broadcast(KeywordEvent::JobStarted {
                job_id: job_id.clone(),
                run_id,
                timestamp: Utc::now(),
            });
            let started = Instant::now();

            match self.process(&job_id).await {
                Ok(report) => {
                    processed += 1;
                    let duration_ms = started.elapsed().as_millis() as u64;
                    if report.interrupted {
                        tracing::warn!(
                            "Job {} persisted partially: {} written, {} skipped",
                            job_id,
                            report.written,
                            report.skipped
                        );
                    } else {
                        tracing::info!(
                            "Job {} completed: {} keywords written in {}ms",
                            job_id,
                            report.written,
                            duration_ms
                        );
                    }
                    self.broadcast(KeywordEvent::JobCompleted {
                        job_id,
                        run_id,
                        keywords_written: report.written,
                        duration_ms,
                        timestamp: Utc::now(),
                    });
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!("Job {} failed: {}", job_id, e);
                    self.broadcast(KeywordEvent::JobFailed {
                        job_id,
                        run_id,
                        error: e.to_string(),
                        timestamp: Utc::now(),
                    });
                }
            }
        }

        let report = DrainReport {
            run_id,
            processed,
            failed,
            started_at,
            finished_at: Utc::now(),
        };
        tracing::info!(
            "Drain {} finished: {} processed, {} failed ({} success) in {}ms",
            run_id,
            report.processed,
            report.failed,
            report
                .success_rate()
                .map(|rate| format!("{:.0}%", rate))
                .unwrap_or_else(|| "n/a".to_string()),
            report.duration_ms()
        );
        Ok(report)
    }

    /// Fetch, extract and persist one job.
    async fn process(&self, job_id: &JobId) -> Result<PersistReport, CollaboratorError> {
        let document = self.source.fetch_document(job_id).await?;
        let extraction = self.extract(&document.id, &document.text);

        let mut report = PersistReport::default();
        for result in extraction.persistable() {
            report.merge(self.writer.persist(result).await?);
        }
        Ok(report)
    }

    fn extract(&self, job_id: &JobId, text: &str) -> KeywordExtraction {
        let extraction = self.pipeline.extract_text(job_id.clone(), text);
        for diagnostic in &extraction.diagnostics {
            self.broadcast(KeywordEvent::StageDegraded {
                job_id: job_id.clone(),
                stage: diagnostic.stage.to_string(),
                reason: diagnostic.reason.clone(),
                timestamp: Utc::now(),
            });
        }
        extraction
    }

    /// Run the pipeline for one document without writing anything.
    pub async fn preview(&self, job_id: &JobId) -> Result<KeywordExtraction, OrchestratorError> {
        let document = self.source.fetch_document(job_id).await?;
        Ok(self.extract(&document.id, &document.text))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use keyword_core::{CollabFuture, Document, UpsertAck, WordClass};

    use super::*;

    #[derive(Default)]
    struct FakeSource {
        docs: Vec<Document>,
        annotated: HashSet<JobId>,
        broken: HashSet<JobId>,
    }

    impl FakeSource {
        fn with_docs(ids: &[&str]) -> Self {
            Self {
                docs: ids
                    .iter()
                    .map(|id| Document::new(*id, "the dog ran quickly and the dog ran home"))
                    .collect(),
                ..Default::default()
            }
        }
    }

    impl DocumentSource for FakeSource {
        fn fetch_document<'a>(&'a self, id: &'a JobId) -> CollabFuture<'a, Document> {
            Box::pin(async move {
                if self.broken.contains(id) {
                    return Err(CollaboratorError::Unavailable("timed out".into()));
                }
                self.docs
                    .iter()
                    .find(|doc| &doc.id == id)
                    .cloned()
                    .ok_or_else(|| CollaboratorError::NotFound(id.to_string()))
            })
        }

        fn list_all_document_ids(&self) -> CollabFuture<'_, Vec<JobId>> {
            Box::pin(async move { Ok(self.docs.iter().map(|doc| doc.id.clone()).collect()) })
        }

        fn list_annotated_document_ids(&self) -> CollabFuture<'_, HashSet<JobId>> {
            Box::pin(async move { Ok(self.annotated.clone()) })
        }
    }

    /// Edges keyed by (document, word, class), last write wins.
    #[derive(Default)]
    struct FakeStore {
        edges: Mutex<HashMap<(JobId, String, WordClass), u32>>,
        calls: Mutex<Vec<WordClass>>,
        /// Report the store unavailable on the first upsert only.
        flaky_first: bool,
    }

    impl FakeStore {
        fn documents(&self) -> HashSet<JobId> {
            self.edges.lock().unwrap().keys().map(|(doc, _, _)| doc.clone()).collect()
        }
    }

    impl KeywordStore for FakeStore {
        fn upsert<'a>(
            &'a self,
            document_id: &'a JobId,
            word: &'a str,
            frequency: u32,
            word_class: WordClass,
        ) -> CollabFuture<'a, UpsertAck> {
            Box::pin(async move {
                let first = {
                    let mut calls = self.calls.lock().unwrap();
                    calls.push(word_class);
                    calls.len() == 1
                };
                if self.flaky_first && first {
                    return Err(CollaboratorError::Unavailable("connection reset".into()));
                }
                self.edges
                    .lock()
                    .unwrap()
                    .insert((document_id.clone(), word.to_string(), word_class), frequency);
                Ok(UpsertAck::Written)
            })
        }
    }

    fn orchestrator(source: FakeSource) -> (Orchestrator, Arc<FakeStore>) {
        orchestrator_with_store(source, FakeStore::default())
    }

    fn orchestrator_with_store(source: FakeSource, store: FakeStore) -> (Orchestrator, Arc<FakeStore>) {
        let store = Arc::new(store);
        let orchestrator = Orchestrator::new(
            Arc::new(source),
            store.clone(),
            Arc::new(KeywordPipeline::default()),
        );
        (orchestrator, store)
    }

    fn ids(raw: &[&str]) -> Vec<JobId> {
        raw.iter().map(|id| JobId::from(*id)).collect()
    }

    #[tokio::test]
    async fn drain_isolates_failed_job() {
        let mut source = FakeSource::with_docs(&["1", "2", "3"]);
        source.broken.insert(JobId::new("2"));
        let (mut orchestrator, store) = orchestrator(source);

        orchestrator.bulk_add(ids(&["1", "2", "3"])).unwrap();
        orchestrator.start().unwrap();
        let report = orchestrator.drain().await.unwrap();

        assert_eq!(report.processed, 2);
        assert_eq!(report.failed, 1);
        let rate = report.success_rate().unwrap();
        assert!((rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(orchestrator.size(), 0);
        assert_eq!(store.documents(), ids(&["1", "3"]).into_iter().collect());
    }

    #[tokio::test]
    async fn drain_persists_noun_and_verb_edges() {
        let (mut orchestrator, store) = orchestrator(FakeSource::with_docs(&["1"]));
        orchestrator.add(JobId::new("1")).unwrap();
        orchestrator.start().unwrap();
        orchestrator.drain().await.unwrap();

        let edges = store.edges.lock().unwrap();
        assert_eq!(edges.get(&(JobId::new("1"), "dog".to_string(), WordClass::Noun)), Some(&2));
        assert_eq!(edges.get(&(JobId::new("1"), "run".to_string(), WordClass::Verb)), Some(&2));
        assert!(edges.keys().all(|(_, _, class)| *class != WordClass::All));
    }

    #[tokio::test]
    async fn interrupted_noun_write_still_persists_verbs() {
        let store = FakeStore {
            flaky_first: true,
            ..Default::default()
        };
        let (mut orchestrator, store) = orchestrator_with_store(FakeSource::with_docs(&["1"]), store);
        orchestrator.add(JobId::new("1")).unwrap();
        orchestrator.start().unwrap();
        let report = orchestrator.drain().await.unwrap();

        assert_eq!(report.processed, 1);
        assert_eq!(report.failed, 0);
        let calls = store.calls.lock().unwrap().clone();
        assert_eq!(calls[0], WordClass::Noun);
        assert!(calls.len() > 1);
        assert!(calls[1..].iter().all(|class| *class == WordClass::Verb));
        let edges = store.edges.lock().unwrap();
        assert_eq!(edges.get(&(JobId::new("1"), "run".to_string(), WordClass::Verb)), Some(&2));
        assert!(edges.get(&(JobId::new("1"), "dog".to_string(), WordClass::Noun)).is_none());
    }

    #[tokio::test]
    async fn drain_requires_running() {
        let (mut orchestrator, _) = orchestrator(FakeSource::with_docs(&["1"]));
        orchestrator.add(JobId::new("1")).unwrap();

        let err = orchestrator.drain().await.unwrap_err();
        assert_eq!(err, OrchestratorError::NotRunning(OrchestratorStatus::Paused));
        assert_eq!(orchestrator.list(), ids(&["1"]));
    }

    #[tokio::test]
    async fn refresh_queues_unannotated_in_source_order() {
        let mut source = FakeSource::with_docs(&["A", "B", "C"]);
        source.annotated.insert(JobId::new("B"));
        let (mut orchestrator, _) = orchestrator(source);

        assert_eq!(orchestrator.refresh_backlog().await.unwrap(), 2);
        assert_eq!(orchestrator.list(), ids(&["A", "C"]));

        // Idempotent
        assert_eq!(orchestrator.refresh_backlog().await.unwrap(), 0);
        assert_eq!(orchestrator.list(), ids(&["A", "C"]));
    }

    #[test]
    fn status_machine() {
        let (mut orchestrator, _) = orchestrator(FakeSource::default());
        assert_eq!(orchestrator.status(), OrchestratorStatus::Paused);
        assert_eq!(orchestrator.start().unwrap(), OrchestratorStatus::Running);
        assert_eq!(orchestrator.start().unwrap(), OrchestratorStatus::Running);
        assert_eq!(orchestrator.pause().unwrap(), OrchestratorStatus::Paused);
        assert_eq!(orchestrator.stop().unwrap(), OrchestratorStatus::Stopped);

        assert!(matches!(orchestrator.start(), Err(OrchestratorError::State(_))));
        assert!(matches!(orchestrator.pause(), Err(OrchestratorError::State(_))));
        assert_eq!(orchestrator.stop().unwrap(), OrchestratorStatus::Stopped);
    }

    #[tokio::test]
    async fn stopped_rejects_queue_changes() {
        let (mut orchestrator, _) = orchestrator(FakeSource::with_docs(&["A"]));
        orchestrator.add(JobId::new("A")).unwrap();
        orchestrator.stop().unwrap();

        assert_eq!(orchestrator.add(JobId::new("B")), Err(OrchestratorError::Stopped));
        assert_eq!(orchestrator.bulk_add(ids(&["B"])), Err(OrchestratorError::Stopped));
        assert_eq!(orchestrator.remove(&JobId::new("A")), Err(OrchestratorError::Stopped));
        assert_eq!(orchestrator.refresh_backlog().await, Err(OrchestratorError::Stopped));
        assert_eq!(
            orchestrator.drain().await.unwrap_err(),
            OrchestratorError::NotRunning(OrchestratorStatus::Stopped)
        );
        assert_eq!(orchestrator.list(), ids(&["A"]));
    }

    #[tokio::test]
    async fn preview_does_not_persist() {
        let (orchestrator, store) = orchestrator(FakeSource::with_docs(&["1"]));

        let extraction = orchestrator.preview(&JobId::new("1")).await.unwrap();
        assert_eq!(extraction.nouns.get("dog"), Some(2));
        assert!(store.documents().is_empty());

        let missing = orchestrator.preview(&JobId::new("nope")).await.unwrap_err();
        assert!(matches!(missing, OrchestratorError::Collaborator(CollaboratorError::NotFound(_))));
    }

    #[tokio::test]
    async fn events_follow_the_drain() {
        let mut source = FakeSource::with_docs(&["1", "2"]);
        source.broken.insert(JobId::new("2"));
        let (mut orchestrator, _) = orchestrator(source);
        let mut events = orchestrator.subscribe();

        orchestrator.bulk_add(ids(&["1", "2"])).unwrap();
        orchestrator.start().unwrap();
        orchestrator.drain().await.unwrap();

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event);
        }
        assert!(matches!(seen[0], KeywordEvent::JobsQueued { added: 2, pending: 2, .. }));
        assert!(matches!(seen[1], KeywordEvent::StatusChanged { .. }));
        assert!(matches!(seen[2], KeywordEvent::JobStarted { .. }));
        assert!(matches!(seen[3], KeywordEvent::JobCompleted { .. }));
        assert!(matches!(seen[4], KeywordEvent::JobStarted { .. }));
        assert!(matches!(seen[5], KeywordEvent::JobFailed { .. }));
        assert_eq!(seen.len(), 6);
    }
}
