mod common;

use std::collections::HashSet;
use std::error::Error;

use keyword_core::{
    CollaboratorError, Document, DocumentSource, JobId, KeywordStore, UpsertAck, WordClass,
};

use db::SurrealGraph;
use db::repositories::{DocumentRepository, KeywordRepository};

async fn seed(ids: &[&str]) -> Result<(), Box<dyn Error>> {
    for id in ids {
        DocumentRepository::upsert(&Document::new(*id, format!("text of {}", id))).await?;
    }
    Ok(())
}

async fn document_repository() -> Result<(), Box<dyn Error>> {
    common::reset().await?;

    seed(&["b", "a", "c"]).await?;

    let doc = DocumentRepository::get(&JobId::new("a")).await?;
    assert_eq!(doc.text, "text of a");

    DocumentRepository::upsert(&Document::new("a", "rewritten")).await?;
    assert_eq!(DocumentRepository::get(&JobId::new("a")).await?.text, "rewritten");

    let ids = DocumentRepository::list_ids().await?;
    assert_eq!(ids, vec![JobId::new("a"), JobId::new("b"), JobId::new("c")]);

    assert!(DocumentRepository::exists(&JobId::new("b")).await?);
    assert!(!DocumentRepository::exists(&JobId::new("zzz")).await?);

    let missing = DocumentRepository::get(&JobId::new("zzz")).await;
    assert!(matches!(missing, Err(db::DbError::NotFound(_))));

    DocumentRepository::delete(&JobId::new("c")).await?;
    assert_eq!(DocumentRepository::list_ids().await?.len(), 2);

    Ok(())
}

async fn upsert_is_idempotent() -> Result<(), Box<dyn Error>> {
    common::reset().await?;
    seed(&["doc-1"]).await?;
    let doc = JobId::new("doc-1");

    let ack = KeywordRepository::upsert_edge(&doc, "climb", 3, WordClass::Noun).await?;
    assert_eq!(ack, UpsertAck::Written);
    KeywordRepository::upsert_edge(&doc, "climb", 3, WordClass::Noun).await?;
    assert_eq!(KeywordRepository::count_edges().await?, 1);

    // Last write wins
    KeywordRepository::upsert_edge(&doc, "climb", 7, WordClass::Noun).await?;
    let edges = KeywordRepository::list_for_document(&doc).await?;
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].word, "climb");
    assert_eq!(edges[0].frequency, 7);
    assert_eq!(edges[0].word_class, WordClass::Noun);

    // Same word in another class is a separate edge to the same keyword node
    KeywordRepository::upsert_edge(&doc, "climb", 2, WordClass::Verb).await?;
    assert_eq!(KeywordRepository::count_edges().await?, 2);
    assert_eq!(KeywordRepository::count_keywords().await?, 1);

    Ok(())
}

async fn keyword_nodes_are_shared() -> Result<(), Box<dyn Error>> {
    common::reset().await?;
    seed(&["doc-1", "doc-2"]).await?;

    KeywordRepository::upsert_edge(&JobId::new("doc-1"), "race", 4, WordClass::Noun).await?;
    KeywordRepository::upsert_edge(&JobId::new("doc-2"), "race", 1, WordClass::Noun).await?;

    assert_eq!(KeywordRepository::count_keywords().await?, 1);
    assert_eq!(KeywordRepository::count_edges().await?, 2);

    let edges = KeywordRepository::list_for_document(&JobId::new("doc-2")).await?;
    assert_eq!(edges[0].frequency, 1);

    Ok(())
}

async fn missing_document_writes_nothing() -> Result<(), Box<dyn Error>> {
    common::reset().await?;

    let ack = KeywordRepository::upsert_edge(&JobId::new("ghost"), "dog", 1, WordClass::Noun).await?;
    assert_eq!(ack, UpsertAck::DocumentMissing);
    assert_eq!(KeywordRepository::count_edges().await?, 0);
    assert_eq!(KeywordRepository::count_keywords().await?, 0);

    Ok(())
}

async fn surreal_graph_collaborators() -> Result<(), Box<dyn Error>> {
    common::reset().await?;
    seed(&["A", "B", "C"]).await?;
    let graph = SurrealGraph::new();

    graph.upsert(&JobId::new("B"), "dog", 1, WordClass::Noun).await?;

    let all = graph.list_all_document_ids().await?;
    assert_eq!(all, vec![JobId::new("A"), JobId::new("B"), JobId::new("C")]);

    let annotated = graph.list_annotated_document_ids().await?;
    assert_eq!(annotated, HashSet::from([JobId::new("B")]));

    let doc = graph.fetch_document(&JobId::new("C")).await?;
    assert_eq!(doc.id, JobId::new("C"));

    let missing = graph.fetch_document(&JobId::new("D")).await;
    assert!(matches!(missing, Err(CollaboratorError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_graph() -> Result<(), Box<dyn Error>> {
    let _guard = common::setup_db().await?;

    document_repository().await?;
    upsert_is_idempotent().await?;
    keyword_nodes_are_shared().await?;
    missing_document_writes_nothing().await?;
    surreal_graph_collaborators().await?;

    Ok(())
}
