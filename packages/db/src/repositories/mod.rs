//! Repository implementations for database operations.

mod document_repo;
mod keyword_repo;

pub use document_repo::DocumentRepository;
pub use keyword_repo::{KeywordEdge, KeywordRepository};
