//! Project documents and the search indexing side channel.

mod domain;
mod indexer;
pub mod router;
mod service;
mod store;

pub use domain::{
    DocumentDraft, DocumentId, DocumentType, DocumentUpdate, IndexRequest, ProjectDocument,
    DEFAULT_DEPARTMENT, VISIBLE_TO_ALL,
};
pub use indexer::{DocumentIndexer, IndexDispatcher, IndexError, NoopIndexer};
pub use router::document_router;
pub use service::{DocumentService, DocumentServiceError};
pub use store::{DocumentStore, DocumentStoreError, InMemoryDocumentStore};
