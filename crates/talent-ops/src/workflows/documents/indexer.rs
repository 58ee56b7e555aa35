//! Fire-and-forget hand-off of uploaded files to the ingestion service.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use super::domain::IndexRequest;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("indexer unreachable: {0}")]
    Transport(String),
    #[error("indexer rejected request with status {status}")]
    Rejected { status: u16 },
}

/// Something that can ingest an uploaded document for search.
#[async_trait]
pub trait DocumentIndexer: Send + Sync {
    async fn index(&self, request: IndexRequest) -> Result<(), IndexError>;
}

/// Indexer used when no ingestion endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopIndexer;

#[async_trait]
impl DocumentIndexer for NoopIndexer {
    async fn index(&self, request: IndexRequest) -> Result<(), IndexError> {
        debug!(document = %request.document_id.0, "indexing disabled, request skipped");
        Ok(())
    }
}

/// Spawns one indexing task per request. Each request is attempted at most
/// once; failures are logged and never reach the caller.
#[derive(Clone)]
pub struct IndexDispatcher {
    indexer: Arc<dyn DocumentIndexer>,
}

impl IndexDispatcher {
    pub fn new(indexer: Arc<dyn DocumentIndexer>) -> Self {
        Self { indexer }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopIndexer))
    }

    /// Returns whether a task was spawned.
    pub fn dispatch(&self, request: IndexRequest) -> bool {
        let Ok(handle) = Handle::try_current() else {
            warn!(
                document = %request.document_id.0,
                "no async runtime available, index request dropped"
            );
            return false;
        };

        let indexer = Arc::clone(&self.indexer);
        handle.spawn(async move {
            let document = request.document_id.0.clone();
            match indexer.index(request).await {
                Ok(()) => debug!(document = %document, "document handed to indexer"),
                Err(err) => warn!(document = %document, error = %err, "document indexing failed"),
            }
        });
        true
    }
}

impl std::fmt::Debug for IndexDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexDispatcher").finish_non_exhaustive()
    }
}
