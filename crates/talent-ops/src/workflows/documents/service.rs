use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{DocumentDraft, DocumentId, DocumentType, DocumentUpdate, ProjectDocument};
use super::indexer::IndexDispatcher;
use super::store::{DocumentStore, DocumentStoreError};
use crate::workflows::people::{ProjectId, Viewer};

/// Project document library. Writes are limited to project managers and team
/// leads; uploads that carry a file are handed to the indexer after the store
/// confirms them.
pub struct DocumentService<S> {
    store: Arc<S>,
    indexer: IndexDispatcher,
}

static DOCUMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_document_id() -> DocumentId {
    let id = DOCUMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DocumentId(format!("doc-{id:06}"))
}

impl<S> DocumentService<S>
where
    S: DocumentStore + 'static,
{
    pub fn new(store: Arc<S>, indexer: IndexDispatcher) -> Self {
        Self { store, indexer }
    }

    /// Documents of a project, newest first.
    pub fn list(&self, project: &ProjectId) -> Result<Vec<ProjectDocument>, DocumentServiceError> {
        let mut documents = self.store.list_by_project(project)?;
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(documents)
    }

    /// Per-type counts for the filter chips. Every type is present.
    pub fn type_counts(
        &self,
        project: &ProjectId,
    ) -> Result<BTreeMap<DocumentType, usize>, DocumentServiceError> {
        let mut counts: BTreeMap<DocumentType, usize> =
            DocumentType::ALL.into_iter().map(|kind| (kind, 0)).collect();
        for document in self.store.list_by_project(project)? {
            *counts.entry(document.doc_type).or_default() += 1;
        }
        Ok(counts)
    }

    pub fn create(
        &self,
        viewer: &Viewer,
        draft: DocumentDraft,
    ) -> Result<ProjectDocument, DocumentServiceError> {
        ensure_can_manage(viewer)?;
        let title = required_title(&draft.title)?;

        let document = ProjectDocument {
            id: next_document_id(),
            project_id: draft.project_id,
            title,
            content: draft.content,
            doc_type: draft.doc_type,
            file_url: draft.file_url.filter(|url| !url.trim().is_empty()),
            department: draft.department,
            role_visibility: draft.role_visibility,
            created_by: viewer.id.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };

        let stored = self.store.insert(document).map_err(|err| {
            warn!(error = %err, "failed to save document");
            err
        })?;
        info!(
            document = %stored.id.0,
            project = %stored.project_id.0,
            doc_type = stored.doc_type.key(),
            "document created"
        );

        if let Some(request) = stored.index_request() {
            self.indexer.dispatch(request);
        }
        Ok(stored)
    }

    pub fn update(
        &self,
        viewer: &Viewer,
        id: &DocumentId,
        update: DocumentUpdate,
    ) -> Result<ProjectDocument, DocumentServiceError> {
        ensure_can_manage(viewer)?;
        let title = required_title(&update.title)?;
        let existing = self.store.fetch(id)?.ok_or(DocumentStoreError::NotFound)?;

        let stored = self.store.update(ProjectDocument {
            title,
            content: update.content,
            doc_type: update.doc_type,
            updated_at: Some(Utc::now()),
            ..existing
        })?;
        info!(document = %stored.id.0, "document updated");
        Ok(stored)
    }

    pub fn delete(&self, viewer: &Viewer, id: &DocumentId) -> Result<(), DocumentServiceError> {
        ensure_can_manage(viewer)?;
        if !self.store.delete(id)? {
            return Err(DocumentStoreError::NotFound.into());
        }
        info!(document = %id.0, "document deleted");
        Ok(())
    }
}

fn ensure_can_manage(viewer: &Viewer) -> Result<(), DocumentServiceError> {
    if viewer.role.can_manage_documents() {
        Ok(())
    } else {
        Err(DocumentServiceError::Forbidden)
    }
}

fn required_title(raw: &str) -> Result<String, DocumentServiceError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(DocumentServiceError::Validation(
            "document title is required".to_string(),
        ));
    }
    Ok(title.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentServiceError {
    #[error("only project managers and team leads can manage documents")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}
