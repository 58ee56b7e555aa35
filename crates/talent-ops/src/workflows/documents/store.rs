use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::domain::{DocumentId, ProjectDocument};
use crate::workflows::people::ProjectId;

pub trait DocumentStore: Send + Sync {
    fn insert(&self, document: ProjectDocument) -> Result<ProjectDocument, DocumentStoreError>;
    fn update(&self, document: ProjectDocument) -> Result<ProjectDocument, DocumentStoreError>;
    fn fetch(&self, id: &DocumentId) -> Result<Option<ProjectDocument>, DocumentStoreError>;
    fn delete(&self, id: &DocumentId) -> Result<bool, DocumentStoreError>;
    fn list_by_project(&self, project: &ProjectId)
        -> Result<Vec<ProjectDocument>, DocumentStoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("document already exists")]
    Conflict,
    #[error("document not found")]
    NotFound,
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentStore {
    documents: Arc<Mutex<BTreeMap<DocumentId, ProjectDocument>>>,
}

impl DocumentStore for InMemoryDocumentStore {
    fn insert(&self, document: ProjectDocument) -> Result<ProjectDocument, DocumentStoreError> {
        let mut guard = self.documents.lock().expect("document mutex poisoned");
        if guard.contains_key(&document.id) {
            return Err(DocumentStoreError::Conflict);
        }
        guard.insert(document.id.clone(), document.clone());
        Ok(document)
    }

    fn update(&self, document: ProjectDocument) -> Result<ProjectDocument, DocumentStoreError> {
        let mut guard = self.documents.lock().expect("document mutex poisoned");
        let slot = guard
            .get_mut(&document.id)
            .ok_or(DocumentStoreError::NotFound)?;
        *slot = document.clone();
        Ok(document)
    }

    fn fetch(&self, id: &DocumentId) -> Result<Option<ProjectDocument>, DocumentStoreError> {
        let guard = self.documents.lock().expect("document mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &DocumentId) -> Result<bool, DocumentStoreError> {
        let mut guard = self.documents.lock().expect("document mutex poisoned");
        Ok(guard.remove(id).is_some())
    }

    fn list_by_project(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<ProjectDocument>, DocumentStoreError> {
        let guard = self.documents.lock().expect("document mutex poisoned");
        Ok(guard
            .values()
            .filter(|document| &document.project_id == project)
            .cloned()
            .collect())
    }
}
