use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::domain::{EvaluationId, EvaluationRecord};

/// Storage abstraction for evaluation rows.
pub trait EvaluationStore: Send + Sync {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError>;
    fn update(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError>;
    /// Returns `false` when no row was removed.
    fn delete(&self, id: &EvaluationId) -> Result<bool, RepositoryError>;
    fn list(&self) -> Result<Vec<EvaluationRecord>, RepositoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local evaluation table.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEvaluationStore {
    records: Arc<Mutex<BTreeMap<EvaluationId, EvaluationRecord>>>,
}

impl InMemoryEvaluationStore {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<EvaluationId, EvaluationRecord>>, RepositoryError>
    {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("evaluation mutex poisoned".to_string()))
    }
}

impl EvaluationStore for InMemoryEvaluationStore {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        match guard.get_mut(&record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(record)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn delete(&self, id: &EvaluationId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.remove(id).is_some())
    }

    fn list(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Ok(self.lock()?.values().cloned().collect())
    }
}
