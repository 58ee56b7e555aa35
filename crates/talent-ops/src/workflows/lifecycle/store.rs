use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::domain::{LifecycleProfile, StageChange};
use crate::workflows::people::PersonId;

/// Persistence for lifecycle data. `apply_stage_change` updates the profile
/// and appends the history row as a single operation.
pub trait LifecycleStore: Send + Sync {
    fn list_employees(&self) -> Result<Vec<LifecycleProfile>, LifecycleStoreError>;
    fn history(&self, employee: &PersonId) -> Result<Vec<StageChange>, LifecycleStoreError>;
    fn apply_stage_change(&self, change: StageChange) -> Result<StageChange, LifecycleStoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleStoreError {
    #[error("employee {0} not found")]
    UnknownEmployee(PersonId),
    #[error("lifecycle store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct LifecycleTables {
    profiles: BTreeMap<PersonId, LifecycleProfile>,
    history: Vec<StageChange>,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryLifecycleStore {
    tables: Arc<Mutex<LifecycleTables>>,
}

impl InMemoryLifecycleStore {
    pub fn new(profiles: impl IntoIterator<Item = LifecycleProfile>) -> Self {
        let tables = LifecycleTables {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.id.clone(), profile))
                .collect(),
            history: Vec::new(),
        };
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    fn with_tables<T>(
        &self,
        f: impl FnOnce(&mut LifecycleTables) -> Result<T, LifecycleStoreError>,
    ) -> Result<T, LifecycleStoreError> {
        let mut guard = self
            .tables
            .lock()
            .map_err(|_| LifecycleStoreError::Unavailable("lifecycle mutex poisoned".to_string()))?;
        f(&mut guard)
    }
}

impl LifecycleStore for InMemoryLifecycleStore {
    fn list_employees(&self) -> Result<Vec<LifecycleProfile>, LifecycleStoreError> {
        self.with_tables(|tables| Ok(tables.profiles.values().cloned().collect()))
    }

    fn history(&self, employee: &PersonId) -> Result<Vec<StageChange>, LifecycleStoreError> {
        self.with_tables(|tables| {
            Ok(tables
                .history
                .iter()
                .filter(|change| &change.employee_id == employee)
                .cloned()
                .collect())
        })
    }

    fn apply_stage_change(&self, change: StageChange) -> Result<StageChange, LifecycleStoreError> {
        self.with_tables(|tables| {
            let profile = tables
                .profiles
                .get_mut(&change.employee_id)
                .ok_or_else(|| LifecycleStoreError::UnknownEmployee(change.employee_id.clone()))?;
            let recorded = StageChange {
                previous_stage: Some(profile.employee_stage),
                ..change
            };
            profile.employee_stage = recorded.new_stage;
            tables.history.push(recorded.clone());
            Ok(recorded)
        })
    }
}
