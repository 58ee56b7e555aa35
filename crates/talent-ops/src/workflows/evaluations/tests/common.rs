use std::sync::Arc;

use axum::response::Response;
use chrono::Month;
use serde_json::Value;

use crate::workflows::evaluations::domain::{EvaluationDraft, EvaluationId, EvaluationRecord};
use crate::workflows::evaluations::period::PeriodDescriptor;
use crate::workflows::evaluations::repository::{EvaluationStore, RepositoryError};
use crate::workflows::evaluations::scoring::{RatingSet, TraitKey};
use crate::workflows::evaluations::{EvaluationService, InMemoryEvaluationStore};
use crate::workflows::people::{PersonId, Role, Viewer};

pub(super) fn manager() -> Viewer {
    Viewer::new("mgr-1", Role::Manager)
}

pub(super) fn executive() -> Viewer {
    Viewer::new("exec-1", Role::Executive)
}

pub(super) fn team_lead() -> Viewer {
    Viewer::new("lead-1", Role::TeamLead)
}

pub(super) fn employee(id: &str) -> Viewer {
    Viewer::new(id, Role::Employee)
}

pub(super) fn january() -> PeriodDescriptor {
    PeriodDescriptor::month(Month::January, 2025)
}

pub(super) fn ratings() -> RatingSet {
    RatingSet::new()
        .with(TraitKey::Accountability, 8.0)
        .with(TraitKey::Compliance, 0.0)
        .with(TraitKey::Communication, 6.0)
}

pub(super) fn draft_for(employee_id: &str) -> EvaluationDraft {
    EvaluationDraft {
        employee_id: PersonId(employee_id.to_string()),
        project_id: None,
        period: january(),
        score: Some(7.5),
        ratings: ratings(),
        review: "Shipped the billing migration".to_string(),
        improvements: "Delegate more".to_string(),
    }
}

pub(super) fn build_service() -> (
    Arc<EvaluationService<InMemoryEvaluationStore>>,
    InMemoryEvaluationStore,
) {
    let store = InMemoryEvaluationStore::default();
    let service = Arc::new(EvaluationService::new(Arc::new(store.clone())));
    (service, store)
}

pub(super) struct UnavailableStore;

impl EvaluationStore for UnavailableStore {
    fn insert(&self, _record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &EvaluationId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
