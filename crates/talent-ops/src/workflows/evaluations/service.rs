use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{EvaluationDraft, EvaluationFilter, EvaluationId, EvaluationRecord, AuthorRole};
use super::period::PeriodDescriptor;
use super::repository::{EvaluationStore, RepositoryError};
use super::scoring::{aggregate, RatingSet, MAX_RATING, MIN_RATING};
use crate::workflows::people::{PersonId, Viewer};

/// Role-gated CRUD over performance evaluations.
pub struct EvaluationService<S> {
    store: Arc<S>,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

impl<S> EvaluationService<S>
where
    S: EvaluationStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Live "average so far" shown while the form is filled in. Uses the
    /// same rule as the stored `soft_skills` value.
    pub fn preview(&self, ratings: &RatingSet) -> Option<f64> {
        aggregate(ratings)
    }

    /// Evaluations visible to `viewer`, newest first.
    pub fn list(
        &self,
        viewer: &Viewer,
        filter: &EvaluationFilter,
    ) -> Result<Vec<EvaluationRecord>, EvaluationServiceError> {
        let mut records: Vec<EvaluationRecord> = self
            .store
            .list()?
            .into_iter()
            .filter(|record| {
                viewer.role.can_view_all_evaluations() || record.employee_id == viewer.id
            })
            .filter(|record| filter.matches(record))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(records)
    }

    /// The evaluation of `employee` for exactly `period`, if one exists.
    pub fn find_for_period(
        &self,
        viewer: &Viewer,
        employee: &PersonId,
        period: &PeriodDescriptor,
    ) -> Result<Option<EvaluationRecord>, EvaluationServiceError> {
        if !viewer.role.can_view_all_evaluations() && &viewer.id != employee {
            return Err(EvaluationServiceError::Forbidden);
        }
        let found = self
            .store
            .list()?
            .into_iter()
            .filter(|record| &record.employee_id == employee && &record.period == period)
            .max_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(found)
    }

    pub fn create(
        &self,
        viewer: &Viewer,
        draft: EvaluationDraft,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        ensure_can_write(viewer)?;
        let draft = validate(draft)?;

        let record = EvaluationRecord {
            id: next_evaluation_id(),
            soft_skills: aggregate(&draft.ratings),
            employee_id: draft.employee_id,
            project_id: draft.project_id,
            period: draft.period,
            score: draft.score,
            ratings: draft.ratings,
            review: draft.review,
            improvements: draft.improvements,
            given_by_role: AuthorRole::for_role(viewer.role),
            created_by: viewer.id.clone(),
            created_at: Utc::now(),
            updated_at: None,
        };

        let stored = self.store.insert(record).map_err(|err| {
            warn!(error = %err, "failed to save evaluation");
            err
        })?;
        info!(
            evaluation = %stored.id.0,
            employee = %stored.employee_id,
            period = %stored.period,
            "evaluation created"
        );
        Ok(stored)
    }

    pub fn update(
        &self,
        viewer: &Viewer,
        id: &EvaluationId,
        draft: EvaluationDraft,
    ) -> Result<EvaluationRecord, EvaluationServiceError> {
        ensure_can_write(viewer)?;
        let draft = validate(draft)?;

        let existing = self.store.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        let record = EvaluationRecord {
            soft_skills: aggregate(&draft.ratings),
            employee_id: draft.employee_id,
            project_id: draft.project_id,
            period: draft.period,
            score: draft.score,
            ratings: draft.ratings,
            review: draft.review,
            improvements: draft.improvements,
            given_by_role: AuthorRole::for_role(viewer.role),
            created_by: viewer.id.clone(),
            updated_at: Some(Utc::now()),
            ..existing
        };

        let stored = self.store.update(record)?;
        info!(evaluation = %stored.id.0, "evaluation updated");
        Ok(stored)
    }

    pub fn delete(&self, viewer: &Viewer, id: &EvaluationId) -> Result<(), EvaluationServiceError> {
        ensure_can_write(viewer)?;
        if !self.store.delete(id)? {
            warn!(evaluation = %id.0, "delete removed no rows");
            return Err(EvaluationServiceError::NothingDeleted);
        }
        info!(evaluation = %id.0, "evaluation deleted");
        Ok(())
    }
}

fn ensure_can_write(viewer: &Viewer) -> Result<(), EvaluationServiceError> {
    if viewer.role.can_evaluate() {
        Ok(())
    } else {
        Err(EvaluationServiceError::Forbidden)
    }
}

fn validate(mut draft: EvaluationDraft) -> Result<EvaluationDraft, EvaluationServiceError> {
    if draft.employee_id.0.trim().is_empty() {
        return Err(EvaluationServiceError::Validation(
            "an employee must be selected".to_string(),
        ));
    }
    if let Some(score) = draft.score {
        if !score.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&score) {
            return Err(EvaluationServiceError::Validation(format!(
                "score must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
    }
    // A blank score field and a literal zero are indistinguishable on the form.
    draft.score = draft.score.filter(|score| *score > 0.0);
    if draft
        .project_id
        .as_ref()
        .is_some_and(|project| project.0.trim().is_empty())
    {
        draft.project_id = None;
    }
    Ok(draft)
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationServiceError {
    #[error("only executives and managers can modify evaluations")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("deletion failed: the evaluation does not exist or you may not have permission to delete it")]
    NothingDeleted,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
