use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{EmployeeStage, LifecycleProfile, StageChange};
use super::store::{LifecycleStore, LifecycleStoreError};
use crate::workflows::people::{PersonId, Viewer};

pub struct LifecycleService<S> {
    store: Arc<S>,
}

/// Requested stage transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct StageChangeRequest {
    pub new_stage: EmployeeStage,
    #[serde(default)]
    pub reason: String,
}

impl<S> LifecycleService<S>
where
    S: LifecycleStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// All profiles ordered by full name. Profiles without a name sort first.
    pub fn employees(&self) -> Result<Vec<LifecycleProfile>, LifecycleServiceError> {
        let mut employees = self.store.list_employees()?;
        employees.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
        Ok(employees)
    }

    /// Stage history of one employee, newest first.
    pub fn history(&self, employee: &PersonId) -> Result<Vec<StageChange>, LifecycleServiceError> {
        let mut history = self.store.history(employee)?;
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(history)
    }

    pub fn change_stage(
        &self,
        viewer: &Viewer,
        employee: &PersonId,
        request: StageChangeRequest,
    ) -> Result<StageChange, LifecycleServiceError> {
        if !viewer.role.can_approve_stage_changes() {
            return Err(LifecycleServiceError::Forbidden);
        }
        let reason = request.reason.trim();
        if reason.is_empty() {
            return Err(LifecycleServiceError::Validation(
                "a reason is required for a stage change".to_string(),
            ));
        }

        let change = StageChange {
            employee_id: employee.clone(),
            previous_stage: None,
            new_stage: request.new_stage,
            reason: reason.to_string(),
            approved_by: Some(viewer.id.clone()),
            created_at: Utc::now(),
        };

        let recorded = self.store.apply_stage_change(change).map_err(|err| {
            warn!(employee = %employee, error = %err, "stage change failed");
            err
        })?;
        info!(
            employee = %employee,
            transition = %recorded.transition_label(),
            approver = %viewer.id,
            "employee stage updated"
        );
        Ok(recorded)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleServiceError {
    #[error("only executives and managers can change employee stages")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] LifecycleStoreError),
}
