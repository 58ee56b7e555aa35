use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::period::{PeriodDescriptor, PeriodKind};
use super::scoring::{color_band, format_score, ColorBand, RatingSet};
use crate::workflows::people::{PersonId, ProjectId, Role};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// Role recorded on an evaluation. Anyone allowed to write an evaluation who
/// is not an executive is recorded as a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorRole {
    Executive,
    Manager,
}

impl AuthorRole {
    pub fn for_role(role: Role) -> Self {
        if role == Role::Executive {
            AuthorRole::Executive
        } else {
            AuthorRole::Manager
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AuthorRole::Executive => "Executive",
            AuthorRole::Manager => "Manager",
        }
    }
}

/// Form contents for creating or editing an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationDraft {
    pub employee_id: PersonId,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(flatten)]
    pub period: PeriodDescriptor,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub ratings: RatingSet,
    #[serde(default)]
    pub review: String,
    #[serde(default)]
    pub improvements: String,
}

/// Stored evaluation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub employee_id: PersonId,
    pub project_id: Option<ProjectId>,
    #[serde(flatten)]
    pub period: PeriodDescriptor,
    pub score: Option<f64>,
    pub ratings: RatingSet,
    /// Aggregate of `ratings`, written by the service on every save.
    pub soft_skills: Option<f64>,
    pub review: String,
    pub improvements: String,
    pub given_by_role: AuthorRole,
    pub created_by: PersonId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl EvaluationRecord {
    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary {
            id: self.id.clone(),
            employee_id: self.employee_id.clone(),
            period: self.period.value(),
            score: format_score(self.score),
            score_band: color_band(self.score),
            soft_skills: format_score(self.soft_skills),
            soft_skills_band: color_band(self.soft_skills),
            given_by: self.given_by_role.label(),
        }
    }
}

/// Table row as shown in the evaluation list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub id: EvaluationId,
    pub employee_id: PersonId,
    pub period: String,
    pub score: String,
    pub score_band: ColorBand,
    pub soft_skills: String,
    pub soft_skills_band: ColorBand,
    pub given_by: &'static str,
}

/// Optional list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EvaluationFilter {
    #[serde(default)]
    pub period: Option<PeriodKind>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
}

impl EvaluationFilter {
    pub fn matches(&self, record: &EvaluationRecord) -> bool {
        let period_ok = self
            .period
            .map_or(true, |kind| record.period.kind() == kind);
        let project_ok = self
            .project_id
            .as_ref()
            .map_or(true, |project| record.project_id.as_ref() == Some(project));
        period_ok && project_ok
    }
}
