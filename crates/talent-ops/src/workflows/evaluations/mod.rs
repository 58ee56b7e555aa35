//! Performance evaluations: per-trait soft-skill ratings, the aggregate score
//! derived from them, and role-gated persistence.

pub mod domain;
pub mod period;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AuthorRole, EvaluationDraft, EvaluationFilter, EvaluationId, EvaluationRecord,
    EvaluationSummary,
};
pub use period::{PeriodDescriptor, PeriodError, PeriodKind, Quarter};
pub use repository::{EvaluationStore, InMemoryEvaluationStore, RepositoryError};
pub use router::evaluation_router;
pub use scoring::{
    aggregate, color_band, format_score, ColorBand, RatingSet, TraitKey, MAX_RATING, MIN_RATING,
};
pub use service::{EvaluationService, EvaluationServiceError};
