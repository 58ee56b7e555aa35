//! Employee lifecycle: career stages, functional tracks and the audited stage
//! change history.

mod domain;
pub mod router;
mod service;
mod store;

pub use domain::{EmployeeStage, FunctionalTrack, LifecycleProfile, StageChange, NO_TRACK_LABEL};
pub use router::lifecycle_router;
pub use service::{LifecycleService, LifecycleServiceError, StageChangeRequest};
pub use store::{InMemoryLifecycleStore, LifecycleStore, LifecycleStoreError};
