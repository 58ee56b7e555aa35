//! Organisation hierarchy: partitions profile rows into a four-bucket tree and
//! models the collapsible view over it.

mod builder;
mod domain;
mod expansion;
pub mod import;
mod render;
pub mod router;
mod service;
mod store;

pub use builder::{EmptyInput, HierarchyBuilder};
pub use domain::{
    Department, HierarchyNode, PersonRecord, DEFAULT_ORGANISATION_LABEL, UNKNOWN_DISPLAY_NAME,
};
pub use expansion::ExpansionState;
pub use import::{parse_profiles, CsvProfileStore};
pub use render::{render, render_outline, RenderedRow, RowKind};
pub use router::hierarchy_router;
pub use service::{HierarchyError, HierarchyView, OrgHierarchyService};
pub use store::{InMemoryProfileStore, ProfileStore, StoreError};
