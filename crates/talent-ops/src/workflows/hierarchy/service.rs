use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::builder::{EmptyInput, HierarchyBuilder};
use super::domain::HierarchyNode;
use super::expansion::ExpansionState;
use super::render::{render, RenderedRow};
use super::store::{ProfileStore, StoreError};

/// A freshly built tree together with its initial expansion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyView {
    pub tree: HierarchyNode,
    pub expansion: ExpansionState,
}

impl HierarchyView {
    pub fn rows(&self) -> Vec<RenderedRow> {
        render(&self.tree, &self.expansion)
    }

    /// Reducer step: returns the view with `label` toggled.
    pub fn toggle(self, label: &str) -> Self {
        let expansion = self.expansion.toggled(&self.tree, label);
        Self {
            tree: self.tree,
            expansion,
        }
    }
}

/// Fetches profiles and rebuilds the org tree on every call.
pub struct OrgHierarchyService<P> {
    store: Arc<P>,
    builder: HierarchyBuilder,
}

impl<P> OrgHierarchyService<P>
where
    P: ProfileStore + 'static,
{
    pub fn new(store: Arc<P>, builder: HierarchyBuilder) -> Self {
        Self { store, builder }
    }

    pub fn builder(&self) -> &HierarchyBuilder {
        &self.builder
    }

    /// Build a new view. Any previous toggle state is discarded.
    pub fn refresh(&self) -> Result<HierarchyView, HierarchyError> {
        let people = self.store.list_people().map_err(|err| {
            warn!(error = %err, "profile fetch failed");
            err
        })?;

        let tree = self.builder.build(&people)?;
        info!(
            people = people.len(),
            departments = tree.children().len(),
            "org hierarchy rebuilt"
        );

        let expansion = ExpansionState::fresh(&tree);
        Ok(HierarchyView { tree, expansion })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error(transparent)]
    EmptyInput(#[from] EmptyInput),
    #[error(transparent)]
    Store(#[from] StoreError),
}
