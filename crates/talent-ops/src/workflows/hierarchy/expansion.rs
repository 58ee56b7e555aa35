use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::HierarchyNode;

/// Caller-owned expand/collapse flags keyed by node label. Labels that were
/// never toggled read as collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState {
    flags: BTreeMap<String, bool>,
}

impl ExpansionState {
    /// State for a freshly built tree: only the root is open.
    pub fn fresh(tree: &HierarchyNode) -> Self {
        let mut flags = BTreeMap::new();
        flags.insert(tree.label().to_string(), true);
        Self { flags }
    }

    pub fn is_expanded(&self, label: &str) -> bool {
        self.flags.get(label).copied().unwrap_or(false)
    }

    /// Flip the node named `label`. Leaves and unknown labels leave the state
    /// untouched; descendants keep whatever they had.
    pub fn toggled(&self, tree: &HierarchyNode, label: &str) -> Self {
        if !tree.any_toggleable(label) {
            return self.clone();
        }

        let mut next = self.clone();
        let expanded = next.is_expanded(label);
        next.flags.insert(label.to_string(), !expanded);
        next
    }

    /// Open every node that has children.
    pub fn expand_all(tree: &HierarchyNode) -> Self {
        let mut state = Self::default();
        state.open_recursive(tree);
        state
    }

    fn open_recursive(&mut self, node: &HierarchyNode) {
        if node.has_children() {
            self.flags.insert(node.label().to_string(), true);
            for child in node.children() {
                self.open_recursive(child);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::hierarchy::{Department, HierarchyBuilder, PersonRecord};
    use crate::workflows::people::{PersonId, Role};

    fn sample_tree() -> HierarchyNode {
        let people = vec![
            PersonRecord {
                id: PersonId("1".to_string()),
                display_name: Some("Ann".to_string()),
                email: None,
                role: Role::Executive,
                avatar_url: None,
            },
            PersonRecord {
                id: PersonId("2".to_string()),
                display_name: Some("Bo".to_string()),
                email: None,
                role: Role::Manager,
                avatar_url: None,
            },
        ];
        HierarchyBuilder::default().build(&people).expect("tree builds")
    }

    #[test]
    fn fresh_state_opens_only_the_root() {
        let tree = sample_tree();
        let state = ExpansionState::fresh(&tree);
        assert!(state.is_expanded("TalentOps Organisation"));
        assert!(!state.is_expanded(Department::Executives.label()));
    }

    #[test]
    fn toggling_twice_restores_every_label() {
        let tree = sample_tree();
        let initial = ExpansionState::fresh(&tree);

        for label in ["TalentOps Organisation", "Executives", "Managers", "Ann"] {
            let twice = initial.toggled(&tree, label).toggled(&tree, label);
            for other in ["TalentOps Organisation", "Executives", "Managers", "Ann", "Bo"] {
                assert_eq!(twice.is_expanded(other), initial.is_expanded(other), "{label}/{other}");
            }
        }
    }

    #[test]
    fn leaves_cannot_be_toggled() {
        let tree = sample_tree();
        let state = ExpansionState::fresh(&tree);
        assert_eq!(state.toggled(&tree, "Bo"), state);
        assert_eq!(state.toggled(&tree, "Nobody"), state);
    }

    #[test]
    fn collapsing_the_root_keeps_department_choices() {
        let tree = sample_tree();
        let state = ExpansionState::fresh(&tree)
            .toggled(&tree, "Managers")
            .toggled(&tree, "TalentOps Organisation");

        assert!(!state.is_expanded("TalentOps Organisation"));
        assert!(state.is_expanded("Managers"));

        let reopened = state.toggled(&tree, "TalentOps Organisation");
        assert!(reopened.is_expanded("Managers"));
        assert!(!reopened.is_expanded("Executives"));
    }

    #[test]
    fn department_toggles_when_a_person_shares_its_label() {
        let people = vec![
            PersonRecord {
                id: PersonId("1".to_string()),
                display_name: Some("Managers".to_string()),
                email: None,
                role: Role::Executive,
                avatar_url: None,
            },
            PersonRecord {
                id: PersonId("2".to_string()),
                display_name: Some("Bo".to_string()),
                email: None,
                role: Role::Manager,
                avatar_url: None,
            },
        ];
        let tree = HierarchyBuilder::default().build(&people).expect("tree builds");

        let state = ExpansionState::fresh(&tree).toggled(&tree, "Managers");
        assert!(state.is_expanded("Managers"));
        assert!(!state.toggled(&tree, "Managers").is_expanded("Managers"));
    }

    #[test]
    fn root_toggles_when_a_person_shares_its_label() {
        let people = vec![PersonRecord {
            id: PersonId("1".to_string()),
            display_name: Some("Acme".to_string()),
            email: None,
            role: Role::Employee,
            avatar_url: None,
        }];
        let tree = HierarchyBuilder::new("Acme").build(&people).expect("tree builds");

        let state = ExpansionState::fresh(&tree).toggled(&tree, "Acme");
        assert!(!state.is_expanded("Acme"));
    }

    #[test]
    fn state_survives_a_rebuild_with_identical_structure() {
        let tree = sample_tree();
        let state = ExpansionState::fresh(&tree).toggled(&tree, "Executives");

        let rebuilt = sample_tree();
        let again = state.toggled(&rebuilt, "Executives");
        assert!(!again.is_expanded("Executives"));
        assert!(state.is_expanded("Executives"));
    }
}
