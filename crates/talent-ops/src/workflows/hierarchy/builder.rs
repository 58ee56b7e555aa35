use super::domain::{Department, HierarchyNode, PersonRecord, DEFAULT_ORGANISATION_LABEL};

/// Error raised when there is nobody to place in the tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No employees found in the organization")]
pub struct EmptyInput;

/// Stateless builder turning profile rows into a four-bucket org tree.
#[derive(Debug, Clone)]
pub struct HierarchyBuilder {
    root_label: String,
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_ORGANISATION_LABEL)
    }
}

impl HierarchyBuilder {
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            root_label: root_label.into(),
        }
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    /// Partition `people` by role. Input order is kept within each bucket and
    /// empty buckets are left out.
    pub fn build(&self, people: &[PersonRecord]) -> Result<HierarchyNode, EmptyInput> {
        if people.is_empty() {
            return Err(EmptyInput);
        }

        let mut buckets: [Vec<HierarchyNode>; 4] = Default::default();
        for person in people {
            let department = Department::for_role(person.role);
            buckets[department.slot()].push(HierarchyNode::Person {
                id: person.id.clone(),
                display_name: person.resolved_name().to_string(),
                role_label: department.member_label().to_string(),
                avatar_url: person.avatar_url.clone(),
            });
        }

        let children = Department::ORDER
            .into_iter()
            .zip(buckets)
            .filter(|(_, members)| !members.is_empty())
            .map(|(department, members)| HierarchyNode::Department {
                department,
                label: department.label().to_string(),
                glyph: department.glyph().to_string(),
                children: members,
            })
            .collect();

        Ok(HierarchyNode::Root {
            label: self.root_label.clone(),
            children,
        })
    }
}
