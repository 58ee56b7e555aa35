use serde::{Deserialize, Serialize};

use crate::workflows::people::{PersonId, Role};

pub const DEFAULT_ORGANISATION_LABEL: &str = "TalentOps Organisation";
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown";

/// Profile row as supplied by the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,
    #[serde(default, alias = "full_name")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl PersonRecord {
    /// Name shown in the tree: explicit name, then email, then "Unknown".
    pub fn resolved_name(&self) -> &str {
        [self.display_name.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_DISPLAY_NAME)
    }
}

/// The four role buckets, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Executives,
    Managers,
    TeamLeads,
    Consultants,
}

impl Department {
    pub const ORDER: [Department; 4] = [
        Department::Executives,
        Department::Managers,
        Department::TeamLeads,
        Department::Consultants,
    ];

    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Executive => Department::Executives,
            Role::Manager => Department::Managers,
            Role::TeamLead => Department::TeamLeads,
            Role::Employee | Role::Unassigned => Department::Consultants,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Department::Executives => "Executives",
            Department::Managers => "Managers",
            Department::TeamLeads => "Team Leads",
            Department::Consultants => "Consultants",
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Department::Executives => "👑",
            Department::Managers => "🔴",
            Department::TeamLeads => "🟡",
            Department::Consultants => "🟢",
        }
    }

    /// Role label attached to every member of the bucket.
    pub const fn member_label(self) -> &'static str {
        match self {
            Department::Executives => "Executive",
            Department::Managers => "Manager",
            Department::TeamLeads => "Team Lead",
            Department::Consultants => "Consultant",
        }
    }

    pub(crate) const fn slot(self) -> usize {
        match self {
            Department::Executives => 0,
            Department::Managers => 1,
            Department::TeamLeads => 2,
            Department::Consultants => 3,
        }
    }
}

/// Organisation tree. Roots hold departments, departments hold people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HierarchyNode {
    #[serde(rename = "org")]
    Root {
        label: String,
        children: Vec<HierarchyNode>,
    },
    Department {
        department: Department,
        label: String,
        glyph: String,
        children: Vec<HierarchyNode>,
    },
    Person {
        id: PersonId,
        display_name: String,
        role_label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        avatar_url: Option<String>,
    },
}

impl HierarchyNode {
    /// Structural label; expansion state is keyed by it.
    pub fn label(&self) -> &str {
        match self {
            HierarchyNode::Root { label, .. } | HierarchyNode::Department { label, .. } => label,
            HierarchyNode::Person { display_name, .. } => display_name,
        }
    }

    pub fn children(&self) -> &[HierarchyNode] {
        match self {
            HierarchyNode::Root { children, .. } | HierarchyNode::Department { children, .. } => {
                children
            }
            HierarchyNode::Person { .. } => &[],
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Number of person leaves below (and including) this node.
    pub fn person_count(&self) -> usize {
        match self {
            HierarchyNode::Person { .. } => 1,
            _ => self.children().iter().map(HierarchyNode::person_count).sum(),
        }
    }

    /// Whether some node carrying `label` has children. Labels are not unique
    /// (a person may share a department's name), so every match counts.
    pub fn any_toggleable(&self, label: &str) -> bool {
        (self.label() == label && self.has_children())
            || self
                .children()
                .iter()
                .any(|child| child.any_toggleable(label))
    }

    /// Departments present under a root, in tree order.
    pub fn departments(&self) -> Vec<Department> {
        self.children()
            .iter()
            .filter_map(|child| match child {
                HierarchyNode::Department { department, .. } => Some(*department),
                _ => None,
            })
            .collect()
    }

    /// Members of one department, or an empty slice when it was omitted.
    pub fn members(&self, department: Department) -> &[HierarchyNode] {
        self.children()
            .iter()
            .find(|child| {
                matches!(child, HierarchyNode::Department { department: d, .. } if *d == department)
            })
            .map(HierarchyNode::children)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>, email: Option<&str>) -> PersonRecord {
        PersonRecord {
            id: PersonId("p-1".to_string()),
            display_name: name.map(str::to_string),
            email: email.map(str::to_string),
            role: Role::Employee,
            avatar_url: None,
        }
    }

    #[test]
    fn name_falls_back_to_email_then_unknown() {
        assert_eq!(record(Some("Ann"), Some("a@b.com")).resolved_name(), "Ann");
        assert_eq!(record(Some(""), Some("x@y.com")).resolved_name(), "x@y.com");
        assert_eq!(record(None, Some("")).resolved_name(), "Unknown");
        assert_eq!(record(Some(""), None).resolved_name(), "Unknown");
    }

    #[test]
    fn employee_and_unassigned_share_the_consultant_bucket() {
        assert_eq!(Department::for_role(Role::Employee), Department::Consultants);
        assert_eq!(Department::for_role(Role::Unassigned), Department::Consultants);
        assert_eq!(Department::for_role(Role::TeamLead), Department::TeamLeads);
    }

    #[test]
    fn person_record_reads_profile_columns() {
        let record: PersonRecord = serde_json::from_str(
            r#"{"id":"p-9","full_name":"Dee","email":"dee@corp.io","role":"cto"}"#,
        )
        .expect("record parses");
        assert_eq!(record.resolved_name(), "Dee");
        assert_eq!(record.role, Role::Unassigned);
        assert!(record.avatar_url.is_none());
    }
}
