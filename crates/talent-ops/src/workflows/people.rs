//! Identity types shared by every workflow: person identifiers, the validated
//! role sum type, and the caller ("viewer") a service operation runs for.

use std::fmt;

use axum::http::HeaderMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const VIEWER_ID_HEADER: &str = "x-viewer-id";
pub const VIEWER_ROLE_HEADER: &str = "x-viewer-role";

/// Opaque identifier of a profile row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub String);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a project; documents and evaluations hang off it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// Organisation role. An absent role and an unrecognised role string are the
/// same thing: `Unassigned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Executive,
    Manager,
    TeamLead,
    Employee,
    #[default]
    Unassigned,
}

impl Role {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("executive") => Role::Executive,
            Some("manager") => Role::Manager,
            Some("team_lead") => Role::TeamLead,
            Some("employee") => Role::Employee,
            _ => Role::Unassigned,
        }
    }

    pub const fn key(self) -> Option<&'static str> {
        match self {
            Role::Executive => Some("executive"),
            Role::Manager => Some("manager"),
            Role::TeamLead => Some("team_lead"),
            Role::Employee => Some("employee"),
            Role::Unassigned => None,
        }
    }

    /// Executives and managers may write performance evaluations.
    pub const fn can_evaluate(self) -> bool {
        matches!(self, Role::Executive | Role::Manager)
    }

    /// Team leads read every evaluation alongside evaluators but cannot write.
    pub const fn can_view_all_evaluations(self) -> bool {
        matches!(self, Role::Executive | Role::Manager | Role::TeamLead)
    }

    /// Stage changes are approved by executives and managers.
    pub const fn can_approve_stage_changes(self) -> bool {
        matches!(self, Role::Executive | Role::Manager)
    }

    /// Project managers and team leads curate project documents.
    pub const fn can_manage_documents(self) -> bool {
        matches!(self, Role::Manager | Role::TeamLead)
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.key() {
            Some(key) => serializer.serialize_str(key),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Role::from_raw(raw.as_deref()))
    }
}

/// Caller identity. Authentication happens upstream; the service layer only
/// consumes the resolved id and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub id: PersonId,
    #[serde(default)]
    pub role: Role,
}

impl Viewer {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: PersonId(id.into()),
            role,
        }
    }

    /// Read the viewer forwarded by the gateway. Missing or blank id headers
    /// yield `None`.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let id = headers
            .get(VIEWER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())?;
        let role = Role::from_raw(
            headers
                .get(VIEWER_ROLE_HEADER)
                .and_then(|value| value.to_str().ok()),
        );
        Some(Viewer::new(id, role))
    }
}
