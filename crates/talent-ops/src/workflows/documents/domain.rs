use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::workflows::people::{PersonId, ProjectId};

pub const DEFAULT_DEPARTMENT: &str = "general";
pub const VISIBLE_TO_ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

/// Document category. Unknown strings are read as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    #[default]
    Requirements,
    TechStack,
    ProjectTasks,
    Other,
}

impl DocumentType {
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Requirements,
        DocumentType::TechStack,
        DocumentType::ProjectTasks,
        DocumentType::Other,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "requirements" => DocumentType::Requirements,
            "tech_stack" => DocumentType::TechStack,
            "project_tasks" => DocumentType::ProjectTasks,
            _ => DocumentType::Other,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            DocumentType::Requirements => "requirements",
            DocumentType::TechStack => "tech_stack",
            DocumentType::ProjectTasks => "project_tasks",
            DocumentType::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DocumentType::Requirements => "Requirements",
            DocumentType::TechStack => "Tech Stack",
            DocumentType::ProjectTasks => "Project Tasks",
            DocumentType::Other => "Other",
        }
    }
}

impl<'de> Deserialize<'de> for DocumentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(DocumentType::parse).unwrap_or_default())
    }
}

fn default_department() -> String {
    DEFAULT_DEPARTMENT.to_string()
}

fn default_visibility() -> BTreeSet<String> {
    BTreeSet::from([VISIBLE_TO_ALL.to_string()])
}

/// Upload form contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub doc_type: DocumentType,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default = "default_department")]
    pub department: String,
    #[serde(default = "default_visibility")]
    pub role_visibility: BTreeSet<String>,
}

/// Fields editable after upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUpdate {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub doc_type: DocumentType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub id: DocumentId,
    pub project_id: ProjectId,
    pub title: String,
    pub content: String,
    pub doc_type: DocumentType,
    pub file_url: Option<String>,
    pub department: String,
    pub role_visibility: BTreeSet<String>,
    pub created_by: PersonId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProjectDocument {
    /// Ingestion request for documents that carry an uploaded file.
    pub fn index_request(&self) -> Option<IndexRequest> {
        let file_url = self.file_url.as_deref()?.trim();
        if file_url.is_empty() {
            return None;
        }
        Some(IndexRequest {
            document_id: self.id.clone(),
            file_url: file_url.to_string(),
            document_type: self.doc_type,
            department: self.department.clone(),
            role_visibility: self.role_visibility.iter().cloned().collect(),
            title: self.title.clone(),
        })
    }
}

/// Body posted to the document ingestion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRequest {
    pub document_id: DocumentId,
    pub file_url: String,
    pub document_type: DocumentType,
    pub department: String,
    pub role_visibility: Vec<String>,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_document_types_read_as_other() {
        let types: Vec<DocumentType> =
            serde_json::from_str(r#"["tech_stack", "meeting_notes", null]"#).expect("parses");
        assert_eq!(
            types,
            vec![
                DocumentType::TechStack,
                DocumentType::Other,
                DocumentType::Requirements
            ]
        );
    }

    #[test]
    fn draft_defaults_department_and_visibility() {
        let draft: DocumentDraft =
            serde_json::from_str(r#"{"project_id":"apollo","title":"Scope"}"#).expect("parses");
        assert_eq!(draft.department, "general");
        assert_eq!(draft.role_visibility, BTreeSet::from(["all".to_string()]));
        assert_eq!(draft.doc_type, DocumentType::Requirements);
    }
}
