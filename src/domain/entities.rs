use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::import::FieldMap;

/// Section of the vision/traction/objectives board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VtoSection {
    Vision,
    Traction,
    Objectives,
}

impl VtoSection {
    /// Match a user-supplied section name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "vision" => Some(VtoSection::Vision),
            "traction" => Some(VtoSection::Traction),
            "objectives" => Some(VtoSection::Objectives),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VtoSection::Vision => "vision",
            VtoSection::Traction => "traction",
            VtoSection::Objectives => "objectives",
        }
    }
}

impl std::fmt::Display for VtoSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Issue {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub department: String,
    pub owner: String,
    pub status: String,
    /// Free-form date strings, kept verbatim from the source convention.
    pub created: String,
    pub due: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub assignee: String,
    pub due_date: String,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
}

/// One scorecard metric row. Imported rows are free-form field maps, so the
/// fields are stored as a whole rather than as fixed columns.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScorecardRow {
    pub id: i64,
    pub fields: FieldMap,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VtoItem {
    pub id: i64,
    pub section: VtoSection,
    pub item: String,
    pub complete: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IssueInput {
    #[validate(length(min = 1, max = 512))]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub department: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub created: Option<String>,
    pub due: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TodoInput {
    #[validate(length(min = 1, max = 512))]
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub complete: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VtoItemInput {
    pub section: VtoSection,
    #[validate(length(min = 1, max = 512))]
    pub item: String,
    pub complete: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScorecardRowInput {
    pub fields: FieldMap,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssuePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub department: Option<String>,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub created: Option<String>,
    pub due: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub complete: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VtoItemPatch {
    pub section: Option<VtoSection>,
    pub item: Option<String>,
    pub complete: Option<bool>,
}

/// Everything a dashboard view renders, assembled from the store.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DashboardState {
    pub scorecard: Vec<ScorecardRow>,
    pub vto: Vec<VtoItem>,
    pub issues: Vec<Issue>,
    pub todos: Vec<TodoItem>,
}
