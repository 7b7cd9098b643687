// ============================================================
// IMPORT RESULT TYPES
// ============================================================
// Data structures accumulated in one pass over an uploaded file

use super::FieldMap;
use serde::{Deserialize, Serialize};

/// Completion flag coercion: true only for the literal strings `"true"`
/// and `"1"`; everything else, including empty, is false.
pub fn parse_complete(value: &str) -> bool {
    value == "true" || value == "1"
}

/// One entry on the vision/traction/objectives board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VtoEntry {
    pub item: String,
    pub complete: bool,
}

/// The three named sequences of the VTO board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VtoBoard {
    pub vision: Vec<VtoEntry>,
    pub traction: Vec<VtoEntry>,
    pub objectives: Vec<VtoEntry>,
}

/// An issue row with every field defaulted, never missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedIssue {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub department: String,
    pub owner: String,
    pub status: String,
    pub created: String,
    pub due: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedTodo {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub assignee: String,
    pub due_date: String,
    pub complete: bool,
}

/// Result of one import pass. Each member stays `None` until the first
/// row of its type appears, so consumers can tell "no section" from
/// "empty section".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    pub scorecard: Option<Vec<FieldMap>>,
    pub vto: Option<VtoBoard>,
    pub issues: Option<Vec<ImportedIssue>>,
    pub todos: Option<Vec<ImportedTodo>>,
}

impl ImportResult {
    /// True when no row of any recognized type was found.
    pub fn is_empty(&self) -> bool {
        self.scorecard.is_none()
            && self.vto.is_none()
            && self.issues.is_none()
            && self.todos.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_complete_accepts_only_literals() {
        assert!(parse_complete("true"));
        assert!(parse_complete("1"));
        assert!(!parse_complete("TRUE"));
        assert!(!parse_complete("False"));
        assert!(!parse_complete("yes"));
        assert!(!parse_complete(""));
    }

    #[test]
    fn test_fresh_result_is_empty() {
        let result = ImportResult::default();
        assert!(result.is_empty());
    }

    #[test]
    fn test_result_with_any_member_is_not_empty() {
        let result = ImportResult {
            vto: Some(VtoBoard::default()),
            ..Default::default()
        };
        assert!(!result.is_empty());
    }
}
