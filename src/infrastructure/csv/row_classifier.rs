// ============================================================
// ROW CLASSIFIER
// ============================================================
// Single-pass classification of tokenized rows into an ImportResult

use super::reader::{CsvReader, SourceRow, TokenizedCsv};
use crate::domain::entities::VtoSection;
use crate::domain::error::{AppError, Result};
use crate::domain::import::{
    parse_complete, FieldMap, ImportDiagnostics, ImportResult, ImportedIssue, ImportedTodo,
    SkipReason, VtoBoard, VtoEntry,
};

/// Parsed output plus the skipped-row side channel.
#[derive(Debug, Clone, Default)]
pub struct ParsedImport {
    pub result: ImportResult,
    pub diagnostics: ImportDiagnostics,
}

/// Classifies each data row by its first field: `scorecard`, `vto`,
/// `issue` or `todo`, case-insensitively. A malformed row degrades by
/// omission, never by aborting the pass; only an input without a header
/// and at least one data row is rejected.
pub struct RowClassifier {
    reader: CsvReader,
}

impl Default for RowClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl RowClassifier {
    pub fn new() -> Self {
        Self {
            reader: CsvReader::new(),
        }
    }

    /// Parse uploaded CSV content into a typed import result.
    pub fn parse(&self, content: &str) -> Result<ParsedImport> {
        let tokenized = self.reader.tokenize(content)?;
        self.classify(&tokenized)
    }

    /// Classify already-tokenized rows.
    pub fn classify(&self, tokenized: &TokenizedCsv) -> Result<ParsedImport> {
        if tokenized.header.is_empty() || tokenized.rows.is_empty() {
            return Err(AppError::format_error());
        }

        let mut parsed = ParsedImport::default();
        for row in &tokenized.rows {
            classify_row(&tokenized.header, row, &mut parsed);
        }
        Ok(parsed)
    }
}

fn classify_row(header: &[String], row: &SourceRow, parsed: &mut ParsedImport) {
    if row.fields.len() < 2 {
        parsed.diagnostics.record(row.line, SkipReason::TooFewFields);
        return;
    }

    let kind = row.fields[0].to_lowercase();
    let record = zip_record(header, &row.fields);

    match kind.as_str() {
        "scorecard" => {
            parsed
                .result
                .scorecard
                .get_or_insert_with(Vec::new)
                .push(record);
        }
        "vto" => classify_vto(row, &record, parsed),
        "issue" => {
            parsed
                .result
                .issues
                .get_or_insert_with(Vec::new)
                .push(ImportedIssue {
                    title: field(&record, &["title"]),
                    description: field(&record, &["description"]),
                    priority: field_or(&record, "priority", "medium"),
                    department: field(&record, &["department"]),
                    owner: field(&record, &["owner"]),
                    status: field_or(&record, "status", "open"),
                    created: field(&record, &["created", "createdDate"]),
                    due: field(&record, &["due", "dueDate"]),
                });
        }
        "todo" => {
            parsed
                .result
                .todos
                .get_or_insert_with(Vec::new)
                .push(ImportedTodo {
                    title: field(&record, &["title"]),
                    description: field(&record, &["description"]),
                    priority: field_or(&record, "priority", "medium"),
                    assignee: field(&record, &["assignee", "owner"]),
                    due_date: field(&record, &["dueDate", "due"]),
                    complete: complete_flag(&record),
                });
        }
        _ => parsed
            .diagnostics
            .record(row.line, SkipReason::UnknownRowType(kind)),
    }
}

fn classify_vto(row: &SourceRow, record: &FieldMap, parsed: &mut ParsedImport) {
    // The board materializes as soon as a vto row is seen, even if that
    // row is then dropped for its category.
    let board = parsed.result.vto.get_or_insert_with(VtoBoard::default);

    let category = record
        .get("category")
        .map(String::as_str)
        .unwrap_or("objectives")
        .to_lowercase();

    let Some(section) = VtoSection::from_name(&category) else {
        parsed
            .diagnostics
            .record(row.line, SkipReason::UnknownVtoCategory(category));
        return;
    };

    let entry = VtoEntry {
        item: field(record, &["item", "title"]),
        complete: complete_flag(record),
    };

    match section {
        VtoSection::Vision => board.vision.push(entry),
        VtoSection::Traction => board.traction.push(entry),
        VtoSection::Objectives => board.objectives.push(entry),
    }
}

/// Pair header names with row values, bounded by the shorter sequence.
/// Column 0 is the discriminator, not a data field; unnamed columns are
/// omitted.
fn zip_record(header: &[String], fields: &[String]) -> FieldMap {
    let mut record = FieldMap::new();
    let bound = header.len().min(fields.len());
    for j in 1..bound {
        if header[j].is_empty() {
            continue;
        }
        record.insert(header[j].clone(), fields[j].clone());
    }
    record
}

/// First present key wins, even when its value is empty; a missing key
/// falls through to the next alias, then to "".
fn field(record: &FieldMap, keys: &[&str]) -> String {
    for key in keys {
        if let Some(value) = record.get(*key) {
            return value.clone();
        }
    }
    String::new()
}

fn field_or(record: &FieldMap, key: &str, default: &str) -> String {
    record
        .get(key)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn complete_flag(record: &FieldMap) -> bool {
    parse_complete(record.get("complete").map(String::as_str).unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORECARD_CSV: &str = "\
type,metric,target,actual,status,owner
scorecard,Weekly Revenue,$65K,$68.2K,green,Sales Team";

    const TODO_CSV: &str = "\
type,title,description,priority,assignee,dueDate,complete
todo,Review Budget,Analyze spend,medium,Director,2024-11-15,false";

    const MIXED_CSV: &str = "\
type,title,description,priority,assignee,dueDate,complete,category,item
scorecard,,,,,,,,
vto,,,,,,true,traction,Hit 120 units
issue,Churn spike,Two cancellations,high,,,,,
todo,Call vendor,,,,2024-12-01,1,,";

    fn parse(content: &str) -> ParsedImport {
        RowClassifier::new().parse(content).unwrap()
    }

    #[test]
    fn test_rejects_empty_input() {
        let err = RowClassifier::new().parse("").unwrap_err();
        assert_eq!(
            err.to_string(),
            "CSV must have at least a header and one data row"
        );
    }

    #[test]
    fn test_rejects_header_only_input() {
        let err = RowClassifier::new()
            .parse("type,metric,target\n")
            .unwrap_err();
        assert!(matches!(err, AppError::FormatError(_)));
    }

    #[test]
    fn test_rejects_header_with_only_blank_lines() {
        let err = RowClassifier::new()
            .parse("type,metric\n\n   \n")
            .unwrap_err();
        assert!(matches!(err, AppError::FormatError(_)));
    }

    #[test]
    fn test_scorecard_row_mirrors_header_fields() {
        let parsed = parse(SCORECARD_CSV);
        let scorecard = parsed.result.scorecard.unwrap();

        assert_eq!(scorecard.len(), 1);
        let row = &scorecard[0];
        assert_eq!(row.len(), 5);
        assert_eq!(row["metric"], "Weekly Revenue");
        assert_eq!(row["target"], "$65K");
        assert_eq!(row["actual"], "$68.2K");
        assert_eq!(row["status"], "green");
        assert_eq!(row["owner"], "Sales Team");

        assert!(parsed.result.vto.is_none());
        assert!(parsed.result.issues.is_none());
        assert!(parsed.result.todos.is_none());
    }

    #[test]
    fn test_todo_row_end_to_end() {
        let parsed = parse(TODO_CSV);
        let todos = parsed.result.todos.unwrap();

        assert_eq!(todos.len(), 1);
        let todo = &todos[0];
        assert_eq!(todo.title, "Review Budget");
        assert_eq!(todo.description, "Analyze spend");
        assert_eq!(todo.priority, "medium");
        assert_eq!(todo.assignee, "Director");
        assert_eq!(todo.due_date, "2024-11-15");
        assert!(!todo.complete);
    }

    #[test]
    fn test_complete_flag_accepts_only_true_and_one() {
        for (value, expected) in [
            ("true", true),
            ("1", true),
            ("TRUE", false),
            ("False", false),
            ("yes", false),
            ("", false),
        ] {
            let content = format!("type,title,complete\ntodo,Task,{}", value);
            let parsed = parse(&content);
            let todos = parsed.result.todos.unwrap();
            assert_eq!(todos[0].complete, expected, "value {:?}", value);
        }
    }

    #[test]
    fn test_vto_mixed_case_category_is_classified() {
        let content = "type,category,item,complete\nvto,Objectives,Launch v2,true";
        let board = parse(content).result.vto.unwrap();

        assert_eq!(board.objectives.len(), 1);
        assert_eq!(board.objectives[0].item, "Launch v2");
        assert!(board.objectives[0].complete);
        assert!(board.vision.is_empty());
        assert!(board.traction.is_empty());
    }

    #[test]
    fn test_vto_unknown_category_is_dropped() {
        let content = "type,category,item\nvto,milestones,Ship beta";
        let parsed = parse(content);

        // The board materialized but every sub-sequence stays empty.
        let board = parsed.result.vto.unwrap();
        assert!(board.vision.is_empty());
        assert!(board.traction.is_empty());
        assert!(board.objectives.is_empty());

        assert_eq!(parsed.diagnostics.skipped.len(), 1);
        assert_eq!(
            parsed.diagnostics.skipped[0].reason,
            SkipReason::UnknownVtoCategory("milestones".to_string())
        );
    }

    #[test]
    fn test_vto_missing_category_defaults_to_objectives() {
        let content = "type,item\nvto,Own the region";
        let board = parse(content).result.vto.unwrap();

        assert_eq!(board.objectives.len(), 1);
        assert_eq!(board.objectives[0].item, "Own the region");
    }

    #[test]
    fn test_vto_item_falls_back_to_title() {
        let content = "type,category,title\nvto,vision,Be the default choice";
        let board = parse(content).result.vto.unwrap();

        assert_eq!(board.vision[0].item, "Be the default choice");
    }

    #[test]
    fn test_one_field_row_is_skipped_without_error() {
        let content = "type,title\nloneword\ntodo,Task";
        let parsed = parse(content);

        let todos = parsed.result.todos.unwrap();
        assert_eq!(todos.len(), 1);

        assert_eq!(parsed.diagnostics.skipped.len(), 1);
        assert_eq!(parsed.diagnostics.skipped[0].line, 2);
        assert_eq!(
            parsed.diagnostics.skipped[0].reason,
            SkipReason::TooFewFields
        );
    }

    #[test]
    fn test_unknown_row_type_is_ignored() {
        let content = "type,title\ngoal,Grow revenue\ntodo,Task";
        let parsed = parse(content);

        assert_eq!(parsed.result.todos.unwrap().len(), 1);
        assert!(parsed.result.issues.is_none());
        assert_eq!(
            parsed.diagnostics.skipped[0].reason,
            SkipReason::UnknownRowType("goal".to_string())
        );
    }

    #[test]
    fn test_discriminator_is_case_insensitive() {
        let content = "type,title\nTODO,Upper\nTodo,Mixed";
        let todos = parse(content).result.todos.unwrap();

        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].title, "Upper");
        assert_eq!(todos[1].title, "Mixed");
    }

    #[test]
    fn test_issue_defaults_and_fallback_chains() {
        let content = "\
type,title,createdDate,dueDate
issue,Server flaky,2024-10-01,2024-10-15";
        let issues = parse(content).result.issues.unwrap();

        let issue = &issues[0];
        assert_eq!(issue.title, "Server flaky");
        assert_eq!(issue.description, "");
        assert_eq!(issue.priority, "medium");
        assert_eq!(issue.department, "");
        assert_eq!(issue.owner, "");
        assert_eq!(issue.status, "open");
        assert_eq!(issue.created, "2024-10-01");
        assert_eq!(issue.due, "2024-10-15");
    }

    #[test]
    fn test_issue_prefers_created_over_created_date() {
        let content = "\
type,title,created,createdDate
issue,Churn,2024-01-01,2024-02-02";
        let issues = parse(content).result.issues.unwrap();
        assert_eq!(issues[0].created, "2024-01-01");
    }

    #[test]
    fn test_todo_assignee_falls_back_to_owner() {
        let content = "type,title,owner\ntodo,Task,Ops Lead";
        let todos = parse(content).result.todos.unwrap();
        assert_eq!(todos[0].assignee, "Ops Lead");
    }

    #[test]
    fn test_todo_prefers_due_date_over_due() {
        let content = "type,title,due,dueDate\ntodo,Task,2024-01-01,2024-02-02";
        let todos = parse(content).result.todos.unwrap();
        assert_eq!(todos[0].due_date, "2024-02-02");
    }

    #[test]
    fn test_empty_header_name_omits_column() {
        let content = "type,,title\ntodo,ignored,Task";
        let parsed = parse(content);
        let todos = parsed.result.todos.unwrap();

        assert_eq!(todos[0].title, "Task");

        let scorecard_content = "type,,metric\nscorecard,ignored,Revenue";
        let scorecard = parse(scorecard_content).result.scorecard.unwrap();
        assert_eq!(scorecard[0].len(), 1);
        assert_eq!(scorecard[0]["metric"], "Revenue");
    }

    #[test]
    fn test_zip_stops_at_shorter_sequence() {
        // Row longer than header: extra fields have no name and vanish.
        let content = "type,metric\nscorecard,Revenue,overflow,more";
        let scorecard = parse(content).result.scorecard.unwrap();
        assert_eq!(scorecard[0].len(), 1);

        // Row shorter than header: missing columns are simply absent.
        let content = "type,metric,target,owner\nscorecard,Revenue";
        let scorecard = parse(content).result.scorecard.unwrap();
        assert_eq!(scorecard[0].len(), 1);
        assert_eq!(scorecard[0]["metric"], "Revenue");
    }

    #[test]
    fn test_quoted_comma_stays_inside_field() {
        let content = "type,title,description\nissue,\"Hiring, retention\",People";
        let issues = parse(content).result.issues.unwrap();
        assert_eq!(issues[0].title, "Hiring, retention");
        assert_eq!(issues[0].description, "People");
    }

    #[test]
    fn test_mixed_file_classifies_every_kind() {
        let parsed = parse(MIXED_CSV);

        assert_eq!(parsed.result.scorecard.as_ref().unwrap().len(), 1);
        let board = parsed.result.vto.as_ref().unwrap();
        assert_eq!(board.traction.len(), 1);
        assert_eq!(board.traction[0].item, "Hit 120 units");
        assert!(board.traction[0].complete);
        assert_eq!(parsed.result.issues.as_ref().unwrap().len(), 1);
        assert_eq!(parsed.result.issues.as_ref().unwrap()[0].priority, "high");
        let todos = parsed.result.todos.as_ref().unwrap();
        assert_eq!(todos[0].due_date, "2024-12-01");
        assert!(todos[0].complete);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let classifier = RowClassifier::new();
        let first = classifier.parse(MIXED_CSV).unwrap();
        let second = classifier.parse(MIXED_CSV).unwrap();

        assert_eq!(first.result, second.result);
        assert_eq!(first.diagnostics, second.diagnostics);
    }
}
