// ============================================================
// IMPORT DIAGNOSTICS
// ============================================================
// Side list of rows dropped during classification. Dropping stays
// silent at the result level; this exists for observability only.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Row had fewer than two fields after tokenization.
    TooFewFields,
    /// Column 0 matched none of the known row types.
    UnknownRowType(String),
    /// VTO row named a category outside vision/traction/objectives.
    UnknownVtoCategory(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewFields => write!(f, "fewer than two fields"),
            SkipReason::UnknownRowType(kind) => write!(f, "unknown row type: {}", kind),
            SkipReason::UnknownVtoCategory(category) => {
                write!(f, "unknown VTO category: {}", category)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the source file.
    pub line: u64,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDiagnostics {
    pub skipped: Vec<SkippedRow>,
}

impl ImportDiagnostics {
    pub fn record(&mut self, line: u64, reason: SkipReason) {
        self.skipped.push(SkippedRow { line, reason });
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}
