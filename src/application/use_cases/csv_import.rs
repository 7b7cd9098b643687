// ============================================================
// CSV IMPORT USE CASE
// ============================================================
// Orchestrate upload decoding, classification, persistence, and
// notification

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::events::{DashboardEvent, DashboardEvents};
use crate::domain::error::{AppError, Result};
use crate::domain::import::ImportDiagnostics;
use crate::infrastructure::csv::{decode_bytes, RowClassifier};
use crate::infrastructure::db::{DashboardStore, ImportCounts};
use crate::infrastructure::snapshot::SnapshotStore;

/// What one upload did: rows stored per entity plus the skipped-row
/// side channel.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub import_id: String,
    pub counts: ImportCounts,
    pub diagnostics: ImportDiagnostics,
}

pub struct CsvImportUseCase {
    store: Arc<dyn DashboardStore>,
    snapshot: Arc<SnapshotStore>,
    events: DashboardEvents,
    classifier: RowClassifier,
    // Two concurrent uploads must not interleave their writes.
    write_lock: Mutex<()>,
}

impl CsvImportUseCase {
    pub fn new(
        store: Arc<dyn DashboardStore>,
        snapshot: Arc<SnapshotStore>,
        events: DashboardEvents,
    ) -> Self {
        Self {
            store,
            snapshot,
            events,
            classifier: RowClassifier::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Import an uploaded file from disk.
    pub async fn import_file(&self, path: &Path) -> Result<ImportSummary> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        self.import_content(&decode_bytes(&bytes)).await
    }

    /// Import CSV content that is already in memory.
    pub async fn import_content(&self, content: &str) -> Result<ImportSummary> {
        let parsed = self.classifier.parse(content)?;

        // Parsed cleanly but nothing was recognized: the upload as a
        // whole is rejected, distinct from a format failure.
        if parsed.result.is_empty() {
            return Err(AppError::empty_import());
        }

        let import_id = Uuid::new_v4().to_string();
        if !parsed.diagnostics.is_clean() {
            warn!(
                import_id = %import_id,
                skipped = parsed.diagnostics.skipped.len(),
                "Import skipped unrecognized rows"
            );
        }

        let counts = {
            let _guard = self.write_lock.lock().await;
            let counts = self.store.apply_import(&parsed.result).await?;
            self.snapshot.invalidate();
            counts
        };

        info!(import_id = %import_id, rows = counts.total(), "Import stored");
        self.events.emit(DashboardEvent::ImportCompleted {
            import_id: import_id.clone(),
            counts,
        });

        Ok(ImportSummary {
            import_id,
            counts,
            diagnostics: parsed.diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::{init_dashboard_db, SqliteDashboardStore};
    use sqlx::sqlite::SqlitePoolOptions;

    const MIXED_CSV: &str = "\
type,title,description,priority,assignee,dueDate,complete,category,item
scorecard,,,,,,,,
vto,,,,,,true,traction,Hit 120 units
issue,Churn spike,Two cancellations,high,,,,,
todo,Call vendor,,,,2024-12-01,1,,";

    async fn use_case() -> (CsvImportUseCase, Arc<dyn DashboardStore>, tempfile::TempDir) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_dashboard_db(&pool).await.unwrap();

        let store: Arc<dyn DashboardStore> = Arc::new(SqliteDashboardStore::new(pool));
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Arc::new(SnapshotStore::new(dir.path().join("snapshot.json")));
        let events = DashboardEvents::new();

        (
            CsvImportUseCase::new(store.clone(), snapshot, events),
            store,
            dir,
        )
    }

    #[tokio::test]
    async fn test_import_persists_every_recognized_row() {
        let (use_case, store, _dir) = use_case().await;

        let summary = use_case.import_content(MIXED_CSV).await.unwrap();
        assert_eq!(summary.counts.scorecard, 1);
        assert_eq!(summary.counts.vto, 1);
        assert_eq!(summary.counts.issues, 1);
        assert_eq!(summary.counts.todos, 1);

        let state = store.dashboard().await.unwrap();
        assert_eq!(state.issues[0].title, "Churn spike");
        assert_eq!(state.todos[0].due_date, "2024-12-01");
    }

    #[tokio::test]
    async fn test_import_rejects_format_failures() {
        let (use_case, _store, _dir) = use_case().await;

        let err = use_case.import_content("type,metric\n").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "CSV must have at least a header and one data row"
        );
    }

    #[tokio::test]
    async fn test_import_rejects_unrecognized_content() {
        let (use_case, store, _dir) = use_case().await;

        let err = use_case
            .import_content("type,title\ngoal,Grow revenue\nmilestone,Ship beta")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no valid data found");

        assert!(store.dashboard().await.unwrap().issues.is_empty());
    }

    #[tokio::test]
    async fn test_bad_vto_category_still_counts_as_recognized() {
        // The board materializes even when its only row is dropped, so
        // the upload is not "no valid data".
        let (use_case, _store, _dir) = use_case().await;

        let summary = use_case
            .import_content("type,category,item\nvto,milestones,Ship beta")
            .await
            .unwrap();
        assert_eq!(summary.counts.vto, 0);
        assert_eq!(summary.diagnostics.skipped.len(), 1);
    }

    #[tokio::test]
    async fn test_import_emits_completion_event() {
        let (use_case, _store, _dir) = use_case().await;
        let mut receiver = use_case.events.subscribe();

        let summary = use_case.import_content(MIXED_CSV).await.unwrap();

        match receiver.try_recv().unwrap() {
            DashboardEvent::ImportCompleted { import_id, counts } => {
                assert_eq!(import_id, summary.import_id);
                assert_eq!(counts.total(), 4);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_import_invalidates_snapshot() {
        let (use_case, _store, _dir) = use_case().await;

        use_case
            .snapshot
            .save(&crate::infrastructure::snapshot::DashboardSnapshot {
                generated_at: chrono::Utc::now(),
                state: crate::domain::entities::DashboardState {
                    scorecard: vec![],
                    vto: vec![],
                    issues: vec![],
                    todos: vec![],
                },
            })
            .unwrap();

        use_case.import_content(MIXED_CSV).await.unwrap();
        assert!(use_case.snapshot.load().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_imports_both_persist() {
        let (use_case, store, _dir) = use_case().await;

        let first = use_case.import_content("type,title\ntodo,First");
        let second = use_case.import_content("type,title\ntodo,Second");
        let (first, second) = tokio::join!(first, second);
        first.unwrap();
        second.unwrap();

        let mut titles: Vec<String> = store
            .list_todos()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        titles.sort();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_import_file_reads_from_disk() {
        let (use_case, store, dir) = use_case().await;

        let path = dir.path().join("upload.csv");
        std::fs::write(&path, MIXED_CSV).unwrap();

        use_case.import_file(&path).await.unwrap();
        assert_eq!(store.dashboard().await.unwrap().todos.len(), 1);
    }
}
