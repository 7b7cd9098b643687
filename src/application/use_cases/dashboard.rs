// ============================================================
// DASHBOARD USE CASE
// ============================================================
// Dashboard assembly through the snapshot cache plus the per-entity
// CRUD surface

use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use validator::Validate;

use crate::application::events::{ChangeKind, DashboardEvent, DashboardEvents, EntityKind};
use crate::domain::entities::{
    DashboardState, Issue, IssueInput, IssuePatch, ScorecardRow, ScorecardRowInput, TodoInput,
    TodoItem, TodoPatch, VtoItem, VtoItemInput, VtoItemPatch,
};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::db::DashboardStore;
use crate::infrastructure::snapshot::{DashboardSnapshot, SnapshotStore};

pub struct DashboardUseCase {
    store: Arc<dyn DashboardStore>,
    snapshot: Arc<SnapshotStore>,
    events: DashboardEvents,
}

impl DashboardUseCase {
    pub fn new(
        store: Arc<dyn DashboardStore>,
        snapshot: Arc<SnapshotStore>,
        events: DashboardEvents,
    ) -> Self {
        Self {
            store,
            snapshot,
            events,
        }
    }

    /// Assemble the dashboard, read-through: a cached snapshot is served
    /// as-is, a miss rebuilds from the store and refills the cache.
    pub async fn dashboard(&self) -> Result<DashboardState> {
        if let Some(snapshot) = self.snapshot.load() {
            return Ok(snapshot.state);
        }

        let state = self.store.dashboard().await?;
        let snapshot = DashboardSnapshot {
            generated_at: Utc::now(),
            state: state.clone(),
        };
        if let Err(err) = self.snapshot.save(&snapshot) {
            // Serving the assembled state matters more than caching it.
            warn!(error = %err, "Failed to persist dashboard snapshot");
        }

        Ok(state)
    }

    pub async fn list_issues(&self) -> Result<Vec<Issue>> {
        self.store.list_issues().await
    }

    pub async fn create_issue(&self, input: &IssueInput) -> Result<Issue> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        let issue = self.store.create_issue(input).await?;
        self.after_change(EntityKind::Issue, issue.id, ChangeKind::Created);
        Ok(issue)
    }

    pub async fn update_issue(&self, id: i64, patch: &IssuePatch) -> Result<Issue> {
        let issue = self.store.update_issue(id, patch).await?;
        self.after_change(EntityKind::Issue, id, ChangeKind::Updated);
        Ok(issue)
    }

    pub async fn delete_issue(&self, id: i64) -> Result<()> {
        if self.store.delete_issue(id).await? == 0 {
            return Err(AppError::NotFound(format!("Issue not found: {}", id)));
        }
        self.after_change(EntityKind::Issue, id, ChangeKind::Deleted);
        Ok(())
    }

    pub async fn list_todos(&self) -> Result<Vec<TodoItem>> {
        self.store.list_todos().await
    }

    pub async fn create_todo(&self, input: &TodoInput) -> Result<TodoItem> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        let todo = self.store.create_todo(input).await?;
        self.after_change(EntityKind::Todo, todo.id, ChangeKind::Created);
        Ok(todo)
    }

    pub async fn update_todo(&self, id: i64, patch: &TodoPatch) -> Result<TodoItem> {
        let todo = self.store.update_todo(id, patch).await?;
        self.after_change(EntityKind::Todo, id, ChangeKind::Updated);
        Ok(todo)
    }

    pub async fn delete_todo(&self, id: i64) -> Result<()> {
        if self.store.delete_todo(id).await? == 0 {
            return Err(AppError::NotFound(format!("Todo not found: {}", id)));
        }
        self.after_change(EntityKind::Todo, id, ChangeKind::Deleted);
        Ok(())
    }

    pub async fn list_scorecard(&self) -> Result<Vec<ScorecardRow>> {
        self.store.list_scorecard().await
    }

    pub async fn create_scorecard_row(&self, input: &ScorecardRowInput) -> Result<ScorecardRow> {
        if input.fields.is_empty() {
            return Err(AppError::ValidationError(
                "Scorecard row needs at least one field.".to_string(),
            ));
        }
        let row = self.store.create_scorecard_row(&input.fields).await?;
        self.after_change(EntityKind::Scorecard, row.id, ChangeKind::Created);
        Ok(row)
    }

    pub async fn update_scorecard_row(
        &self,
        id: i64,
        input: &ScorecardRowInput,
    ) -> Result<ScorecardRow> {
        if input.fields.is_empty() {
            return Err(AppError::ValidationError(
                "Scorecard row needs at least one field.".to_string(),
            ));
        }
        let row = self.store.update_scorecard_row(id, &input.fields).await?;
        self.after_change(EntityKind::Scorecard, id, ChangeKind::Updated);
        Ok(row)
    }

    pub async fn delete_scorecard_row(&self, id: i64) -> Result<()> {
        if self.store.delete_scorecard_row(id).await? == 0 {
            return Err(AppError::NotFound(format!("Scorecard row not found: {}", id)));
        }
        self.after_change(EntityKind::Scorecard, id, ChangeKind::Deleted);
        Ok(())
    }

    pub async fn list_vto(&self) -> Result<Vec<VtoItem>> {
        self.store.list_vto().await
    }

    pub async fn create_vto_item(&self, input: &VtoItemInput) -> Result<VtoItem> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        let item = self.store.create_vto_item(input).await?;
        self.after_change(EntityKind::Vto, item.id, ChangeKind::Created);
        Ok(item)
    }

    pub async fn update_vto_item(&self, id: i64, patch: &VtoItemPatch) -> Result<VtoItem> {
        let item = self.store.update_vto_item(id, patch).await?;
        self.after_change(EntityKind::Vto, id, ChangeKind::Updated);
        Ok(item)
    }

    pub async fn delete_vto_item(&self, id: i64) -> Result<()> {
        if self.store.delete_vto_item(id).await? == 0 {
            return Err(AppError::NotFound(format!("VTO item not found: {}", id)));
        }
        self.after_change(EntityKind::Vto, id, ChangeKind::Deleted);
        Ok(())
    }

    fn after_change(&self, entity: EntityKind, id: i64, change: ChangeKind) {
        self.snapshot.invalidate();
        self.events.emit(DashboardEvent::EntityChanged { entity, id, change });
    }
}
