use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::{IssueRepository, ScorecardRepository, TodoRepository, VtoRepository};
use crate::domain::entities::{
    DashboardState, Issue, IssueInput, IssuePatch, ScorecardRow, TodoInput, TodoItem, TodoPatch,
    VtoItem, VtoItemInput, VtoItemPatch,
};
use crate::domain::error::Result;
use crate::domain::import::{FieldMap, ImportResult};

/// Rows appended to each entity table by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCounts {
    pub scorecard: u64,
    pub vto: u64,
    pub issues: u64,
    pub todos: u64,
}

impl ImportCounts {
    pub fn total(&self) -> u64 {
        self.scorecard + self.vto + self.issues + self.todos
    }
}

/// The persistence seam: per-entity CRUD plus bulk import application.
/// Front ends and tests may substitute their own implementation.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    async fn dashboard(&self) -> Result<DashboardState>;

    async fn list_issues(&self) -> Result<Vec<Issue>>;
    async fn create_issue(&self, input: &IssueInput) -> Result<Issue>;
    async fn update_issue(&self, id: i64, patch: &IssuePatch) -> Result<Issue>;
    async fn delete_issue(&self, id: i64) -> Result<u64>;

    async fn list_todos(&self) -> Result<Vec<TodoItem>>;
    async fn create_todo(&self, input: &TodoInput) -> Result<TodoItem>;
    async fn update_todo(&self, id: i64, patch: &TodoPatch) -> Result<TodoItem>;
    async fn delete_todo(&self, id: i64) -> Result<u64>;

    async fn list_scorecard(&self) -> Result<Vec<ScorecardRow>>;
    async fn create_scorecard_row(&self, fields: &FieldMap) -> Result<ScorecardRow>;
    async fn update_scorecard_row(&self, id: i64, fields: &FieldMap) -> Result<ScorecardRow>;
    async fn delete_scorecard_row(&self, id: i64) -> Result<u64>;

    async fn list_vto(&self) -> Result<Vec<VtoItem>>;
    async fn create_vto_item(&self, input: &VtoItemInput) -> Result<VtoItem>;
    async fn update_vto_item(&self, id: i64, patch: &VtoItemPatch) -> Result<VtoItem>;
    async fn delete_vto_item(&self, id: i64) -> Result<u64>;

    async fn apply_import(&self, import: &ImportResult) -> Result<ImportCounts>;
}

pub struct SqliteDashboardStore {
    issues: IssueRepository,
    todos: TodoRepository,
    scorecard: ScorecardRepository,
    vto: VtoRepository,
}

impl SqliteDashboardStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            issues: IssueRepository::new(pool.clone()),
            todos: TodoRepository::new(pool.clone()),
            scorecard: ScorecardRepository::new(pool.clone()),
            vto: VtoRepository::new(pool),
        }
    }
}

#[async_trait]
impl DashboardStore for SqliteDashboardStore {
    async fn dashboard(&self) -> Result<DashboardState> {
        Ok(DashboardState {
            scorecard: self.scorecard.list().await?,
            vto: self.vto.list().await?,
            issues: self.issues.list().await?,
            todos: self.todos.list().await?,
        })
    }

    async fn list_issues(&self) -> Result<Vec<Issue>> {
        self.issues.list().await
    }

    async fn create_issue(&self, input: &IssueInput) -> Result<Issue> {
        self.issues.create(input).await
    }

    async fn update_issue(&self, id: i64, patch: &IssuePatch) -> Result<Issue> {
        self.issues.update(id, patch).await
    }

    async fn delete_issue(&self, id: i64) -> Result<u64> {
        self.issues.delete(id).await
    }

    async fn list_todos(&self) -> Result<Vec<TodoItem>> {
        self.todos.list().await
    }

    async fn create_todo(&self, input: &TodoInput) -> Result<TodoItem> {
        self.todos.create(input).await
    }

    async fn update_todo(&self, id: i64, patch: &TodoPatch) -> Result<TodoItem> {
        self.todos.update(id, patch).await
    }

    async fn delete_todo(&self, id: i64) -> Result<u64> {
        self.todos.delete(id).await
    }

    async fn list_scorecard(&self) -> Result<Vec<ScorecardRow>> {
        self.scorecard.list().await
    }

    async fn create_scorecard_row(&self, fields: &FieldMap) -> Result<ScorecardRow> {
        self.scorecard.create(fields).await
    }

    async fn update_scorecard_row(&self, id: i64, fields: &FieldMap) -> Result<ScorecardRow> {
        self.scorecard.update(id, fields).await
    }

    async fn delete_scorecard_row(&self, id: i64) -> Result<u64> {
        self.scorecard.delete(id).await
    }

    async fn list_vto(&self) -> Result<Vec<VtoItem>> {
        self.vto.list().await
    }

    async fn create_vto_item(&self, input: &VtoItemInput) -> Result<VtoItem> {
        self.vto.create(input).await
    }

    async fn update_vto_item(&self, id: i64, patch: &VtoItemPatch) -> Result<VtoItem> {
        self.vto.update(id, patch).await
    }

    async fn delete_vto_item(&self, id: i64) -> Result<u64> {
        self.vto.delete(id).await
    }

    async fn apply_import(&self, import: &ImportResult) -> Result<ImportCounts> {
        let mut counts = ImportCounts::default();

        if let Some(rows) = &import.scorecard {
            counts.scorecard = self.scorecard.insert_imported(rows).await?;
        }
        if let Some(board) = &import.vto {
            counts.vto = self.vto.insert_imported(board).await?;
        }
        if let Some(issues) = &import.issues {
            counts.issues = self.issues.insert_imported(issues).await?;
        }
        if let Some(todos) = &import.todos {
            counts.todos = self.todos.insert_imported(todos).await?;
        }

        Ok(counts)
    }
}
