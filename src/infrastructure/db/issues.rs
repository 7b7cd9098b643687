use crate::domain::entities::{Issue, IssueInput, IssuePatch};
use crate::domain::error::{AppError, Result};
use crate::domain::import::ImportedIssue;
use sqlx::SqlitePool;

pub struct IssueRepository {
    pool: SqlitePool,
}

impl IssueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Issue>> {
        let issues = sqlx::query_as::<_, IssueEntity>(
            "SELECT id, title, description, priority, department, owner, status, created, due, created_at
             FROM issues ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list issues: {}", e)))?;

        Ok(issues.into_iter().map(|i| i.into()).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Issue> {
        let issue = sqlx::query_as::<_, IssueEntity>(
            "SELECT id, title, description, priority, department, owner, status, created, due, created_at
             FROM issues WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch issue: {}", e)))?;

        match issue {
            Some(issue) => Ok(issue.into()),
            None => Err(AppError::NotFound(format!("Issue not found: {}", id))),
        }
    }

    pub async fn create(&self, input: &IssueInput) -> Result<Issue> {
        let issue = sqlx::query_as::<_, IssueEntity>(
            "INSERT INTO issues (title, description, priority, department, owner, status, created, due)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&input.title)
        .bind(input.description.as_deref().unwrap_or(""))
        .bind(input.priority.as_deref().unwrap_or("medium"))
        .bind(input.department.as_deref().unwrap_or(""))
        .bind(input.owner.as_deref().unwrap_or(""))
        .bind(input.status.as_deref().unwrap_or("open"))
        .bind(input.created.as_deref().unwrap_or(""))
        .bind(input.due.as_deref().unwrap_or(""))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create issue: {}", e)))?;

        Ok(issue.into())
    }

    pub async fn update(&self, id: i64, patch: &IssuePatch) -> Result<Issue> {
        let current = self.get(id).await?;

        let issue = sqlx::query_as::<_, IssueEntity>(
            "UPDATE issues
             SET title = ?, description = ?, priority = ?, department = ?, owner = ?, status = ?, created = ?, due = ?
             WHERE id = ? RETURNING *",
        )
        .bind(patch.title.as_ref().unwrap_or(&current.title))
        .bind(patch.description.as_ref().unwrap_or(&current.description))
        .bind(patch.priority.as_ref().unwrap_or(&current.priority))
        .bind(patch.department.as_ref().unwrap_or(&current.department))
        .bind(patch.owner.as_ref().unwrap_or(&current.owner))
        .bind(patch.status.as_ref().unwrap_or(&current.status))
        .bind(patch.created.as_ref().unwrap_or(&current.created))
        .bind(patch.due.as_ref().unwrap_or(&current.due))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update issue: {}", e)))?;

        Ok(issue.into())
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM issues WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete issue: {}", e)))?;

        Ok(result.rows_affected())
    }

    /// Append parsed import rows verbatim; the classifier already applied
    /// every default.
    pub async fn insert_imported(&self, imported: &[ImportedIssue]) -> Result<u64> {
        for issue in imported {
            sqlx::query(
                "INSERT INTO issues (title, description, priority, department, owner, status, created, due)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&issue.title)
            .bind(&issue.description)
            .bind(&issue.priority)
            .bind(&issue.department)
            .bind(&issue.owner)
            .bind(&issue.status)
            .bind(&issue.created)
            .bind(&issue.due)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to import issue: {}", e)))?;
        }

        Ok(imported.len() as u64)
    }
}

// Internal entity for database mapping
#[derive(sqlx::FromRow)]
struct IssueEntity {
    id: i64,
    title: String,
    description: String,
    priority: String,
    department: String,
    owner: String,
    status: String,
    created: String,
    due: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<IssueEntity> for Issue {
    fn from(e: IssueEntity) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            priority: e.priority,
            department: e.department,
            owner: e.owner,
            status: e.status,
            created: e.created,
            due: e.due,
            created_at: e.created_at,
        }
    }
}
