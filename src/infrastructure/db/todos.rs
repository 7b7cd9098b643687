use crate::domain::entities::{TodoInput, TodoItem, TodoPatch};
use crate::domain::error::{AppError, Result};
use crate::domain::import::ImportedTodo;
use sqlx::SqlitePool;

pub struct TodoRepository {
    pool: SqlitePool,
}

impl TodoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<TodoItem>> {
        let todos = sqlx::query_as::<_, TodoEntity>(
            "SELECT id, title, description, priority, assignee, due_date, complete, created_at
             FROM todos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list todos: {}", e)))?;

        Ok(todos.into_iter().map(|t| t.into()).collect())
    }

    pub async fn get(&self, id: i64) -> Result<TodoItem> {
        let todo = sqlx::query_as::<_, TodoEntity>(
            "SELECT id, title, description, priority, assignee, due_date, complete, created_at
             FROM todos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch todo: {}", e)))?;

        match todo {
            Some(todo) => Ok(todo.into()),
            None => Err(AppError::NotFound(format!("Todo not found: {}", id))),
        }
    }

    pub async fn create(&self, input: &TodoInput) -> Result<TodoItem> {
        let todo = sqlx::query_as::<_, TodoEntity>(
            "INSERT INTO todos (title, description, priority, assignee, due_date, complete)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&input.title)
        .bind(input.description.as_deref().unwrap_or(""))
        .bind(input.priority.as_deref().unwrap_or("medium"))
        .bind(input.assignee.as_deref().unwrap_or(""))
        .bind(input.due_date.as_deref().unwrap_or(""))
        .bind(input.complete.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create todo: {}", e)))?;

        Ok(todo.into())
    }

    pub async fn update(&self, id: i64, patch: &TodoPatch) -> Result<TodoItem> {
        let current = self.get(id).await?;

        let todo = sqlx::query_as::<_, TodoEntity>(
            "UPDATE todos
             SET title = ?, description = ?, priority = ?, assignee = ?, due_date = ?, complete = ?
             WHERE id = ? RETURNING *",
        )
        .bind(patch.title.as_ref().unwrap_or(&current.title))
        .bind(patch.description.as_ref().unwrap_or(&current.description))
        .bind(patch.priority.as_ref().unwrap_or(&current.priority))
        .bind(patch.assignee.as_ref().unwrap_or(&current.assignee))
        .bind(patch.due_date.as_ref().unwrap_or(&current.due_date))
        .bind(patch.complete.unwrap_or(current.complete))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update todo: {}", e)))?;

        Ok(todo.into())
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete todo: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn insert_imported(&self, imported: &[ImportedTodo]) -> Result<u64> {
        for todo in imported {
            sqlx::query(
                "INSERT INTO todos (title, description, priority, assignee, due_date, complete)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&todo.title)
            .bind(&todo.description)
            .bind(&todo.priority)
            .bind(&todo.assignee)
            .bind(&todo.due_date)
            .bind(todo.complete)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to import todo: {}", e)))?;
        }

        Ok(imported.len() as u64)
    }
}

// Internal entity for database mapping
#[derive(sqlx::FromRow)]
struct TodoEntity {
    id: i64,
    title: String,
    description: String,
    priority: String,
    assignee: String,
    due_date: String,
    complete: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<TodoEntity> for TodoItem {
    fn from(e: TodoEntity) -> Self {
        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            priority: e.priority,
            assignee: e.assignee,
            due_date: e.due_date,
            complete: e.complete,
            created_at: e.created_at,
        }
    }
}
