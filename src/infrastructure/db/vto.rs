use crate::domain::entities::{VtoItem, VtoItemInput, VtoItemPatch, VtoSection};
use crate::domain::error::{AppError, Result};
use crate::domain::import::VtoBoard;
use sqlx::SqlitePool;

pub struct VtoRepository {
    pool: SqlitePool,
}

impl VtoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<VtoItem>> {
        let items = sqlx::query_as::<_, VtoEntity>(
            "SELECT id, section, item, complete, created_at FROM vto_items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list VTO items: {}", e)))?;

        items.into_iter().map(|i| i.into_item()).collect()
    }

    pub async fn get(&self, id: i64) -> Result<VtoItem> {
        let item = sqlx::query_as::<_, VtoEntity>(
            "SELECT id, section, item, complete, created_at FROM vto_items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch VTO item: {}", e)))?;

        match item {
            Some(item) => item.into_item(),
            None => Err(AppError::NotFound(format!("VTO item not found: {}", id))),
        }
    }

    pub async fn create(&self, input: &VtoItemInput) -> Result<VtoItem> {
        let item = sqlx::query_as::<_, VtoEntity>(
            "INSERT INTO vto_items (section, item, complete) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(input.section.as_str())
        .bind(&input.item)
        .bind(input.complete.unwrap_or(false))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create VTO item: {}", e)))?;

        item.into_item()
    }

    pub async fn update(&self, id: i64, patch: &VtoItemPatch) -> Result<VtoItem> {
        let current = self.get(id).await?;

        let item = sqlx::query_as::<_, VtoEntity>(
            "UPDATE vto_items SET section = ?, item = ?, complete = ? WHERE id = ? RETURNING *",
        )
        .bind(patch.section.unwrap_or(current.section).as_str())
        .bind(patch.item.as_ref().unwrap_or(&current.item))
        .bind(patch.complete.unwrap_or(current.complete))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update VTO item: {}", e)))?;

        item.into_item()
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM vto_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete VTO item: {}", e)))?;

        Ok(result.rows_affected())
    }

    /// Append every entry of a parsed board, section by section.
    pub async fn insert_imported(&self, board: &VtoBoard) -> Result<u64> {
        let mut inserted = 0u64;
        let sections = [
            (VtoSection::Vision, &board.vision),
            (VtoSection::Traction, &board.traction),
            (VtoSection::Objectives, &board.objectives),
        ];

        for (section, entries) in sections {
            for entry in entries {
                sqlx::query("INSERT INTO vto_items (section, item, complete) VALUES (?, ?, ?)")
                    .bind(section.as_str())
                    .bind(&entry.item)
                    .bind(entry.complete)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| {
                        AppError::DatabaseError(format!("Failed to import VTO item: {}", e))
                    })?;
                inserted += 1;
            }
        }

        Ok(inserted)
    }
}

// Internal entity for database mapping
#[derive(sqlx::FromRow)]
struct VtoEntity {
    id: i64,
    section: String,
    item: String,
    complete: bool,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl VtoEntity {
    fn into_item(self) -> Result<VtoItem> {
        let section = VtoSection::from_name(&self.section).ok_or_else(|| {
            AppError::DatabaseError(format!("Corrupt VTO section: {}", self.section))
        })?;

        Ok(VtoItem {
            id: self.id,
            section,
            item: self.item,
            complete: self.complete,
            created_at: self.created_at,
        })
    }
}
