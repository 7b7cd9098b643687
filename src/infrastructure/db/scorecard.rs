use crate::domain::entities::ScorecardRow;
use crate::domain::error::{AppError, Result};
use crate::domain::import::FieldMap;
use sqlx::SqlitePool;

/// Scorecard rows are free-form field maps, persisted whole as JSON.
pub struct ScorecardRepository {
    pool: SqlitePool,
}

impl ScorecardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ScorecardRow>> {
        let rows = sqlx::query_as::<_, ScorecardEntity>(
            "SELECT id, data_json, created_at FROM scorecard_rows ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to list scorecard rows: {}", e)))?;

        rows.into_iter().map(|r| r.into_row()).collect()
    }

    pub async fn get(&self, id: i64) -> Result<ScorecardRow> {
        let row = sqlx::query_as::<_, ScorecardEntity>(
            "SELECT id, data_json, created_at FROM scorecard_rows WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to fetch scorecard row: {}", e)))?;

        match row {
            Some(row) => row.into_row(),
            None => Err(AppError::NotFound(format!("Scorecard row not found: {}", id))),
        }
    }

    pub async fn create(&self, fields: &FieldMap) -> Result<ScorecardRow> {
        let data_json = encode_fields(fields)?;
        let row = sqlx::query_as::<_, ScorecardEntity>(
            "INSERT INTO scorecard_rows (data_json) VALUES (?) RETURNING *",
        )
        .bind(&data_json)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create scorecard row: {}", e)))?;

        row.into_row()
    }

    pub async fn update(&self, id: i64, fields: &FieldMap) -> Result<ScorecardRow> {
        let data_json = encode_fields(fields)?;
        let row = sqlx::query_as::<_, ScorecardEntity>(
            "UPDATE scorecard_rows SET data_json = ? WHERE id = ? RETURNING *",
        )
        .bind(&data_json)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to update scorecard row: {}", e)))?;

        match row {
            Some(row) => row.into_row(),
            None => Err(AppError::NotFound(format!("Scorecard row not found: {}", id))),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM scorecard_rows WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to delete scorecard row: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn insert_imported(&self, rows: &[FieldMap]) -> Result<u64> {
        for fields in rows {
            let data_json = encode_fields(fields)?;
            sqlx::query("INSERT INTO scorecard_rows (data_json) VALUES (?)")
                .bind(&data_json)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(format!("Failed to import scorecard row: {}", e))
                })?;
        }

        Ok(rows.len() as u64)
    }
}

fn encode_fields(fields: &FieldMap) -> Result<String> {
    serde_json::to_string(fields)
        .map_err(|e| AppError::Internal(format!("Failed to encode scorecard row: {}", e)))
}

// Internal entity for database mapping
#[derive(sqlx::FromRow)]
struct ScorecardEntity {
    id: i64,
    data_json: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl ScorecardEntity {
    fn into_row(self) -> Result<ScorecardRow> {
        let fields: FieldMap = serde_json::from_str(&self.data_json).map_err(|e| {
            AppError::DatabaseError(format!("Corrupt scorecard row {}: {}", self.id, e))
        })?;

        Ok(ScorecardRow {
            id: self.id,
            fields,
            created_at: self.created_at,
        })
    }
}
