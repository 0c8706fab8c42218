use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;

use crate::repository::{ProgressRepository, StorageError};
use practice_core::model::{ExerciseKind, Level};

use super::SqliteRepository;

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_level(&self, kind: ExerciseKind) -> Result<Option<Level>, StorageError> {
        let row = sqlx::query("SELECT level FROM progress WHERE exercise_kind = ?1")
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let level: i64 = row
            .try_get("level")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Some(Level::from_persisted(level)))
    }

    async fn save_level(&self, kind: ExerciseKind, level: Level) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO progress (exercise_kind, level, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(exercise_kind) DO UPDATE SET
                level = excluded.level,
                updated_at = excluded.updated_at
            ",
        )
        .bind(kind.as_str())
        .bind(i64::from(level.get()))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
