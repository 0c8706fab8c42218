use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{KindTotals, StorageError, StoredSummary, SummaryRepository};
use practice_core::model::PracticeSummary;

use super::SqliteRepository;
use super::mapping;

#[async_trait]
impl SummaryRepository for SqliteRepository {
    async fn insert_summary(&self, summary: &PracticeSummary) -> Result<i64, StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO practice_summaries (
                exercise_kind,
                started_at,
                completed_at,
                total_answered,
                correct,
                incorrect,
                score
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(summary.kind().as_str())
        .bind(summary.started_at())
        .bind(summary.completed_at())
        .bind(i64::from(summary.total_answered()))
        .bind(i64::from(summary.correct()))
        .bind(i64::from(summary.incorrect()))
        .bind(summary.score())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<StoredSummary>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                id,
                exercise_kind,
                started_at,
                completed_at,
                total_answered,
                correct,
                incorrect,
                score
            FROM practice_summaries
            ORDER BY completed_at DESC, id DESC
            LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        rows.iter().map(mapping::summary_from_row).collect()
    }

    async fn totals_by_kind(&self) -> Result<Vec<KindTotals>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                exercise_kind,
                COUNT(*) AS rounds,
                SUM(total_answered) AS total_answered,
                SUM(correct) AS correct,
                SUM(score) AS score
            FROM practice_summaries
            GROUP BY exercise_kind
            ORDER BY SUM(score) DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        rows.iter()
            .map(|row| {
                let kind_code: String = row
                    .try_get("exercise_kind")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                let rounds: i64 = row
                    .try_get("rounds")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                let total_answered: i64 = row
                    .try_get("total_answered")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                let correct: i64 = row
                    .try_get("correct")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;
                let score: i64 = row
                    .try_get("score")
                    .map_err(|err| StorageError::Serialization(err.to_string()))?;

                Ok(KindTotals {
                    kind: mapping::kind_from_code(&kind_code)?,
                    rounds: u32::try_from(rounds)
                        .map_err(|err| StorageError::Serialization(err.to_string()))?,
                    total_answered: u32::try_from(total_answered)
                        .map_err(|err| StorageError::Serialization(err.to_string()))?,
                    correct: u32::try_from(correct)
                        .map_err(|err| StorageError::Serialization(err.to_string()))?,
                    score,
                })
            })
            .collect()
    }
}
