//! Row ↔ domain conversions shared by the `SQLite` repositories.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{StorageError, StoredSummary};
use practice_core::model::{ExerciseKind, PracticeSummary};

pub(super) fn kind_from_code(raw: &str) -> Result<ExerciseKind, StorageError> {
    raw.parse()
        .map_err(|_| StorageError::Serialization(format!("unknown exercise kind code: {raw}")))
}

fn get<'r, T>(row: &'r SqliteRow, column: &str) -> Result<T, StorageError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column)
        .map_err(|err| StorageError::Serialization(err.to_string()))
}

fn counter(row: &SqliteRow, column: &str) -> Result<u32, StorageError> {
    let value: i64 = get(row, column)?;
    u32::try_from(value)
        .map_err(|_| StorageError::Serialization(format!("negative {column}: {value}")))
}

/// Rehydrates a summary row, re-validating counts through the domain
/// constructor.
pub(super) fn summary_from_row(row: &SqliteRow) -> Result<StoredSummary, StorageError> {
    let id: i64 = get(row, "id")?;
    let kind = kind_from_code(&get::<String>(row, "exercise_kind")?)?;
    let started_at: DateTime<Utc> = get(row, "started_at")?;
    let completed_at: DateTime<Utc> = get(row, "completed_at")?;
    let total_answered = counter(row, "total_answered")?;
    let correct = counter(row, "correct")?;
    let incorrect = counter(row, "incorrect")?;
    let score: i64 = get(row, "score")?;

    let summary = PracticeSummary::from_persisted(
        kind,
        started_at,
        completed_at,
        total_answered,
        correct,
        incorrect,
        score,
    )
    .map_err(|err| StorageError::Serialization(err.to_string()))?;

    Ok(StoredSummary { id, summary })
}
