use async_trait::async_trait;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use practice_core::model::{ExerciseKind, Level, PracticeSummary};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A persisted practice summary together with its row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSummary {
    pub id: i64,
    pub summary: PracticeSummary,
}

/// Per-kind aggregates backing the standings view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindTotals {
    pub kind: ExerciseKind,
    pub rounds: u32,
    pub total_answered: u32,
    pub correct: u32,
    pub score: i64,
}

/// Repository contract for per-kind level progression.
///
/// Writes are idempotent upserts keyed by the exercise kind code.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the persisted level for a kind; `None` if never saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the level cannot be read.
    async fn load_level(&self, kind: ExerciseKind) -> Result<Option<Level>, StorageError>;

    /// Persist the level for a kind, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the level cannot be stored.
    async fn save_level(&self, kind: ExerciseKind, level: Level) -> Result<(), StorageError>;
}

/// Repository contract for completed-round summaries.
#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Persist a summary and return its row id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the summary cannot be stored.
    async fn insert_summary(&self, summary: &PracticeSummary) -> Result<i64, StorageError>;

    /// Most recent summaries first, up to `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the summaries cannot be read.
    async fn list_recent(&self, limit: u32) -> Result<Vec<StoredSummary>, StorageError>;

    /// Aggregated totals per exercise kind, highest score first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the aggregates cannot be read.
    async fn totals_by_kind(&self) -> Result<Vec<KindTotals>, StorageError>;
}

//
// ─── IN-MEMORY IMPLEMENTATION ──────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    levels: Arc<Mutex<HashMap<ExerciseKind, Level>>>,
    summaries: Arc<Mutex<Vec<PracticeSummary>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_level(&self, kind: ExerciseKind) -> Result<Option<Level>, StorageError> {
        let guard = self
            .levels
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&kind).copied())
    }

    async fn save_level(&self, kind: ExerciseKind, level: Level) -> Result<(), StorageError> {
        let mut guard = self
            .levels
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(kind, level);
        Ok(())
    }
}

#[async_trait]
impl SummaryRepository for InMemoryRepository {
    async fn insert_summary(&self, summary: &PracticeSummary) -> Result<i64, StorageError> {
        let mut guard = self
            .summaries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(summary.clone());
        i64::try_from(guard.len()).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<StoredSummary>, StorageError> {
        let guard = self
            .summaries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .iter()
            .enumerate()
            .rev()
            .take(limit as usize)
            .map(|(index, summary)| StoredSummary {
                id: index as i64 + 1,
                summary: summary.clone(),
            })
            .collect())
    }

    async fn totals_by_kind(&self) -> Result<Vec<KindTotals>, StorageError> {
        let guard = self
            .summaries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut by_kind: BTreeMap<ExerciseKind, KindTotals> = BTreeMap::new();
        for summary in guard.iter() {
            let entry = by_kind.entry(summary.kind()).or_insert(KindTotals {
                kind: summary.kind(),
                rounds: 0,
                total_answered: 0,
                correct: 0,
                score: 0,
            });
            entry.rounds += 1;
            entry.total_answered += summary.total_answered();
            entry.correct += summary.correct();
            entry.score += summary.score();
        }

        let mut totals: Vec<KindTotals> = by_kind.into_values().collect();
        totals.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(totals)
    }
}

//
// ─── STORAGE AGGREGATE ─────────────────────────────────────────────────────────
//

/// Bundles the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub summaries: Arc<dyn SummaryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let summaries: Arc<dyn SummaryRepository> = Arc::new(repo);
        Self { progress, summaries }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
