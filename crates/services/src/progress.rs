use std::sync::Arc;

use practice_core::model::{ExerciseKind, Level};
use storage::repository::ProgressRepository;

/// Level persistence with the degrade-on-failure policy.
///
/// Storage problems never interrupt a practice session: a failed load falls
/// back to level 1 and a failed save is dropped, both with a warning.
#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self { repo }
    }

    /// The persisted level for a kind, defaulting to level 1 when the kind
    /// was never saved or storage is unavailable.
    pub async fn load(&self, kind: ExerciseKind) -> Level {
        match self.repo.load_level(kind).await {
            Ok(Some(level)) => level,
            Ok(None) => Level::default(),
            Err(err) => {
                tracing::warn!(%kind, error = %err, "failed to load level, starting at 1");
                Level::default()
            }
        }
    }

    /// Persists the level for a kind; a failed write is logged and dropped.
    pub async fn save(&self, kind: ExerciseKind, level: Level) {
        if let Err(err) = self.repo.save_level(kind, level).await {
            tracing::warn!(%kind, %level, error = %err, "failed to save level, progress not persisted");
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storage::repository::{InMemoryRepository, StorageError};

    /// Repository stub whose every call fails, simulating unavailable storage.
    struct BrokenRepository;

    #[async_trait]
    impl ProgressRepository for BrokenRepository {
        async fn load_level(&self, _kind: ExerciseKind) -> Result<Option<Level>, StorageError> {
            Err(StorageError::Connection("disk on fire".into()))
        }

        async fn save_level(&self, _kind: ExerciseKind, _level: Level) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk on fire".into()))
        }
    }

    #[tokio::test]
    async fn missing_level_defaults_to_one() {
        let service = ProgressService::new(Arc::new(InMemoryRepository::new()));
        assert_eq!(service.load(ExerciseKind::Gcd).await, Level::new(1));
    }

    #[tokio::test]
    async fn saved_level_round_trips() {
        let service = ProgressService::new(Arc::new(InMemoryRepository::new()));
        service.save(ExerciseKind::Powers, Level::new(5)).await;
        assert_eq!(service.load(ExerciseKind::Powers).await, Level::new(5));
    }

    #[tokio::test]
    async fn unavailable_storage_degrades_silently() {
        let service = ProgressService::new(Arc::new(BrokenRepository));
        // Neither call may error or panic.
        assert_eq!(service.load(ExerciseKind::Fractions).await, Level::new(1));
        service.save(ExerciseKind::Fractions, Level::new(9)).await;
    }
}
