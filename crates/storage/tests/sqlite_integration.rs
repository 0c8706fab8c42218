use practice_core::model::{ExerciseKind, Level, PracticeSummary};
use practice_core::time::fixed_now;
use storage::repository::{ProgressRepository, Storage, SummaryRepository};

async fn memory_storage(name: &str) -> Storage {
    // Named shared-cache memory databases keep every pooled connection on
    // the same data while isolating the tests from each other.
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    Storage::sqlite(&url).await.expect("in-memory sqlite should open")
}

fn build_summary(kind: ExerciseKind, correct: u32, incorrect: u32, score: i64) -> PracticeSummary {
    PracticeSummary::from_counts(kind, fixed_now(), fixed_now(), correct, incorrect, score).unwrap()
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let storage = memory_storage("memdb_migrations").await;
    // A second Storage over the same database must skip the applied version.
    let again = memory_storage("memdb_migrations").await;
    drop(storage);
    drop(again);
}

#[tokio::test]
async fn level_round_trips_and_overwrites() {
    let storage = memory_storage("memdb_levels").await;

    assert_eq!(
        storage.progress.load_level(ExerciseKind::Gcd).await.unwrap(),
        None
    );

    storage
        .progress
        .save_level(ExerciseKind::Gcd, Level::new(4))
        .await
        .unwrap();
    assert_eq!(
        storage.progress.load_level(ExerciseKind::Gcd).await.unwrap(),
        Some(Level::new(4))
    );

    storage
        .progress
        .save_level(ExerciseKind::Gcd, Level::new(5))
        .await
        .unwrap();
    assert_eq!(
        storage.progress.load_level(ExerciseKind::Gcd).await.unwrap(),
        Some(Level::new(5))
    );
}

#[tokio::test]
async fn levels_are_keyed_by_kind() {
    let storage = memory_storage("memdb_level_keys").await;

    storage
        .progress
        .save_level(ExerciseKind::Fractions, Level::new(6))
        .await
        .unwrap();

    assert_eq!(
        storage
            .progress
            .load_level(ExerciseKind::Fractions)
            .await
            .unwrap(),
        Some(Level::new(6))
    );
    assert_eq!(
        storage
            .progress
            .load_level(ExerciseKind::Powers)
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn summaries_round_trip_with_ids() {
    let storage = memory_storage("memdb_summaries").await;

    let first = storage
        .summaries
        .insert_summary(&build_summary(ExerciseKind::Gcd, 7, 1, 74))
        .await
        .unwrap();
    let second = storage
        .summaries
        .insert_summary(&build_summary(ExerciseKind::Lcm, 8, 0, 96))
        .await
        .unwrap();
    assert!(second > first);

    let recent = storage.summaries.list_recent(10).await.unwrap();
    assert_eq!(recent.len(), 2);
    // Same completed_at timestamp, so the higher row id wins.
    assert_eq!(recent[0].id, second);
    assert_eq!(recent[0].summary.kind(), ExerciseKind::Lcm);
    assert_eq!(recent[0].summary.correct(), 8);
    assert_eq!(recent[1].summary.score(), 74);
}

#[tokio::test]
async fn totals_aggregate_per_kind() {
    let storage = memory_storage("memdb_totals").await;

    storage
        .summaries
        .insert_summary(&build_summary(ExerciseKind::Gcd, 6, 2, 60))
        .await
        .unwrap();
    storage
        .summaries
        .insert_summary(&build_summary(ExerciseKind::Gcd, 8, 0, 96))
        .await
        .unwrap();
    storage
        .summaries
        .insert_summary(&build_summary(ExerciseKind::Fractions, 5, 3, 50))
        .await
        .unwrap();

    let totals = storage.summaries.totals_by_kind().await.unwrap();
    assert_eq!(totals.len(), 2);

    assert_eq!(totals[0].kind, ExerciseKind::Gcd);
    assert_eq!(totals[0].rounds, 2);
    assert_eq!(totals[0].total_answered, 16);
    assert_eq!(totals[0].correct, 14);
    assert_eq!(totals[0].score, 156);

    assert_eq!(totals[1].kind, ExerciseKind::Fractions);
    assert_eq!(totals[1].rounds, 1);
}
