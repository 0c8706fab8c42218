use std::sync::Arc;

use practice_core::model::{ExerciseKind, Level, PracticeSettings};
use practice_core::time::fixed_now;
use practice_core::{Catalog, Clock};
use services::{AnswerOutcome, SessionLoopService};
use storage::repository::{ProgressRepository, Storage};

fn build_loop(storage: &Storage) -> SessionLoopService {
    SessionLoopService::new(
        Clock::fixed(fixed_now()),
        Arc::new(Catalog::standard()),
        storage,
    )
    .with_settings(PracticeSettings::new(4, 10, 2, 10).unwrap())
}

#[tokio::test]
async fn full_round_persists_level_and_summary() {
    let storage = Storage::in_memory();
    let service = build_loop(&storage);

    let mut session = service.start_session(ExerciseKind::Gcd).await.unwrap();
    assert_eq!(session.level(), Level::new(1));

    let mut last = None;
    for _ in 0..4 {
        let answer = session.current_problem().answer().to_string();
        let result = service.answer_current(&mut session, &answer).await.unwrap();
        if !result.is_round_complete {
            service.advance(&mut session).unwrap();
        }
        last = Some(result);
    }

    let last = last.unwrap();
    assert!(last.is_round_complete);
    let summary_id = last.summary_id.expect("completed round is persisted");

    // Level 2 was persisted for the kind.
    assert_eq!(
        storage
            .progress
            .load_level(ExerciseKind::Gcd)
            .await
            .unwrap(),
        Some(Level::new(2))
    );

    // The summary is readable back through the loop service.
    let recent = service.recent_summaries(5).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, summary_id);
    assert_eq!(recent[0].summary.kind(), ExerciseKind::Gcd);
    assert_eq!(recent[0].summary.correct(), 4);

    let standings = service.standings().await.unwrap();
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].kind, ExerciseKind::Gcd);
    assert_eq!(standings[0].rounds, 1);

    // Acknowledge and keep practicing at the new level.
    service.acknowledge_round(&mut session).unwrap();
    assert_eq!(session.level(), Level::new(2));
    assert!(!session.is_round_complete());
}

#[tokio::test]
async fn wrong_and_empty_answers_flow_through_the_loop() {
    let storage = Storage::in_memory();
    let service = build_loop(&storage);

    let mut session = service.start_session(ExerciseKind::Lcm).await.unwrap();

    let empty = service.answer_current(&mut session, "  ").await.unwrap();
    assert_eq!(empty.outcome, AnswerOutcome::NoAnswer);
    assert!(!empty.is_round_complete);

    let wrong = service
        .answer_current(&mut session, "not a number")
        .await
        .unwrap();
    let AnswerOutcome::Graded(graded) = wrong.outcome else {
        panic!("non-empty input must be graded");
    };
    assert!(!graded.correct);
    assert_eq!(graded.points, 0);

    // Nothing persisted mid-round.
    assert_eq!(
        storage.progress.load_level(ExerciseKind::Lcm).await.unwrap(),
        None
    );
    assert!(service.recent_summaries(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn next_session_resumes_at_the_persisted_level() {
    let storage = Storage::in_memory();
    let service = build_loop(&storage);

    let mut session = service.start_session(ExerciseKind::Powers).await.unwrap();
    for _ in 0..4 {
        let answer = session.current_problem().answer().to_string();
        let result = service.answer_current(&mut session, &answer).await.unwrap();
        if !result.is_round_complete {
            service.advance(&mut session).unwrap();
        }
    }
    drop(session);

    let resumed = service.start_session(ExerciseKind::Powers).await.unwrap();
    assert_eq!(resumed.level(), Level::new(2));

    // Other kinds are unaffected.
    let other = service.start_session(ExerciseKind::Fractions).await.unwrap();
    assert_eq!(other.level(), Level::new(1));
}
