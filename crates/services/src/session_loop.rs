use serde::Serialize;
use std::sync::Arc;

use practice_core::catalog::Catalog;
use practice_core::model::{ExerciseKind, PracticeSettings};
use storage::repository::{KindTotals, Storage, StoredSummary, SummaryRepository};

use crate::error::SessionError;
use crate::progress::ProgressService;
use crate::session::{AnswerOutcome, PracticeSession};
use crate::Clock;

/// Result of routing one answer through the persisted session loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionAnswerResult {
    pub outcome: AnswerOutcome,
    pub is_round_complete: bool,
    pub summary_id: Option<i64>,
}

/// Orchestrates session start, answering and round persistence.
///
/// Completing a round persists the bumped level and the round summary.
/// Both writes follow the degrade policy: a storage failure is logged and
/// the session continues unpersisted.
#[derive(Clone)]
pub struct SessionLoopService {
    clock: Clock,
    catalog: Arc<Catalog>,
    progress: ProgressService,
    summaries: Arc<dyn SummaryRepository>,
    settings: PracticeSettings,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<Catalog>, storage: &Storage) -> Self {
        Self {
            clock,
            catalog,
            progress: ProgressService::new(Arc::clone(&storage.progress)),
            summaries: Arc::clone(&storage.summaries),
            settings: PracticeSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: PracticeSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &PracticeSettings {
        &self.settings
    }

    /// Start a session for the given kind at its persisted level.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if the kind has no generator.
    pub async fn start_session(&self, kind: ExerciseKind) -> Result<PracticeSession, SessionError> {
        let level = self.progress.load(kind).await;
        let mut rng = rand::rng();
        PracticeSession::start(
            &self.catalog,
            kind,
            level,
            self.settings.clone(),
            &mut rng,
            self.clock.now(),
        )
    }

    /// Grade the given answer text and persist level + summary when the
    /// round completes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RoundComplete` if the session is awaiting
    /// acknowledgement.
    pub async fn answer_current(
        &self,
        session: &mut PracticeSession,
        input: &str,
    ) -> Result<SessionAnswerResult, SessionError> {
        let outcome = session.answer(input, self.clock.now())?;

        let mut summary_id = None;
        if session.is_round_complete() {
            self.progress.save(session.kind(), session.level()).await;
            if let Some(summary) = session.round_summary() {
                match self.summaries.insert_summary(summary).await {
                    Ok(id) => summary_id = Some(id),
                    Err(err) => {
                        tracing::warn!(kind = %session.kind(), error = %err, "failed to persist round summary");
                    }
                }
            }
        }

        Ok(SessionAnswerResult {
            outcome,
            is_round_complete: session.is_round_complete(),
            summary_id,
        })
    }

    /// The explicit "next problem" action.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RoundComplete` if the session is awaiting
    /// acknowledgement.
    pub fn advance(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        let mut rng = rand::rng();
        session.next_problem(&mut rng).map(|_| ())
    }

    /// Acknowledge a completed round and start the next one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoCompletedRound` outside RoundComplete.
    pub fn acknowledge_round(&self, session: &mut PracticeSession) -> Result<(), SessionError> {
        let mut rng = rand::rng();
        session
            .acknowledge_round(&mut rng, self.clock.now())
            .map(|_| ())
    }

    /// Per-kind standings, highest total score first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the aggregates cannot be read.
    pub async fn standings(&self) -> Result<Vec<KindTotals>, SessionError> {
        Ok(self.summaries.totals_by_kind().await?)
    }

    /// Most recent round summaries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the summaries cannot be read.
    pub async fn recent_summaries(&self, limit: u32) -> Result<Vec<StoredSummary>, SessionError> {
        Ok(self.summaries.list_recent(limit).await?)
    }
}
