use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::Serialize;
use std::fmt;

use practice_core::catalog::{Catalog, ExerciseDefinition};
use practice_core::model::{ExerciseKind, Level, PracticeSettings, PracticeSummary, Problem};
use practice_core::verify;

use crate::error::SessionError;
use crate::scoring::Scorer;

//
// ─── ANSWER OUTCOMES ───────────────────────────────────────────────────────────
//

/// What a graded submission did to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradedAnswer {
    pub correct: bool,
    pub points: i64,
    pub streak: u32,
    pub round_complete: bool,
}

/// Result of submitting answer text.
///
/// Empty or whitespace-only input is a distinct no-answer condition and
/// never reaches the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AnswerOutcome {
    NoAnswer,
    Graded(GradedAnswer),
}

/// Aggregated view of round progress, useful for a front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub round_size: u32,
    pub answered_in_round: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub streak: u32,
    pub score: i64,
    pub is_round_complete: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory practice round for one exercise kind.
///
/// Walks the Active → RoundComplete loop: each graded answer advances the
/// round, completing it bumps the level and produces a summary, and
/// acknowledging the completed round starts the next one at the new level.
/// Dropping the session abandons the in-flight round; the persisted level is
/// unaffected.
pub struct PracticeSession {
    kind: ExerciseKind,
    definition: ExerciseDefinition,
    settings: PracticeSettings,
    scorer: Scorer,
    level: Level,
    problem: Problem,
    started_at: DateTime<Utc>,
    correct: u32,
    incorrect: u32,
    round_progress: u32,
    streak: u32,
    attempts_on_current: u32,
    score: i64,
    round_complete: bool,
    round_summary: Option<PracticeSummary>,
}

impl PracticeSession {
    /// Start a session: resolve the generator and draw the first problem.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Catalog` if `kind` has no registered generator.
    pub fn start(
        catalog: &Catalog,
        kind: ExerciseKind,
        level: Level,
        settings: PracticeSettings,
        rng: &mut dyn RngCore,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let definition = *catalog.definition(kind)?;
        let problem = definition.generate(rng, level);
        let scorer = Scorer::from_settings(&settings);

        Ok(Self {
            kind,
            definition,
            settings,
            scorer,
            level,
            problem,
            started_at,
            correct: 0,
            incorrect: 0,
            round_progress: 0,
            streak: 0,
            attempts_on_current: 0,
            score: 0,
            round_complete: false,
            round_summary: None,
        })
    }

    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn current_problem(&self) -> &Problem {
        &self.problem
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn attempts_on_current(&self) -> u32 {
        self.attempts_on_current
    }

    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        self.round_complete
    }

    /// The summary of the last completed round, until the next one starts.
    #[must_use]
    pub fn round_summary(&self) -> Option<&PracticeSummary> {
        self.round_summary.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            round_size: self.settings.round_size(),
            answered_in_round: self.round_progress,
            correct: self.correct,
            incorrect: self.incorrect,
            streak: self.streak,
            score: self.score,
            is_round_complete: self.round_complete,
        }
    }

    /// Submit answer text for the current problem.
    ///
    /// Empty input short-circuits to [`AnswerOutcome::NoAnswer`] without
    /// touching any counter. A graded answer updates the counters and the
    /// streak and advances the round; reaching the round size bumps the
    /// level, builds the round summary and transitions to RoundComplete.
    ///
    /// `answered_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RoundComplete` if the completed round has not
    /// been acknowledged yet.
    pub fn answer(
        &mut self,
        input: &str,
        answered_at: DateTime<Utc>,
    ) -> Result<AnswerOutcome, SessionError> {
        if self.round_complete {
            return Err(SessionError::RoundComplete);
        }
        if input.trim().is_empty() {
            return Ok(AnswerOutcome::NoAnswer);
        }

        self.attempts_on_current += 1;
        let correct = verify::check_answer(self.problem.answer(), input);
        let points = if correct {
            self.correct += 1;
            self.streak += 1;
            self.scorer.points_for(self.streak)
        } else {
            self.incorrect += 1;
            self.streak = 0;
            0
        };
        self.score += points;

        self.round_progress += 1;
        let round_complete = self.round_progress >= self.settings.round_size();
        if round_complete {
            self.round_summary = Some(PracticeSummary::from_counts(
                self.kind,
                self.started_at,
                answered_at,
                self.correct,
                self.incorrect,
                self.score,
            )?);
            self.level = self.level.next();
            self.round_progress = 0;
            self.round_complete = true;
            tracing::debug!(kind = %self.kind, level = %self.level, "round complete");
        }

        Ok(AnswerOutcome::Graded(GradedAnswer {
            correct,
            points,
            streak: self.streak,
            round_complete,
        }))
    }

    /// Draw a fresh problem at the current level (the explicit "next" action).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RoundComplete` if the completed round has not
    /// been acknowledged yet.
    pub fn next_problem(&mut self, rng: &mut dyn RngCore) -> Result<&Problem, SessionError> {
        if self.round_complete {
            return Err(SessionError::RoundComplete);
        }
        self.problem = self.definition.generate(rng, self.level);
        self.attempts_on_current = 0;
        Ok(&self.problem)
    }

    /// Leave RoundComplete: reset the counters and start the next round at
    /// the new level with a freshly generated problem.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoCompletedRound` outside RoundComplete.
    pub fn acknowledge_round(
        &mut self,
        rng: &mut dyn RngCore,
        started_at: DateTime<Utc>,
    ) -> Result<&Problem, SessionError> {
        if !self.round_complete {
            return Err(SessionError::NoCompletedRound);
        }

        self.correct = 0;
        self.incorrect = 0;
        self.streak = 0;
        self.score = 0;
        self.attempts_on_current = 0;
        self.started_at = started_at;
        self.round_complete = false;
        self.round_summary = None;
        self.problem = self.definition.generate(rng, self.level);
        Ok(&self.problem)
    }
}

impl fmt::Debug for PracticeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PracticeSession")
            .field("kind", &self.kind)
            .field("level", &self.level)
            .field("round_progress", &self.round_progress)
            .field("correct", &self.correct)
            .field("incorrect", &self.incorrect)
            .field("streak", &self.streak)
            .field("score", &self.score)
            .field("round_complete", &self.round_complete)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
