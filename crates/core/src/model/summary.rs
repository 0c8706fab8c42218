use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ExerciseKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("answered total ({total}) does not match correct + incorrect ({sum})")]
    CountMismatch { total: u32, sum: u32 },
}

/// Aggregate record of one completed practice round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSummary {
    kind: ExerciseKind,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total_answered: u32,
    correct: u32,
    incorrect: u32,
    score: i64,
}

impl PracticeSummary {
    /// Rehydrate a summary from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::InvalidTimeRange` if `completed_at` is before
    /// `started_at`, or `SummaryError::CountMismatch` if the counters do not
    /// add up.
    pub fn from_persisted(
        kind: ExerciseKind,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        total_answered: u32,
        correct: u32,
        incorrect: u32,
        score: i64,
    ) -> Result<Self, SummaryError> {
        if completed_at < started_at {
            return Err(SummaryError::InvalidTimeRange);
        }
        let sum = correct + incorrect;
        if sum != total_answered {
            return Err(SummaryError::CountMismatch {
                total: total_answered,
                sum,
            });
        }

        Ok(Self {
            kind,
            started_at,
            completed_at,
            total_answered,
            correct,
            incorrect,
            score,
        })
    }

    /// Build a summary from round counters.
    ///
    /// # Errors
    ///
    /// Same validation as [`PracticeSummary::from_persisted`].
    pub fn from_counts(
        kind: ExerciseKind,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        correct: u32,
        incorrect: u32,
        score: i64,
    ) -> Result<Self, SummaryError> {
        Self::from_persisted(
            kind,
            started_at,
            completed_at,
            correct + incorrect,
            correct,
            incorrect,
            score,
        )
    }

    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.total_answered
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn counts_must_add_up() {
        let now = fixed_now();
        let err =
            PracticeSummary::from_persisted(ExerciseKind::Gcd, now, now, 8, 5, 2, 50).unwrap_err();
        assert_eq!(err, SummaryError::CountMismatch { total: 8, sum: 7 });
    }

    #[test]
    fn time_range_is_validated() {
        let now = fixed_now();
        let earlier = now - chrono::Duration::seconds(1);
        let err = PracticeSummary::from_persisted(ExerciseKind::Lcm, now, earlier, 0, 0, 0, 0)
            .unwrap_err();
        assert_eq!(err, SummaryError::InvalidTimeRange);
    }

    #[test]
    fn from_counts_fills_total() {
        let now = fixed_now();
        let summary =
            PracticeSummary::from_counts(ExerciseKind::Fractions, now, now, 6, 2, 64).unwrap();
        assert_eq!(summary.total_answered(), 8);
        assert_eq!(summary.correct(), 6);
        assert_eq!(summary.incorrect(), 2);
        assert_eq!(summary.score(), 64);
    }
}
