use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("round size must be at least 1")]
    InvalidRoundSize,

    #[error("points per correct answer must be non-negative, got {provided}")]
    InvalidPoints { provided: i64 },
}

/// Tunables for a practice session.
///
/// A round is a fixed-size batch of answered problems; completing one
/// advances the persisted level for the exercise kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeSettings {
    round_size: u32,
    points_per_correct: i64,
    streak_bonus_step: i64,
    streak_bonus_cap: i64,
}

impl PracticeSettings {
    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidRoundSize` for a zero round size and
    /// `SettingsError::InvalidPoints` for negative point values.
    pub fn new(
        round_size: u32,
        points_per_correct: i64,
        streak_bonus_step: i64,
        streak_bonus_cap: i64,
    ) -> Result<Self, SettingsError> {
        if round_size == 0 {
            return Err(SettingsError::InvalidRoundSize);
        }
        for provided in [points_per_correct, streak_bonus_step, streak_bonus_cap] {
            if provided < 0 {
                return Err(SettingsError::InvalidPoints { provided });
            }
        }
        Ok(Self {
            round_size,
            points_per_correct,
            streak_bonus_step,
            streak_bonus_cap,
        })
    }

    #[must_use]
    pub fn round_size(&self) -> u32 {
        self.round_size
    }

    #[must_use]
    pub fn points_per_correct(&self) -> i64 {
        self.points_per_correct
    }

    #[must_use]
    pub fn streak_bonus_step(&self) -> i64 {
        self.streak_bonus_step
    }

    #[must_use]
    pub fn streak_bonus_cap(&self) -> i64 {
        self.streak_bonus_cap
    }
}

impl Default for PracticeSettings {
    /// Eight problems per round, 10 points each, +2 per streak step capped at 10.
    fn default() -> Self {
        Self {
            round_size: 8,
            points_per_correct: 10,
            streak_bonus_step: 2,
            streak_bonus_cap: 10,
        }
    }
}
