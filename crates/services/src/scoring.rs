use practice_core::model::PracticeSettings;

/// Awards points for correct answers, with a capped streak bonus.
///
/// The streak passed in counts the current answer, so the first correct
/// answer of a streak earns the base points with no bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scorer {
    points_per_correct: i64,
    streak_bonus_step: i64,
    streak_bonus_cap: i64,
}

impl Scorer {
    #[must_use]
    pub fn from_settings(settings: &PracticeSettings) -> Self {
        Self {
            points_per_correct: settings.points_per_correct(),
            streak_bonus_step: settings.streak_bonus_step(),
            streak_bonus_cap: settings.streak_bonus_cap(),
        }
    }

    /// Points for a correct answer at the given streak length.
    #[must_use]
    pub fn points_for(&self, streak: u32) -> i64 {
        let steps = i64::from(streak.saturating_sub(1));
        let bonus = self
            .streak_bonus_step
            .saturating_mul(steps)
            .min(self.streak_bonus_cap);
        self.points_per_correct + bonus
    }
}
