use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive-integer difficulty knob for one exercise kind.
///
/// Construction clamps instead of failing: a zero (or otherwise degenerate)
/// input always becomes level 1, so callers never handle an error here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(u32);

impl Level {
    pub const MIN: Level = Level(1);

    /// Creates a level, clamping 0 up to 1.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.max(1))
    }

    /// Rebuild a level from a persisted integer column.
    ///
    /// Out-of-range or non-positive values clamp into `1..=u32::MAX` rather
    /// than failing, matching the "never an error" policy for degenerate
    /// levels.
    #[must_use]
    pub fn from_persisted(value: i64) -> Self {
        let clamped = value.clamp(1, i64::from(u32::MAX));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(clamped as u32)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// The next level up, saturating at `u32::MAX`.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
