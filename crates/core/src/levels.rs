//! Difficulty scaling tables.
//!
//! Every generator scales the same way: a small bucket table widens its
//! numeric ranges monotonically with the level. Levels past the last bucket
//! reuse the last bucket, so difficulty growth is bounded.

use rand::Rng;
use rand::RngCore;

use crate::model::Level;

/// Inclusive integer range a generator draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: i64,
    pub max: i64,
}

impl ValueRange {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Uniform draw over the inclusive range.
    pub fn draw(self, rng: &mut dyn RngCore) -> i64 {
        rng.random_range(self.min..=self.max)
    }
}

/// Picks the bucket for a level: index `level - 1`, clamped to the table.
///
/// Because [`Level`] already clamps 0 to 1, `bucket(table, Level::new(0))`
/// and `bucket(table, Level::new(1))` select the identical entry.
#[must_use]
pub fn bucket<T: Copy>(table: &[T], level: Level) -> T {
    debug_assert!(!table.is_empty());
    let index = (level.get() as usize - 1).min(table.len() - 1);
    table[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TABLE: [ValueRange; 3] = [
        ValueRange::new(1, 5),
        ValueRange::new(2, 10),
        ValueRange::new(5, 20),
    ];

    #[test]
    fn level_zero_and_one_share_a_bucket() {
        assert_eq!(bucket(&TABLE, Level::new(0)), bucket(&TABLE, Level::new(1)));
    }

    #[test]
    fn levels_past_the_table_reuse_the_last_bucket() {
        assert_eq!(bucket(&TABLE, Level::new(3)), TABLE[2]);
        assert_eq!(bucket(&TABLE, Level::new(99)), TABLE[2]);
    }

    #[test]
    fn draws_stay_inside_the_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = ValueRange::new(3, 9);
        for _ in 0..200 {
            let value = range.draw(&mut rng);
            assert!((3..=9).contains(&value));
        }
    }
}
