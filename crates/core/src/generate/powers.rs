use rand::Rng;
use rand::RngCore;

use crate::levels::{ValueRange, bucket};
use crate::model::{Answer, Level, Problem};

//
// ─── SCALING TABLE ─────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy)]
struct PowerBucket {
    base: ValueRange,
    exp_min: u32,
    exp_max: u32,
}

const POWER_TABLE: [PowerBucket; 5] = [
    PowerBucket { base: ValueRange::new(2, 3), exp_min: 1, exp_max: 3 },
    PowerBucket { base: ValueRange::new(2, 5), exp_min: 1, exp_max: 4 },
    PowerBucket { base: ValueRange::new(2, 7), exp_min: 2, exp_max: 5 },
    PowerBucket { base: ValueRange::new(2, 9), exp_min: 2, exp_max: 6 },
    PowerBucket { base: ValueRange::new(2, 10), exp_min: 2, exp_max: 8 },
];

// The numeric branch is evaluated, so its exponents stay small regardless of
// how far the table has widened.
const NUMERIC_EXP_MAX: u32 = 3;

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Power-law exercises.
///
/// Same-base multiplication and division keep the base and combine the
/// exponents, expecting the answer in `base^exponent` notation. The
/// different-base branch evaluates both powers and expects a plain integer;
/// the two comparison modes are not interchangeable, which the [`Answer`]
/// variant records.
pub fn powers(rng: &mut dyn RngCore, level: Level) -> Problem {
    let ranges = bucket(&POWER_TABLE, level);
    match rng.random_range(0..3u8) {
        0 => same_base_multiplication(rng, ranges),
        1 => same_base_division(rng, ranges),
        _ => different_base_multiplication(rng, ranges),
    }
}

fn same_base_multiplication(rng: &mut dyn RngCore, ranges: PowerBucket) -> Problem {
    let base = ranges.base.draw(rng);
    let e1 = rng.random_range(ranges.exp_min..=ranges.exp_max);
    let e2 = rng.random_range(ranges.exp_min..=ranges.exp_max);
    let exponent = e1 + e2;

    Problem::new(
        format!("Simplify {base}^{e1} * {base}^{e2}. Answer in the form base^exponent."),
        Answer::Power { base, exponent },
        format!("Multiplying powers of the same base adds the exponents: {e1} + {e2} = {exponent}."),
    )
}

fn same_base_division(rng: &mut dyn RngCore, ranges: PowerBucket) -> Problem {
    let base = ranges.base.draw(rng);
    // Dividend exponent strictly greater, so the result stays non-negative.
    let e2 = rng.random_range(ranges.exp_min..=ranges.exp_max);
    let e1 = e2 + rng.random_range(1..=ranges.exp_max);
    let exponent = e1 - e2;

    Problem::new(
        format!("Simplify {base}^{e1} / {base}^{e2}. Answer in the form base^exponent."),
        Answer::Power { base, exponent },
        format!(
            "Dividing powers of the same base subtracts the exponents: {e1} - {e2} = {exponent}."
        ),
    )
}

fn different_base_multiplication(rng: &mut dyn RngCore, ranges: PowerBucket) -> Problem {
    let b1 = ranges.base.draw(rng);
    let mut b2 = ranges.base.draw(rng);
    if b2 == b1 {
        b2 = if b1 < ranges.base.max { b1 + 1 } else { b1 - 1 };
    }
    let exp_max = ranges.exp_max.min(NUMERIC_EXP_MAX);
    let e1 = rng.random_range(1..=exp_max);
    let e2 = rng.random_range(1..=exp_max);

    let p1 = b1.pow(e1);
    let p2 = b2.pow(e2);
    let answer = p1 * p2;

    Problem::new(
        format!("Calculate {b1}^{e1} * {b2}^{e2}."),
        Answer::Integer(answer),
        format!("{b1}^{e1} = {p1} and {b2}^{e2} = {p2}, so the product is {answer}."),
    )
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
