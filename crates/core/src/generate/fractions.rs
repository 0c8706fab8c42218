use std::cmp::Ordering;

use rand::Rng;
use rand::RngCore;
use rand::seq::IndexedRandom;

use crate::levels::{ValueRange, bucket};
use crate::model::{Answer, Fraction, Level, Problem};

use super::{MAX_REROLLS, frac};

//
// ─── SCALING TABLES ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy)]
struct DecimalBucket {
    num: ValueRange,
    den: ValueRange,
}

const DECIMAL_TABLE: [DecimalBucket; 5] = [
    DecimalBucket { num: ValueRange::new(1, 9), den: ValueRange::new(2, 6) },
    DecimalBucket { num: ValueRange::new(1, 15), den: ValueRange::new(3, 8) },
    DecimalBucket { num: ValueRange::new(2, 20), den: ValueRange::new(3, 9) },
    DecimalBucket { num: ValueRange::new(3, 30), den: ValueRange::new(4, 11) },
    DecimalBucket { num: ValueRange::new(5, 40), den: ValueRange::new(6, 12) },
];

// Denominator ranges for the fraction-arithmetic exercises.
const DEN_TABLE: [ValueRange; 5] = [
    ValueRange::new(2, 6),
    ValueRange::new(2, 9),
    ValueRange::new(3, 10),
    ValueRange::new(3, 12),
    ValueRange::new(4, 15),
];

//
// ─── FRACTION → DECIMAL ────────────────────────────────────────────────────────
//

/// Division exercise: rejects exact multiples so the quotient is not a whole
/// number, then rounds half-up to two decimal places.
pub fn fraction_decimal(rng: &mut dyn RngCore, level: Level) -> Problem {
    let ranges = bucket(&DECIMAL_TABLE, level);
    let den = ranges.den.draw(rng);
    let mut num = ranges.num.draw(rng);
    let mut rerolls = 0;
    while num % den == 0 && rerolls < MAX_REROLLS {
        num = ranges.num.draw(rng);
        rerolls += 1;
    }
    if num % den == 0 {
        // Nudging off the multiple keeps the quotient fractional for den >= 2.
        num += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let answer = crate::numbers::round2(num as f64 / den as f64);

    Problem::new(
        format!("Write {num}/{den} as a decimal, rounded to two places."),
        Answer::Decimal(answer),
        format!("{num} divided by {den} is {answer:.2} after rounding to two decimal places."),
    )
}

//
// ─── FRACTION ARITHMETIC ───────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FractionOp {
    Equivalent,
    Simplify,
    Compare,
    Add,
    Subtract,
    Multiply,
    Divide,
}

const OPS_INTRO: [FractionOp; 2] = [FractionOp::Equivalent, FractionOp::Simplify];
const OPS_COMPARE: [FractionOp; 3] = [
    FractionOp::Equivalent,
    FractionOp::Simplify,
    FractionOp::Compare,
];
const OPS_ADDITIVE: [FractionOp; 5] = [
    FractionOp::Equivalent,
    FractionOp::Simplify,
    FractionOp::Compare,
    FractionOp::Add,
    FractionOp::Subtract,
];
const OPS_ALL: [FractionOp; 7] = [
    FractionOp::Equivalent,
    FractionOp::Simplify,
    FractionOp::Compare,
    FractionOp::Add,
    FractionOp::Subtract,
    FractionOp::Multiply,
    FractionOp::Divide,
];

fn ops_for(level: Level) -> &'static [FractionOp] {
    match level.get() {
        1..=2 => &OPS_INTRO,
        3..=4 => &OPS_COMPARE,
        5..=6 => &OPS_ADDITIVE,
        _ => &OPS_ALL,
    }
}

/// Mixed fraction exercises; the sub-operation is drawn from a level-gated
/// subset so new operations unlock as the level rises.
pub fn fractions(rng: &mut dyn RngCore, level: Level) -> Problem {
    let op = *ops_for(level)
        .choose(rng)
        .unwrap_or(&FractionOp::Equivalent);
    let dens = bucket(&DEN_TABLE, level);

    match op {
        FractionOp::Equivalent => equivalent(rng, dens),
        FractionOp::Simplify => simplify(rng, dens),
        FractionOp::Compare => compare(rng, dens),
        FractionOp::Add => additive(rng, dens, level, AdditiveOp::Add),
        FractionOp::Subtract => additive(rng, dens, level, AdditiveOp::Subtract),
        FractionOp::Multiply => multiply(rng, dens),
        FractionOp::Divide => divide(rng, dens),
    }
}

/// Draws a proper fraction with a denominator in `dens`.
pub(crate) fn draw_proper(rng: &mut dyn RngCore, dens: ValueRange) -> Fraction {
    let den = dens.draw(rng);
    let num = rng.random_range(1..den);
    frac(num, den)
}

/// Draws a proper fraction in lowest terms. Exhausted retries fall back to a
/// unit fraction, which is irreducible by construction.
pub(crate) fn draw_irreducible(rng: &mut dyn RngCore, dens: ValueRange) -> Fraction {
    let mut fraction = draw_proper(rng, dens);
    let mut rerolls = 0;
    while !fraction.is_irreducible() && rerolls < MAX_REROLLS {
        fraction = draw_proper(rng, dens);
        rerolls += 1;
    }
    if fraction.is_irreducible() {
        fraction
    } else {
        frac(1, fraction.den())
    }
}

fn equivalent(rng: &mut dyn RngCore, dens: ValueRange) -> Problem {
    let base = draw_proper(rng, dens);
    let factor = rng.random_range(2..=4);
    let scaled = frac(base.num() * factor, base.den() * factor);

    Problem::new(
        format!(
            "Write {base} as an equivalent fraction with denominator {}: {base} = ?/{}",
            scaled.den(),
            scaled.den()
        ),
        Answer::Fraction(scaled),
        format!("Multiply numerator and denominator of {base} by {factor} to get {scaled}."),
    )
}

fn simplify(rng: &mut dyn RngCore, dens: ValueRange) -> Problem {
    let reduced = draw_irreducible(rng, dens);
    let factor = rng.random_range(2..=4);
    let expanded = frac(reduced.num() * factor, reduced.den() * factor);

    Problem::new(
        format!("Simplify {expanded} to lowest terms."),
        Answer::Fraction(reduced),
        format!("Divide numerator and denominator of {expanded} by {factor}: {reduced}."),
    )
}

fn compare(rng: &mut dyn RngCore, dens: ValueRange) -> Problem {
    let left = draw_proper(rng, dens);
    let right = draw_proper(rng, dens);
    let symbol = match left.compare(right) {
        Ordering::Greater => ">",
        Ordering::Less => "<",
        Ordering::Equal => "=",
    };

    Problem::new(
        format!("Compare the fractions: {left} ? {right}. Answer with >, < or =."),
        Answer::choice(symbol),
        format!(
            "{left} = {:.2} and {right} = {:.2}, so {left} {symbol} {right}.",
            left.value(),
            right.value()
        ),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdditiveOp {
    Add,
    Subtract,
}

/// Addition/subtraction. Below level 5 both operands share a denominator;
/// from level 5 the denominators are independent and the cross-multiplied
/// result is reduced by the GCD. Subtraction operands are ordered so the
/// result is never negative.
fn additive(rng: &mut dyn RngCore, dens: ValueRange, level: Level, op: AdditiveOp) -> Problem {
    let (left, right, result) = if level.get() < 5 {
        let den = dens.draw(rng);
        let mut a = rng.random_range(1..den);
        let mut b = rng.random_range(1..den);
        if op == AdditiveOp::Subtract && a < b {
            std::mem::swap(&mut a, &mut b);
        }
        let result = match op {
            AdditiveOp::Add => frac(a + b, den),
            AdditiveOp::Subtract => frac(a - b, den),
        };
        (frac(a, den), frac(b, den), result)
    } else {
        let mut left = draw_proper(rng, dens);
        let mut right = draw_proper(rng, dens);
        if op == AdditiveOp::Subtract && left.compare(right) == Ordering::Less {
            std::mem::swap(&mut left, &mut right);
        }
        let result = match op {
            AdditiveOp::Add => left.add(right).reduced(),
            AdditiveOp::Subtract => left.sub(right).reduced(),
        };
        (left, right, result)
    };

    let sign = match op {
        AdditiveOp::Add => "+",
        AdditiveOp::Subtract => "-",
    };
    let explanation = if left.den() == right.den() {
        format!(
            "The denominators match, so work on the numerators: {} {sign} {} = {}.",
            left.num(),
            right.num(),
            result.num()
        )
    } else {
        format!("Bring both fractions to a common denominator, then reduce: {result}.")
    };

    Problem::new(
        format!("Calculate: {left} {sign} {right}. Answer as a fraction."),
        Answer::Fraction(result),
        explanation,
    )
}

fn multiply(rng: &mut dyn RngCore, dens: ValueRange) -> Problem {
    let left = draw_proper(rng, dens);
    let right = draw_proper(rng, dens);
    let result = left.mul(right).reduced();

    Problem::new(
        format!("Calculate: {left} * {right}. Answer as a fraction."),
        Answer::Fraction(result),
        format!("Multiply the numerators and the denominators, then reduce: {result}."),
    )
}

fn divide(rng: &mut dyn RngCore, dens: ValueRange) -> Problem {
    let left = draw_proper(rng, dens);
    let right = draw_proper(rng, dens);
    // Proper fractions have numerator >= 1, so the reciprocal exists.
    let result = left
        .div(right)
        .expect("proper fractions have a non-zero numerator")
        .reduced();

    Problem::new(
        format!("Calculate: {left} / {right}. Answer as a fraction."),
        Answer::Fraction(result),
        format!(
            "Multiply by the reciprocal: {left} * {}/{} = {result}.",
            right.den(),
            right.num()
        ),
    )
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn decimal_answers_are_never_whole_numbers() {
        let mut rng = StdRng::seed_from_u64(21);
        for level in [1, 3, 8] {
            for _ in 0..300 {
                let problem = fraction_decimal(&mut rng, Level::new(level));
                let Answer::Decimal(value) = *problem.answer() else {
                    panic!("decimal exercises answer with a decimal");
                };
                assert!(value > 0.0);
                let parts: Vec<i64> = problem
                    .question()
                    .split(|c: char| !c.is_ascii_digit())
                    .filter(|p| !p.is_empty())
                    .map(|p| p.parse().unwrap())
                    .collect();
                let (num, den) = (parts[0], parts[1]);
                assert_ne!(num % den, 0, "{num}/{den} is an exact multiple");
            }
        }
    }

    #[test]
    fn intro_levels_only_offer_equivalent_and_simplify() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..300 {
            let problem = fractions(&mut rng, Level::new(1));
            let question = problem.question();
            assert!(
                question.contains("equivalent") || question.contains("Simplify"),
                "unexpected intro-level exercise: {question}"
            );
        }
    }

    #[test]
    fn operations_unlock_with_level() {
        assert_eq!(ops_for(Level::new(1)).len(), 2);
        assert_eq!(ops_for(Level::new(2)).len(), 2);
        assert_eq!(ops_for(Level::new(3)).len(), 3);
        assert_eq!(ops_for(Level::new(5)).len(), 5);
        assert_eq!(ops_for(Level::new(7)).len(), 7);
        assert_eq!(ops_for(Level::new(50)).len(), 7);
    }

    #[test]
    fn low_level_additive_shares_a_denominator() {
        let mut rng = StdRng::seed_from_u64(29);
        let dens = bucket(&DEN_TABLE, Level::new(4));
        for _ in 0..200 {
            let problem = additive(&mut rng, dens, Level::new(4), AdditiveOp::Add);
            let Answer::Fraction(result) = *problem.answer() else {
                panic!("additive exercises answer with a fraction");
            };
            // With a shared denominator the result keeps it verbatim.
            assert!(problem.question().contains(&format!("/{}", result.den())));
        }
    }

    #[test]
    fn subtraction_results_are_never_negative() {
        let mut rng = StdRng::seed_from_u64(31);
        let dens = bucket(&DEN_TABLE, Level::new(6));
        for level in [2, 6] {
            for _ in 0..200 {
                let problem = additive(&mut rng, dens, Level::new(level), AdditiveOp::Subtract);
                let Answer::Fraction(result) = *problem.answer() else {
                    panic!("additive exercises answer with a fraction");
                };
                assert!(result.num() >= 0, "negative result {result}");
            }
        }
    }

    #[test]
    fn multiplicative_results_are_reduced() {
        let mut rng = StdRng::seed_from_u64(37);
        let dens = bucket(&DEN_TABLE, Level::new(8));
        for _ in 0..200 {
            for problem in [multiply(&mut rng, dens), divide(&mut rng, dens)] {
                let Answer::Fraction(result) = *problem.answer() else {
                    panic!("fraction exercises answer with a fraction");
                };
                assert!(result.is_irreducible(), "unreduced result {result}");
            }
        }
    }

    #[test]
    fn simplify_round_trips_through_the_expanded_form() {
        let mut rng = StdRng::seed_from_u64(41);
        let dens = bucket(&DEN_TABLE, Level::new(3));
        for _ in 0..200 {
            let problem = simplify(&mut rng, dens);
            let Answer::Fraction(reduced) = *problem.answer() else {
                panic!("simplify answers with a fraction");
            };
            assert!(reduced.is_irreducible());
            let expanded: Fraction = problem
                .question()
                .trim_start_matches("Simplify ")
                .split_whitespace()
                .next()
                .unwrap()
                .parse()
                .unwrap();
            assert!(expanded.equivalent(reduced));
            assert!(!expanded.is_irreducible());
        }
    }

    #[test]
    fn compare_symbol_matches_magnitudes() {
        let mut rng = StdRng::seed_from_u64(43);
        let dens = bucket(&DEN_TABLE, Level::new(3));
        for _ in 0..200 {
            let problem = compare(&mut rng, dens);
            let Answer::Choice(symbol) = problem.answer() else {
                panic!("compare answers with a choice code");
            };
            assert!([">", "<", "="].contains(&symbol.as_str()));
        }
    }
}
