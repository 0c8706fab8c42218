use std::cmp::Ordering;

use rand::Rng;
use rand::RngCore;
use rand::seq::SliceRandom;

use crate::levels::{ValueRange, bucket};
use crate::model::{Answer, Level, Problem, VisualAid};

use super::fractions::draw_irreducible;
use super::{MAX_REROLLS, frac};

const DEN_TABLE: [ValueRange; 5] = [
    ValueRange::new(2, 7),
    ValueRange::new(3, 9),
    ValueRange::new(3, 12),
    ValueRange::new(4, 15),
    ValueRange::new(5, 18),
];

/// Exercises about fractions in lowest terms: spot the irreducible one among
/// decoys, reduce a constructed reducible fraction, or pick the greater of
/// two irreducible fractions.
pub fn irreducible_fractions(rng: &mut dyn RngCore, level: Level) -> Problem {
    let dens = bucket(&DEN_TABLE, level);
    match rng.random_range(0..3u8) {
        0 => identify(rng, dens),
        1 => simplify(rng, dens),
        _ => compare(rng, dens),
    }
}

/// One irreducible target among one or two reducible decoys. Decoys are
/// built by scaling an irreducible fraction, so their GCD is the scale
/// factor and never 1.
fn identify(rng: &mut dyn RngCore, dens: ValueRange) -> Problem {
    let target = draw_irreducible(rng, dens);

    let decoy_count = rng.random_range(1..=2u8);
    let mut options = vec![target];
    for _ in 0..decoy_count {
        let seed = draw_irreducible(rng, dens);
        let factor = rng.random_range(2..=3);
        options.push(frac(seed.num() * factor, seed.den() * factor));
    }
    options.shuffle(rng);

    let index = options.iter().position(|&f| f == target).unwrap_or(0);
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();

    Problem::new(
        "Which of these fractions is irreducible (already in lowest terms)?",
        Answer::choice((index + 1).to_string()),
        format!("{target} cannot be reduced: its numerator and denominator share no common factor."),
    )
    .with_visual(VisualAid::Choices(labels))
}

fn simplify(rng: &mut dyn RngCore, dens: ValueRange) -> Problem {
    let reduced = draw_irreducible(rng, dens);
    let divisor = rng.random_range(2..=5);
    let expanded = frac(reduced.num() * divisor, reduced.den() * divisor);

    Problem::new(
        format!("Reduce {expanded} to an irreducible fraction."),
        Answer::Fraction(reduced),
        format!("Divide numerator and denominator of {expanded} by {divisor}: {reduced}."),
    )
}

/// Both candidates are guaranteed irreducible and distinct in value; the
/// answer is the option index of the greater one.
fn compare(rng: &mut dyn RngCore, dens: ValueRange) -> Problem {
    let first = draw_irreducible(rng, dens);
    let mut second = draw_irreducible(rng, dens);
    let mut rerolls = 0;
    while first.equivalent(second) && rerolls < MAX_REROLLS {
        second = draw_irreducible(rng, dens);
        rerolls += 1;
    }
    if first.equivalent(second) {
        second = if first.equivalent(frac(1, 2)) {
            frac(1, 3)
        } else {
            frac(1, 2)
        };
    }

    let greater_index = match first.compare(second) {
        Ordering::Greater => 1,
        _ => 2,
    };
    let labels = vec![first.to_string(), second.to_string()];

    Problem::new(
        "Which fraction is greater?",
        Answer::choice(greater_index.to_string()),
        format!(
            "{first} = {:.2} and {second} = {:.2}.",
            first.value(),
            second.value()
        ),
    )
    .with_visual(VisualAid::Choices(labels))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
