use rand::RngCore;

use crate::levels::{ValueRange, bucket};
use crate::model::{Answer, Level, Problem};
use crate::numbers;

use super::MAX_REROLLS;

//
// ─── SCALING TABLES ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy)]
struct GcdBucket {
    factor: ValueRange,
    cofactor: ValueRange,
}

// The shared factor is multiplied into both operands, so low levels are
// guaranteed a GCD greater than 1.
const GCD_TABLE: [GcdBucket; 5] = [
    GcdBucket { factor: ValueRange::new(2, 5), cofactor: ValueRange::new(1, 5) },
    GcdBucket { factor: ValueRange::new(2, 7), cofactor: ValueRange::new(2, 7) },
    GcdBucket { factor: ValueRange::new(2, 9), cofactor: ValueRange::new(2, 9) },
    GcdBucket { factor: ValueRange::new(3, 12), cofactor: ValueRange::new(3, 12) },
    GcdBucket { factor: ValueRange::new(4, 15), cofactor: ValueRange::new(4, 15) },
];

const LCM_TABLE: [ValueRange; 5] = [
    ValueRange::new(2, 6),
    ValueRange::new(2, 9),
    ValueRange::new(3, 12),
    ValueRange::new(4, 15),
    ValueRange::new(6, 20),
];

const COMPOSITE_TABLE: [ValueRange; 5] = [
    ValueRange::new(4, 20),
    ValueRange::new(10, 40),
    ValueRange::new(20, 80),
    ValueRange::new(40, 150),
    ValueRange::new(60, 300),
];

//
// ─── GENERATORS ────────────────────────────────────────────────────────────────
//

pub fn gcd(rng: &mut dyn RngCore, level: Level) -> Problem {
    let ranges = bucket(&GCD_TABLE, level);
    let factor = ranges.factor.draw(rng);
    let left = factor * ranges.cofactor.draw(rng);
    let right = factor * ranges.cofactor.draw(rng);
    let answer = numbers::gcd(left, right);

    Problem::new(
        format!("What is the greatest common divisor of {left} and {right}?"),
        Answer::Integer(answer),
        format!("{answer} is the largest number that divides both {left} and {right} evenly."),
    )
}

pub fn lcm(rng: &mut dyn RngCore, level: Level) -> Problem {
    let range = bucket(&LCM_TABLE, level);
    let left = range.draw(rng);
    let right = range.draw(rng);
    let answer = numbers::lcm(left, right);

    Problem::new(
        format!("What is the least common multiple of {left} and {right}?"),
        Answer::Integer(answer),
        format!("{answer} is the smallest number that both {left} and {right} divide evenly."),
    )
}

/// Reject-samples a composite in the level range, then factors it by trial
/// division. Exhausted retries fall back to the nearest even number in range,
/// which is composite by construction.
pub fn prime_factorization(rng: &mut dyn RngCore, level: Level) -> Problem {
    let range = bucket(&COMPOSITE_TABLE, level);
    let mut n = range.draw(rng);
    let mut rerolls = 0;
    while (n < 4 || numbers::is_prime(n)) && rerolls < MAX_REROLLS {
        n = range.draw(rng);
        rerolls += 1;
    }
    if n < 4 || numbers::is_prime(n) {
        n = (range.min.max(4) + 1) / 2 * 2;
    }

    let factors = numbers::prime_factors(n);
    let product = factors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" x ");

    Problem::new(
        format!("Write {n} as a product of prime factors."),
        Answer::Factors(factors),
        format!("{n} = {product}."),
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

    /// Independent recursive Euclid used only to cross-check the generator.
    fn reference_gcd(a: i64, b: i64) -> i64 {
        if b == 0 { a.abs() } else { reference_gcd(b, a % b) }
    }

    fn operands_from(question: &str) -> (i64, i64) {
        let numbers: Vec<i64> = question
            .split(|c: char| !c.is_ascii_digit())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse().unwrap())
            .collect();
        assert_eq!(numbers.len(), 2, "expected two operands in {question:?}");
        (numbers[0], numbers[1])
    }

    #[test]
    fn gcd_answers_divide_both_operands() {
        let mut rng = StdRng::seed_from_u64(11);
        for level in [0, 1, 3, 5, 40] {
            for _ in 0..200 {
                let problem = gcd(&mut rng, Level::new(level));
                let (a, b) = operands_from(problem.question());
                let Answer::Integer(answer) = *problem.answer() else {
                    panic!("gcd answer should be an integer");
                };
                assert_eq!(answer, reference_gcd(a, b));
                assert_eq!(a % answer, 0);
                assert_eq!(b % answer, 0);
            }
        }
    }

    #[test]
    fn low_level_gcd_is_never_trivial() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let problem = gcd(&mut rng, Level::new(1));
            let Answer::Integer(answer) = *problem.answer() else {
                panic!("gcd answer should be an integer");
            };
            assert!(answer > 1, "shared factor should force GCD > 1");
        }
    }

    #[test]
    fn lcm_answers_are_common_multiples() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..500 {
            let problem = lcm(&mut rng, Level::new(4));
            let (a, b) = operands_from(problem.question());
            let Answer::Integer(answer) = *problem.answer() else {
                panic!("lcm answer should be an integer");
            };
            assert_eq!(answer % a, 0);
            assert_eq!(answer % b, 0);
            assert_eq!(answer, (a * b) / reference_gcd(a, b));
        }
    }

    #[test]
    fn factorizations_multiply_back_and_are_prime() {
        let mut rng = StdRng::seed_from_u64(17);
        for level in [1, 2, 5, 9] {
            for _ in 0..200 {
                let problem = prime_factorization(&mut rng, Level::new(level));
                let Answer::Factors(factors) = problem.answer() else {
                    panic!("factorization answer should be a factor list");
                };
                assert!(factors.len() >= 2, "a composite has at least two factors");
                assert!(factors.iter().all(|&f| crate::numbers::is_prime(f)));
                let n: i64 = problem
                    .question()
                    .split(|c: char| !c.is_ascii_digit())
                    .find(|p| !p.is_empty())
                    .unwrap()
                    .parse()
                    .unwrap();
                assert_eq!(factors.iter().product::<i64>(), n);
            }
        }
    }

    #[test]
    fn clamped_levels_share_the_first_bucket() {
        // Same seed, same draws: level 0 clamps to level 1.
        let a = gcd(&mut StdRng::seed_from_u64(99), Level::new(0));
        let b = gcd(&mut StdRng::seed_from_u64(99), Level::new(1));
        assert_eq!(a, b);
    }
}
