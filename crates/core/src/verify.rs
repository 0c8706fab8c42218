//! Answer verification.
//!
//! Total over malformed input: anything unparseable is simply a wrong
//! answer, never an error. Whitespace is trimmed and `,` is accepted as a
//! decimal separator before numeric parsing. Empty input is the session
//! layer's concern (reported as "no answer" upstream), but the verifier
//! still returns `false` for it.

use crate::model::{Answer, Fraction};

/// Tolerance for rounded decimal answers.
const DECIMAL_TOLERANCE: f64 = 1e-4;

/// Decides whether `input` matches the canonical answer.
#[must_use]
pub fn check_answer(expected: &Answer, input: &str) -> bool {
    match expected {
        Answer::Integer(value) => check_integer(*value, input),
        Answer::Decimal(value) => check_decimal(*value, input),
        Answer::Power { base, exponent } => check_power(*base, *exponent, input),
        Answer::Fraction(fraction) => check_fraction(*fraction, input),
        Answer::Factors(factors) => check_factors(factors, input),
        Answer::Choice(code) => input.trim().eq_ignore_ascii_case(code),
    }
}

fn normalize_decimal(input: &str) -> String {
    input.trim().replace(',', ".")
}

fn check_integer(value: i64, input: &str) -> bool {
    let normalized = normalize_decimal(input);
    if let Ok(parsed) = normalized.parse::<i64>() {
        return parsed == value;
    }
    // Accept "6.0" style input for integer answers.
    #[allow(clippy::cast_precision_loss)]
    normalized
        .parse::<f64>()
        .is_ok_and(|parsed| (parsed - value as f64).abs() < 1e-9)
}

fn check_decimal(value: f64, input: &str) -> bool {
    normalize_decimal(input)
        .parse::<f64>()
        .is_ok_and(|parsed| (parsed - value).abs() < DECIMAL_TOLERANCE)
}

fn check_power(base: i64, exponent: u32, input: &str) -> bool {
    let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    stripped == format!("{base}^{exponent}")
}

fn check_fraction(expected: Fraction, input: &str) -> bool {
    input
        .parse::<Fraction>()
        .is_ok_and(|given| given.equivalent(expected))
}

/// Order-independent multiset comparison over every integer found in the
/// input, so "2 x 2 x 3", "3*2*2" and "2, 3, 2" all pass for [2, 2, 3].
fn check_factors(expected: &[i64], input: &str) -> bool {
    let mut given = extract_integers(input);
    if given.is_empty() {
        return false;
    }
    given.sort_unstable();
    let mut wanted = expected.to_vec();
    wanted.sort_unstable();
    given == wanted
}

fn extract_integers(input: &str) -> Vec<i64> {
    input
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
