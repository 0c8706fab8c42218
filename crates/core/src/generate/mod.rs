//! Problem generators, one per exercise kind.
//!
//! Each generator is a pure function over an injected random source: given a
//! difficulty level it picks a bucket from its scaling table, draws one
//! instance and returns a fully formed [`Problem`](crate::model::Problem).
//! Rejection-sampling loops are retry-capped and fall back to a direct
//! construction so generation always terminates.

mod fractions;
mod irreducible;
mod number_theory;
mod powers;

pub use fractions::{fraction_decimal, fractions};
pub use irreducible::irreducible_fractions;
pub use number_theory::{gcd, lcm, prime_factorization};
pub use powers::powers;

use crate::model::Fraction;

/// Upper bound on rejection-sampling retries before the constructive fallback.
pub(crate) const MAX_REROLLS: u32 = 32;

/// Builds a fraction from generator-controlled terms.
///
/// # Panics
///
/// Panics if `den` is zero; the scaling tables never produce one.
pub(crate) fn frac(num: i64, den: i64) -> Fraction {
    Fraction::new(num, den).expect("generator denominators are non-zero")
}
