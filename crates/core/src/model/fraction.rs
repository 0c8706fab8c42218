use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::numbers::gcd;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FractionError {
    #[error("denominator must not be zero")]
    ZeroDenominator,

    #[error("cannot divide by a fraction with numerator zero")]
    ZeroDivisor,

    #[error("not a valid fraction: {raw}")]
    Malformed { raw: String },
}

//
// ─── FRACTION ──────────────────────────────────────────────────────────────────
//

/// A rational number `num/den` with a non-zero denominator.
///
/// The pair is *not* kept reduced: reduction happens only when a caller
/// explicitly asks for it via [`Fraction::reduced`]. Equivalence between two
/// fractions is cross-multiplication (`2/4` is equivalent to `1/2`),
/// independent of reduced form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fraction {
    num: i64,
    den: i64,
}

impl Fraction {
    /// Creates a fraction.
    ///
    /// # Errors
    ///
    /// Returns `FractionError::ZeroDenominator` if `den` is zero.
    pub fn new(num: i64, den: i64) -> Result<Self, FractionError> {
        if den == 0 {
            return Err(FractionError::ZeroDenominator);
        }
        Ok(Self { num, den })
    }

    #[must_use]
    pub fn num(self) -> i64 {
        self.num
    }

    #[must_use]
    pub fn den(self) -> i64 {
        self.den
    }

    /// The fraction reduced by the GCD of its terms, denominator positive.
    #[must_use]
    pub fn reduced(self) -> Self {
        let divisor = gcd(self.num, self.den);
        let (mut num, mut den) = if divisor == 0 {
            (self.num, self.den)
        } else {
            (self.num / divisor, self.den / divisor)
        };
        if den < 0 {
            num = -num;
            den = -den;
        }
        Self { num, den }
    }

    /// True if numerator and denominator share no factor greater than 1.
    #[must_use]
    pub fn is_irreducible(self) -> bool {
        gcd(self.num, self.den) == 1
    }

    /// Cross-multiplication equivalence: `a/b == c/d` iff `a*d == b*c`.
    #[must_use]
    pub fn equivalent(self, other: Self) -> bool {
        i128::from(self.num) * i128::from(other.den) == i128::from(self.den) * i128::from(other.num)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Sum by cross multiplication; the result is not reduced.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self {
            num: self.num * other.den + other.num * self.den,
            den: self.den * other.den,
        }
    }

    /// Difference by cross multiplication; the result is not reduced.
    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self {
            num: self.num * other.den - other.num * self.den,
            den: self.den * other.den,
        }
    }

    /// Product; the result is not reduced.
    #[must_use]
    pub fn mul(self, other: Self) -> Self {
        Self {
            num: self.num * other.num,
            den: self.den * other.den,
        }
    }

    /// Quotient via the reciprocal of `other`; the result is not reduced.
    ///
    /// # Errors
    ///
    /// Returns `FractionError::ZeroDivisor` if `other` has numerator zero.
    pub fn div(self, other: Self) -> Result<Self, FractionError> {
        if other.num == 0 {
            return Err(FractionError::ZeroDivisor);
        }
        Ok(Self {
            num: self.num * other.den,
            den: self.den * other.num,
        })
    }

    /// Magnitude comparison without floating point.
    #[must_use]
    pub fn compare(self, other: Self) -> Ordering {
        let mut lhs = i128::from(self.num) * i128::from(other.den);
        let mut rhs = i128::from(other.num) * i128::from(self.den);
        // Cross products flip with each negative denominator.
        if self.den < 0 {
            std::mem::swap(&mut lhs, &mut rhs);
        }
        if other.den < 0 {
            std::mem::swap(&mut lhs, &mut rhs);
        }
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    /// Parses `a/b`, tolerating spaces around the slash and at the ends.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || FractionError::Malformed { raw: s.to_string() };
        let (num_part, den_part) = s.trim().split_once('/').ok_or_else(malformed)?;
        let num: i64 = num_part.trim().parse().map_err(|_| malformed())?;
        let den: i64 = den_part.trim().parse().map_err(|_| malformed())?;
        Self::new(num, den)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
