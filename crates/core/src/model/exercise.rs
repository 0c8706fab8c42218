use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one generator/verifier pair in the catalog.
///
/// The string code is the persistence key for per-kind level progression,
/// so it must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    Gcd,
    Lcm,
    PrimeFactorization,
    Powers,
    FractionDecimal,
    Fractions,
    IrreducibleFractions,
}

impl ExerciseKind {
    /// All kinds, in menu order.
    pub const ALL: [ExerciseKind; 7] = [
        ExerciseKind::Gcd,
        ExerciseKind::Lcm,
        ExerciseKind::PrimeFactorization,
        ExerciseKind::Powers,
        ExerciseKind::FractionDecimal,
        ExerciseKind::Fractions,
        ExerciseKind::IrreducibleFractions,
    ];

    /// Stable string code used as the persistence key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseKind::Gcd => "gcd",
            ExerciseKind::Lcm => "lcm",
            ExerciseKind::PrimeFactorization => "prime-factorization",
            ExerciseKind::Powers => "powers",
            ExerciseKind::FractionDecimal => "fraction-decimal",
            ExerciseKind::Fractions => "fractions",
            ExerciseKind::IrreducibleFractions => "irreducible-fractions",
        }
    }

    /// Human-readable name for menus and round banners.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ExerciseKind::Gcd => "Greatest common divisor",
            ExerciseKind::Lcm => "Least common multiple",
            ExerciseKind::PrimeFactorization => "Prime factorization",
            ExerciseKind::Powers => "Power laws",
            ExerciseKind::FractionDecimal => "Fractions as decimals",
            ExerciseKind::Fractions => "Fraction arithmetic",
            ExerciseKind::IrreducibleFractions => "Irreducible fractions",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing an exercise kind from its string code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseExerciseKindError {
    raw: String,
}

impl fmt::Display for ParseExerciseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown exercise kind: {}", self.raw)
    }
}

impl std::error::Error for ParseExerciseKindError {}

impl FromStr for ExerciseKind {
    type Err = ParseExerciseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExerciseKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseExerciseKindError { raw: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in ExerciseKind::ALL {
            let parsed: ExerciseKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "long-division".parse::<ExerciseKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown exercise kind: long-division");
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = ExerciseKind::ALL.iter().map(|k| k.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ExerciseKind::ALL.len());
    }
}
