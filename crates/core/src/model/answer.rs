use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Fraction;

/// Canonical answer to a generated problem.
///
/// Each variant carries its own comparison rule (see `crate::verify`), so a
/// generator cannot pair a payload with the wrong check the way a detached
/// tag could.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Answer {
    /// Exact integer equality.
    Integer(i64),
    /// Numeric equality within `1e-4`, for rounded decimal answers.
    Decimal(f64),
    /// Power notation `base^exponent`, compared as whitespace-stripped text.
    Power { base: i64, exponent: u32 },
    /// Cross-multiplication equivalence; any equivalent form is accepted.
    Fraction(Fraction),
    /// Multiset of prime factors, compared order-independently.
    Factors(Vec<i64>),
    /// Short option code such as `1`, `2`, `3`, `>`, `<` or `=`.
    Choice(String),
}

impl Answer {
    #[must_use]
    pub fn choice(code: impl Into<String>) -> Self {
        Self::Choice(code.into())
    }
}

impl fmt::Display for Answer {
    /// Renders the canonical form shown to the user after a wrong answer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Integer(value) => write!(f, "{value}"),
            Answer::Decimal(value) => write!(f, "{value:.2}"),
            Answer::Power { base, exponent } => write!(f, "{base}^{exponent}"),
            Answer::Fraction(fraction) => write!(f, "{fraction}"),
            Answer::Factors(factors) => {
                let rendered: Vec<String> = factors.iter().map(ToString::to_string).collect();
                f.write_str(&rendered.join(" x "))
            }
            Answer::Choice(code) => f.write_str(code),
        }
    }
}
