use std::collections::BTreeMap;
use std::fmt;

use rand::RngCore;
use thiserror::Error;

use crate::generate;
use crate::model::{ExerciseKind, Level, Problem};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("no generator registered for exercise kind: {0}")]
    UnknownExercise(ExerciseKind),
}

//
// ─── DEFINITION ────────────────────────────────────────────────────────────────
//

/// Signature shared by every problem generator.
pub type GeneratorFn = fn(&mut dyn RngCore, Level) -> Problem;

/// One catalog entry: an exercise kind and its generator.
///
/// Verification needs no per-kind entry: the comparison rule travels with
/// the generated [`crate::model::Answer`] variant.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseDefinition {
    kind: ExerciseKind,
    generate: GeneratorFn,
}

impl ExerciseDefinition {
    #[must_use]
    pub fn new(kind: ExerciseKind, generate: GeneratorFn) -> Self {
        Self { kind, generate }
    }

    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    /// Draws one problem at the given level.
    pub fn generate(&self, rng: &mut dyn RngCore, level: Level) -> Problem {
        (self.generate)(rng, level)
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Immutable registry mapping exercise kinds to their generators.
///
/// Built once and injected into the session orchestrator; a lookup miss is a
/// configuration error, not a user mistake.
#[derive(Clone)]
pub struct Catalog {
    definitions: BTreeMap<ExerciseKind, ExerciseDefinition>,
}

impl Catalog {
    /// The full built-in exercise set.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_definitions([
            ExerciseDefinition::new(ExerciseKind::Gcd, generate::gcd),
            ExerciseDefinition::new(ExerciseKind::Lcm, generate::lcm),
            ExerciseDefinition::new(
                ExerciseKind::PrimeFactorization,
                generate::prime_factorization,
            ),
            ExerciseDefinition::new(ExerciseKind::Powers, generate::powers),
            ExerciseDefinition::new(ExerciseKind::FractionDecimal, generate::fraction_decimal),
            ExerciseDefinition::new(ExerciseKind::Fractions, generate::fractions),
            ExerciseDefinition::new(
                ExerciseKind::IrreducibleFractions,
                generate::irreducible_fractions,
            ),
        ])
    }

    #[must_use]
    pub fn with_definitions(definitions: impl IntoIterator<Item = ExerciseDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|definition| (definition.kind(), definition))
                .collect(),
        }
    }

    /// Looks up the definition for a kind.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownExercise` if the kind is not registered.
    pub fn definition(&self, kind: ExerciseKind) -> Result<&ExerciseDefinition, CatalogError> {
        self.definitions
            .get(&kind)
            .ok_or(CatalogError::UnknownExercise(kind))
    }

    /// Registered kinds in stable (code) order.
    pub fn kinds(&self) -> impl Iterator<Item = ExerciseKind> + '_ {
        self.definitions.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("kinds", &self.definitions.keys().collect::<Vec<_>>())
            .finish()
    }
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
    fn standard_catalog_covers_every_kind() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), ExerciseKind::ALL.len());
        for kind in ExerciseKind::ALL {
            assert_eq!(catalog.definition(kind).unwrap().kind(), kind);
        }
    }

    #[test]
    fn missing_kind_is_a_configuration_error() {
        let catalog =
            Catalog::with_definitions([ExerciseDefinition::new(ExerciseKind::Gcd, generate::gcd)]);
        let err = catalog.definition(ExerciseKind::Fractions).unwrap_err();
        assert_eq!(err, CatalogError::UnknownExercise(ExerciseKind::Fractions));
    }

    #[test]
    fn every_standard_generator_produces_checkable_problems() {
        let catalog = Catalog::standard();
        let mut rng = StdRng::seed_from_u64(61);
        for kind in ExerciseKind::ALL {
            let definition = catalog.definition(kind).unwrap();
            for level in [0, 1, 4, 12] {
                let problem = definition.generate(&mut rng, Level::new(level));
                assert!(!problem.question().is_empty());
                assert!(!problem.explanation().is_empty());
                // The canonical rendering of the answer must verify against itself.
                assert!(
                    crate::verify::check_answer(problem.answer(), &problem.answer().to_string()),
                    "{kind}: canonical answer failed its own check: {problem:?}"
                );
            }
        }
    }
}
