use serde::{Deserialize, Serialize};

use crate::model::Answer;

/// Structured hint a front-end may render alongside the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VisualAid {
    /// Numbered option labels for multiple-choice problems.
    Choices(Vec<String>),
}

/// One generated exercise instance.
///
/// Produced by a generator, immutable afterwards, and discarded when the
/// next problem is generated or the session ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    question: String,
    answer: Answer,
    explanation: String,
    visual: Option<VisualAid>,
}

impl Problem {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: Answer, explanation: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer,
            explanation: explanation.into(),
            visual: None,
        }
    }

    #[must_use]
    pub fn with_visual(mut self, visual: VisualAid) -> Self {
        self.visual = Some(visual);
        self
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn visual(&self) -> Option<&VisualAid> {
        self.visual.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_carries_all_parts() {
        let problem = Problem::new("2 + 2?", Answer::Integer(4), "Count on your fingers.")
            .with_visual(VisualAid::Choices(vec!["3".into(), "4".into()]));

        assert_eq!(problem.question(), "2 + 2?");
        assert_eq!(problem.answer(), &Answer::Integer(4));
        assert_eq!(problem.explanation(), "Count on your fingers.");
        assert!(matches!(
            problem.visual(),
            Some(VisualAid::Choices(options)) if options.len() == 2
        ));
    }
}
