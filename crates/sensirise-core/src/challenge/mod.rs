//! Deactivation challenges: step sequences, content, orchestration.

pub mod content;
pub mod orchestrator;
pub mod session;

pub use content::{
    ContentGenerator, Gesture, MathOp, MathProblem, RoundOutcome, StepContent, OBJECT_TARGETS,
};
pub use orchestrator::{ChallengeOrchestrator, RejectReason, StepOutcome, StepVerdict};
pub use session::ChallengeSession;

use serde::{Deserialize, Serialize};

use crate::alarm::ChallengeKind;

/// One verifiable task inside a challenge session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Rps,
    Object,
    Math,
    Face,
}

impl ChallengeKind {
    /// The ordered step sequence this challenge kind expands to.
    ///
    /// Empty for `None`, which bypasses the session machinery entirely.
    pub fn step_sequence(self) -> &'static [StepKind] {
        match self {
            ChallengeKind::None => &[],
            ChallengeKind::Rps => &[StepKind::Rps],
            ChallengeKind::Math => &[StepKind::Math],
            ChallengeKind::Face => &[StepKind::Face],
            ChallengeKind::Object => &[StepKind::Object],
            ChallengeKind::Gauntlet => &[
                StepKind::Rps,
                StepKind::Object,
                StepKind::Math,
                StepKind::Face,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_kinds_expand_to_one_step() {
        assert_eq!(ChallengeKind::Math.step_sequence(), &[StepKind::Math]);
        assert_eq!(ChallengeKind::Rps.step_sequence(), &[StepKind::Rps]);
    }

    #[test]
    fn gauntlet_is_the_fixed_four_step_sequence() {
        assert_eq!(
            ChallengeKind::Gauntlet.step_sequence(),
            &[
                StepKind::Rps,
                StepKind::Object,
                StepKind::Math,
                StepKind::Face
            ]
        );
    }

    #[test]
    fn none_has_no_steps() {
        assert!(ChallengeKind::None.step_sequence().is_empty());
    }
}
