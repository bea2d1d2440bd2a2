//! Ephemeral per-ringing challenge state.

use super::content::{ContentGenerator, StepContent};
use super::StepKind;
use crate::alarm::ChallengeKind;

/// The ordered, stateful walk through one alarm's challenge steps.
///
/// Invariant: `index` stays within `[0, steps.len())`. Advancing past the
/// last step is reported to the caller, which drops the session; the index
/// never actually reaches the length.
#[derive(Debug, Clone)]
pub struct ChallengeSession {
    steps: &'static [StepKind],
    index: usize,
    content: StepContent,
}

impl ChallengeSession {
    /// Build a session for a challenge kind, index reset to 0.
    ///
    /// Returns None for `ChallengeKind::None`, which has no steps.
    pub fn new(kind: ChallengeKind, generator: &mut ContentGenerator) -> Option<Self> {
        let steps = kind.step_sequence();
        let first = *steps.first()?;
        Some(Self {
            steps,
            index: 0,
            content: generator.content_for(first),
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step(&self) -> StepKind {
        self.steps[self.index]
    }

    /// Content for the current attempt of the current step.
    pub fn content(&self) -> &StepContent {
        &self.content
    }

    /// Whether the current step is the last one.
    pub fn on_last_step(&self) -> bool {
        self.index + 1 == self.steps.len()
    }

    /// Move to the next step with fresh content.
    ///
    /// Callers must check `on_last_step()` first; advancing from the last
    /// step would violate the index invariant.
    pub(super) fn advance(&mut self, generator: &mut ContentGenerator) {
        debug_assert!(!self.on_last_step());
        self.index += 1;
        self.content = generator.content_for(self.current_step());
    }

    /// Regenerate the current step's content after a failed attempt.
    ///
    /// The index is untouched: a failure never moves the user backwards or
    /// forwards.
    pub(super) fn retry(&mut self, generator: &mut ContentGenerator) {
        self.content = generator.content_for(self.current_step());
    }
}
