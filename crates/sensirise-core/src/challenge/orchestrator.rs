//! Drives a ringing alarm's challenge session to completion.
//!
//! The orchestrator never generates verdicts itself: classifiers and the
//! math form live outside and report pass/fail material through
//! [`StepVerdict`]. A failed or inconclusive attempt regenerates the current
//! step's content and leaves the index alone; passing the last step is the
//! only path to completion.

use serde::{Deserialize, Serialize};

use super::content::{ContentGenerator, Gesture, RoundOutcome, StepContent};
use super::session::ChallengeSession;
use super::StepKind;
use crate::alarm::ChallengeKind;

/// Verified material for the active step, as reported by the UI layer or a
/// classifier collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepVerdict {
    /// Gesture category detected in the user's camera frame.
    Gesture(Gesture),
    /// Answer the user typed for the math problem.
    Answer(i64),
    /// Whether the object classifier saw the target object.
    ObjectSeen(bool),
    /// Whether the face classifier judged the subject awake.
    Awake(bool),
    /// Classifier unreachable or errored; treated like a failed attempt.
    Inconclusive,
}

/// Why a step attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// App gesture beat the user's.
    Lost,
    /// Same gesture on both sides; nobody wins, retry.
    Draw,
    WrongAnswer,
    ObjectNotFound,
    NotAwake,
    Inconclusive,
}

/// What a submitted verdict did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The current step passed and a next step is active.
    Advanced {
        passed_index: usize,
        passed: StepKind,
        next_index: usize,
        next: StepKind,
    },
    /// The last step passed; the session is finished and discarded.
    Completed {
        passed_index: usize,
        passed: StepKind,
    },
    /// The attempt failed; same step, fresh content.
    Rejected {
        index: usize,
        step: StepKind,
        reason: RejectReason,
    },
}

/// Challenge state machine for the currently ringing alarm.
pub struct ChallengeOrchestrator {
    generator: ContentGenerator,
    session: Option<ChallengeSession>,
}

impl ChallengeOrchestrator {
    pub fn new(generator: ContentGenerator) -> Self {
        Self {
            generator,
            session: None,
        }
    }

    /// Start a session for a newly ringing alarm.
    ///
    /// `ChallengeKind::None` leaves the orchestrator idle; the engine
    /// handles the dismiss-without-verification path directly.
    pub fn begin(&mut self, kind: ChallengeKind) {
        self.session = ChallengeSession::new(kind, &mut self.generator);
    }

    /// Drop the session without completing it.
    pub fn abort(&mut self) {
        self.session = None;
    }

    pub fn session(&self) -> Option<&ChallengeSession> {
        self.session.as_ref()
    }

    /// Feed one verdict into the state machine.
    ///
    /// Returns None when there is no active session or the verdict does not
    /// belong to the current step kind (a late result from an already
    /// replaced step); such verdicts are ignored entirely.
    pub fn submit(&mut self, verdict: StepVerdict) -> Option<StepOutcome> {
        let session = self.session.as_mut()?;
        let index = session.index();
        let step = session.current_step();

        let reject = match judge(session.content(), verdict)? {
            Ok(()) => None,
            Err(reason) => Some(reason),
        };

        if let Some(reason) = reject {
            session.retry(&mut self.generator);
            return Some(StepOutcome::Rejected {
                index,
                step,
                reason,
            });
        }

        if session.on_last_step() {
            self.session = None;
            return Some(StepOutcome::Completed {
                passed_index: index,
                passed: step,
            });
        }

        session.advance(&mut self.generator);
        let session = self.session.as_ref()?;
        Some(StepOutcome::Advanced {
            passed_index: index,
            passed: step,
            next_index: session.index(),
            next: session.current_step(),
        })
    }
}

/// Pass/fail decision for one attempt. None means the verdict kind does not
/// match the active step and must be ignored.
fn judge(content: &StepContent, verdict: StepVerdict) -> Option<Result<(), RejectReason>> {
    if matches!(verdict, StepVerdict::Inconclusive) {
        return Some(Err(RejectReason::Inconclusive));
    }
    let result = match (content, verdict) {
        (StepContent::Rps { app_gesture }, StepVerdict::Gesture(user)) => {
            match user.play_against(*app_gesture) {
                RoundOutcome::Win => Ok(()),
                RoundOutcome::Lose => Err(RejectReason::Lost),
                RoundOutcome::Draw => Err(RejectReason::Draw),
            }
        }
        (StepContent::Math { problem }, StepVerdict::Answer(answer)) => {
            if problem.check(answer) {
                Ok(())
            } else {
                Err(RejectReason::WrongAnswer)
            }
        }
        (StepContent::Object { .. }, StepVerdict::ObjectSeen(found)) => {
            if found {
                Ok(())
            } else {
                Err(RejectReason::ObjectNotFound)
            }
        }
        (StepContent::Face, StepVerdict::Awake(awake)) => {
            if awake {
                Ok(())
            } else {
                Err(RejectReason::NotAwake)
            }
        }
        _ => return None,
    };
    Some(result)
}
