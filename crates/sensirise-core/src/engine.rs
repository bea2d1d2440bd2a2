//! Engine facade composing registry, scheduler and orchestrator.
//!
//! The engine is wall-clock driven and has no internal threads: the caller
//! invokes `tick()` on a fixed cadence (once per second is enough, since
//! alarm comparison is minute-granular) and feeds challenge verdicts back
//! as they arrive. Everything runs single-threaded with run-to-completion
//! semantics, so no locking is involved anywhere.
//!
//! ```ignore
//! let mut engine = AlarmEngine::new();
//! engine.registry_mut().add("07:00".parse()?, "Weekday".into(), ChallengeKind::Math);
//! // In a loop:
//! for event in engine.tick() { /* render */ }
//! // When the user answers:
//! engine.submit(StepVerdict::Answer(42));
//! ```

use chrono::{DateTime, Local, Utc};

use crate::alarm::{Alarm, AlarmRegistry, ChallengeKind, TriggerLedger};
use crate::challenge::{
    ChallengeOrchestrator, ChallengeSession, ContentGenerator, StepOutcome, StepVerdict,
};
use crate::events::Event;
use crate::scheduler::TriggerScheduler;

/// Top-level wake-up assistant state machine.
pub struct AlarmEngine {
    registry: AlarmRegistry,
    scheduler: TriggerScheduler,
    orchestrator: ChallengeOrchestrator,
    /// At most one currently ringing alarm.
    ringing: Option<Alarm>,
}

impl AlarmEngine {
    /// Engine with entropy-seeded challenge content.
    pub fn new() -> Self {
        Self::with_generator(ContentGenerator::new())
    }

    /// Engine with reproducible challenge content.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(ContentGenerator::seeded(seed))
    }

    fn with_generator(generator: ContentGenerator) -> Self {
        Self {
            registry: AlarmRegistry::new(),
            scheduler: TriggerScheduler::new(),
            orchestrator: ChallengeOrchestrator::new(generator),
            ringing: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn registry(&self) -> &AlarmRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut AlarmRegistry {
        &mut self.registry
    }

    pub fn ledger(&self) -> &TriggerLedger {
        self.scheduler.ledger()
    }

    /// The currently ringing alarm, if any.
    pub fn ringing(&self) -> Option<&Alarm> {
        self.ringing.as_ref()
    }

    /// The active challenge session (None while idle or for a ringing
    /// no-challenge alarm).
    pub fn session(&self) -> Option<&ChallengeSession> {
        self.orchestrator.session()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let session = self.orchestrator.session();
        Event::StateSnapshot {
            ringing_alarm_id: self.ringing.as_ref().map(|a| a.id.clone()),
            challenge: self.ringing.as_ref().map(|a| a.challenge),
            step_index: session.map(|s| s.index()),
            step_count: session.map(|s| s.step_count()),
            enabled_alarms: self.registry.list_enabled().len(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// One tick against the real wall clock.
    pub fn tick(&mut self) -> Vec<Event> {
        self.tick_at(Local::now())
    }

    /// One tick at an explicit local time. Ticks must be fed in wall-clock
    /// order.
    pub fn tick_at(&mut self, now: DateTime<Local>) -> Vec<Event> {
        let mut events = Vec::new();
        let tick = self
            .scheduler
            .poll(&self.registry, self.ringing.is_some(), now);

        if tick.ledger_cleared {
            events.push(Event::LedgerCleared {
                day: now.date_naive(),
                at: Utc::now(),
            });
        }

        if let Some(alarm) = tick.fired {
            self.orchestrator.begin(alarm.challenge);
            events.push(Event::AlarmTriggered {
                alarm_id: alarm.id.clone(),
                label: alarm.label.clone(),
                time: alarm.time,
                challenge: alarm.challenge,
                steps: alarm.challenge.step_sequence().len(),
                at: Utc::now(),
            });
            self.ringing = Some(alarm);
        }

        events
    }

    /// Feed one challenge verdict into the orchestrator.
    ///
    /// Returns the resulting events; empty when nothing is ringing or the
    /// verdict was stale for the active step (late classifier results after
    /// a dismiss land here and are dropped).
    pub fn submit(&mut self, verdict: StepVerdict) -> Vec<Event> {
        let Some(alarm_id) = self.ringing.as_ref().map(|a| a.id.clone()) else {
            return Vec::new();
        };
        let Some(outcome) = self.orchestrator.submit(verdict) else {
            return Vec::new();
        };

        match outcome {
            StepOutcome::Advanced {
                passed_index,
                passed,
                ..
            } => vec![Event::StepPassed {
                step_index: passed_index,
                step: passed,
                at: Utc::now(),
            }],
            StepOutcome::Completed {
                passed_index,
                passed,
            } => {
                let mut events = vec![Event::StepPassed {
                    step_index: passed_index,
                    step: passed,
                    at: Utc::now(),
                }];
                events.push(self.disarm(&alarm_id));
                events
            }
            StepOutcome::Rejected {
                index,
                step,
                reason,
            } => vec![Event::StepRejected {
                step_index: index,
                step,
                reason,
                at: Utc::now(),
            }],
        }
    }

    /// Dismiss a ringing no-challenge alarm.
    ///
    /// Only `ChallengeKind::None` can be dismissed without verification;
    /// for anything else this is ignored.
    pub fn dismiss(&mut self) -> Option<Event> {
        let alarm_id = match &self.ringing {
            Some(alarm) if alarm.challenge == ChallengeKind::None => alarm.id.clone(),
            _ => return None,
        };
        Some(self.disarm(&alarm_id))
    }

    /// Clear the ringing state and auto-disable the alarm that just rang.
    fn disarm(&mut self, alarm_id: &str) -> Event {
        self.registry.set_enabled(alarm_id, false);
        self.orchestrator.abort();
        self.ringing = None;
        Event::AlarmDisarmed {
            alarm_id: alarm_id.to_string(),
            at: Utc::now(),
        }
    }
}

impl Default for AlarmEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, 1, hour, minute, second)
            .single()
            .unwrap()
    }

    #[test]
    fn none_challenge_rings_until_dismissed() {
        let mut engine = AlarmEngine::with_seed(1);
        engine
            .registry_mut()
            .add("07:00".parse().unwrap(), "plain".into(), ChallengeKind::None);

        let events = engine.tick_at(at(7, 0, 0));
        assert!(matches!(events.as_slice(), [Event::AlarmTriggered { steps: 0, .. }]));
        assert!(engine.ringing().is_some());
        assert!(engine.session().is_none());

        let disarm = engine.dismiss().unwrap();
        assert!(matches!(disarm, Event::AlarmDisarmed { .. }));
        assert!(engine.ringing().is_none());
    }

    #[test]
    fn dismiss_needs_a_ringing_none_alarm() {
        let mut engine = AlarmEngine::with_seed(1);
        assert!(engine.dismiss().is_none());
        engine
            .registry_mut()
            .add("07:00".parse().unwrap(), "math".into(), ChallengeKind::Math);
        engine.tick_at(at(7, 0, 0));
        // A math alarm cannot be waved away.
        assert!(engine.dismiss().is_none());
        assert!(engine.ringing().is_some());
    }

    #[test]
    fn late_verdict_after_disarm_is_dropped() {
        let mut engine = AlarmEngine::with_seed(1);
        engine
            .registry_mut()
            .add("07:00".parse().unwrap(), "plain".into(), ChallengeKind::None);
        engine.tick_at(at(7, 0, 0));
        engine.dismiss().unwrap();
        assert!(engine.submit(StepVerdict::Awake(true)).is_empty());
    }

    #[test]
    fn snapshot_reflects_ringing_state() {
        let mut engine = AlarmEngine::with_seed(1);
        engine
            .registry_mut()
            .add("07:00".parse().unwrap(), "g".into(), ChallengeKind::Gauntlet);

        match engine.snapshot() {
            Event::StateSnapshot {
                ringing_alarm_id,
                enabled_alarms,
                ..
            } => {
                assert!(ringing_alarm_id.is_none());
                assert_eq!(enabled_alarms, 1);
            }
            other => panic!("expected snapshot, got {other:?}"),
        }

        engine.tick_at(at(7, 0, 0));
        match engine.snapshot() {
            Event::StateSnapshot {
                ringing_alarm_id,
                step_index,
                step_count,
                ..
            } => {
                assert!(ringing_alarm_id.is_some());
                assert_eq!(step_index, Some(0));
                assert_eq!(step_count, Some(4));
            }
            other => panic!("expected snapshot, got {other:?}"),
        }
    }
}
