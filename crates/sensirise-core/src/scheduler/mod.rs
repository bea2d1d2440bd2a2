//! Trigger scheduler: decides, once per tick, whether an alarm starts
//! ringing.
//!
//! The check is a level-triggered minute-equality, so the same alarm
//! matches for up to 60 consecutive ticks; the [`TriggerLedger`] is what
//! makes it fire exactly once per local calendar day. Callers poll on a
//! fixed cadence (once per second is sufficient) with whatever local time
//! they observe.

use chrono::{DateTime, Local};

use crate::alarm::{Alarm, AlarmRegistry, TriggerLedger};

/// What one scheduler poll did.
#[derive(Debug, Clone, Default)]
pub struct SchedulerTick {
    /// A local-midnight boundary passed and stale ledger entries were
    /// dropped.
    pub ledger_cleared: bool,
    /// The alarm selected to start ringing, if any.
    pub fired: Option<Alarm>,
}

/// Polls wall-clock time against the registry and owns the trigger ledger.
#[derive(Debug, Default)]
pub struct TriggerScheduler {
    ledger: TriggerLedger,
}

impl TriggerScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &TriggerLedger {
        &self.ledger
    }

    /// One tick.
    ///
    /// While an alarm is already ringing no candidate is selected, even if
    /// several alarms match the current minute; they stay skipped until the
    /// ringing state clears. Among simultaneously due alarms the first in
    /// the registry's stable order wins. An alarm enabled after its minute
    /// already passed today does not retroactively fire, and a minute the
    /// caller never polled through is silently missed for the day.
    pub fn poll(
        &mut self,
        registry: &AlarmRegistry,
        ringing: bool,
        now: DateTime<Local>,
    ) -> SchedulerTick {
        let today = now.date_naive();
        let ledger_cleared = self.ledger.roll_over(today);

        if ringing {
            return SchedulerTick {
                ledger_cleared,
                fired: None,
            };
        }

        let minute = now.time();
        let fired = registry
            .list_enabled()
            .into_iter()
            .find(|alarm| alarm.time.matches(minute) && !self.ledger.has_fired(&alarm.id, today))
            .cloned();

        if let Some(alarm) = &fired {
            self.ledger.record(&alarm.id, today);
        }

        SchedulerTick {
            ledger_cleared,
            fired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::ChallengeKind;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 6, day, hour, minute, second)
            .single()
            .unwrap()
    }

    fn registry_with(times: &[&str]) -> (AlarmRegistry, Vec<String>) {
        let mut reg = AlarmRegistry::new();
        let ids = times
            .iter()
            .map(|t| {
                reg.add(t.parse().unwrap(), format!("alarm {t}"), ChallengeKind::None)
                    .id
            })
            .collect();
        (reg, ids)
    }

    #[test]
    fn fires_on_matching_minute_once() {
        let (reg, ids) = registry_with(&["07:00"]);
        let mut sched = TriggerScheduler::new();

        let tick = sched.poll(&reg, false, at(1, 7, 0, 0));
        assert_eq!(tick.fired.as_ref().map(|a| a.id.as_str()), Some(ids[0].as_str()));

        // Every remaining second of the matching minute: no re-fire.
        for s in 1..60 {
            assert!(sched.poll(&reg, false, at(1, 7, 0, s)).fired.is_none());
        }
    }

    #[test]
    fn no_candidate_is_silent() {
        let (reg, _) = registry_with(&["07:00"]);
        let mut sched = TriggerScheduler::new();
        let tick = sched.poll(&reg, false, at(1, 6, 59, 59));
        assert!(tick.fired.is_none());
        assert!(!tick.ledger_cleared);
    }

    #[test]
    fn ringing_blocks_selection() {
        let (reg, _) = registry_with(&["07:00", "07:00"]);
        let mut sched = TriggerScheduler::new();
        assert!(sched.poll(&reg, false, at(1, 7, 0, 0)).fired.is_some());
        // Second alarm also matches, but something is ringing.
        assert!(sched.poll(&reg, true, at(1, 7, 0, 1)).fired.is_none());
        // Once ringing clears within the same minute, the second fires.
        assert!(sched.poll(&reg, false, at(1, 7, 0, 2)).fired.is_some());
    }

    #[test]
    fn first_match_wins_among_simultaneous_alarms() {
        let (reg, ids) = registry_with(&["07:00", "07:00", "07:00"]);
        let mut sched = TriggerScheduler::new();
        let fired = sched.poll(&reg, false, at(1, 7, 0, 0)).fired.unwrap();
        assert_eq!(fired.id, ids[0]);
    }

    #[test]
    fn disabled_alarms_never_fire() {
        let (mut reg, ids) = registry_with(&["07:00"]);
        reg.toggle_enabled(&ids[0]);
        let mut sched = TriggerScheduler::new();
        assert!(sched.poll(&reg, false, at(1, 7, 0, 0)).fired.is_none());
    }

    #[test]
    fn no_retroactive_fire_after_minute_passed() {
        let mut reg = AlarmRegistry::new();
        let mut sched = TriggerScheduler::new();
        // Polling starts after 07:00 has passed.
        assert!(sched.poll(&reg, false, at(1, 8, 0, 0)).fired.is_none());
        reg.add("07:00".parse().unwrap(), "late".into(), ChallengeKind::None);
        assert!(sched.poll(&reg, false, at(1, 8, 0, 1)).fired.is_none());
        // It fires the following day.
        let tick = sched.poll(&reg, false, at(2, 7, 0, 0));
        assert!(tick.fired.is_some());
    }

    #[test]
    fn ledger_clears_at_midnight_and_alarm_refires() {
        let (reg, _) = registry_with(&["07:00"]);
        let mut sched = TriggerScheduler::new();
        assert!(sched.poll(&reg, false, at(1, 7, 0, 0)).fired.is_some());

        let tick = sched.poll(&reg, false, at(2, 0, 0, 0));
        assert!(tick.ledger_cleared);
        assert!(tick.fired.is_none());

        assert!(sched.poll(&reg, false, at(2, 7, 0, 0)).fired.is_some());
    }

    #[test]
    fn skipped_minute_is_missed_for_the_day() {
        let (reg, _) = registry_with(&["07:00"]);
        let mut sched = TriggerScheduler::new();
        assert!(sched.poll(&reg, false, at(1, 6, 59, 0)).fired.is_none());
        // Process suspended across the whole trigger minute.
        assert!(sched.poll(&reg, false, at(1, 7, 1, 0)).fired.is_none());
    }

    proptest! {
        // At-most-once-per-day even when every second of the matching
        // minute is observed.
        #[test]
        fn at_most_once_per_day(hour in 0u32..24, minute in 0u32..60) {
            let time = format!("{hour:02}:{minute:02}");
            let (reg, _) = registry_with(&[time.as_str()]);
            let mut sched = TriggerScheduler::new();
            let mut firings = 0;
            for second in 0..60 {
                if sched.poll(&reg, false, at(1, hour, minute, second)).fired.is_some() {
                    firings += 1;
                }
            }
            prop_assert_eq!(firings, 1);
        }
    }
}
