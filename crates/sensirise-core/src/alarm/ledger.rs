//! Per-day trigger de-duplication.
//!
//! The scheduler compares alarm times at minute granularity on every tick,
//! so a matching alarm is observed for up to 60 consecutive ticks. The
//! ledger, not timing precision, is what makes it fire exactly once.

use std::collections::HashSet;

use chrono::NaiveDate;

/// Records which alarms have already fired on which local calendar day.
///
/// Entries older than the day currently being observed are dropped on the
/// first tick after the local-midnight boundary.
#[derive(Debug, Default, Clone)]
pub struct TriggerLedger {
    fired: HashSet<(String, NaiveDate)>,
    observed_day: Option<NaiveDate>,
}

impl TriggerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the observed local day, clearing stale entries.
    ///
    /// Returns true when a day boundary was crossed and entries were
    /// actually dropped. No timezone normalization: whatever local date the
    /// caller observes is the day.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        let crossed = self.observed_day.is_some_and(|d| d != today);
        self.observed_day = Some(today);
        if crossed && !self.fired.is_empty() {
            self.fired.clear();
            return true;
        }
        false
    }

    /// Mark an alarm as fired for the given day.
    pub fn record(&mut self, alarm_id: &str, day: NaiveDate) {
        self.fired.insert((alarm_id.to_string(), day));
    }

    pub fn has_fired(&self, alarm_id: &str, day: NaiveDate) -> bool {
        self.fired.contains(&(alarm_id.to_string(), day))
    }

    pub fn len(&self) -> usize {
        self.fired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn record_then_query() {
        let mut ledger = TriggerLedger::new();
        ledger.record("a", day(1));
        assert!(ledger.has_fired("a", day(1)));
        assert!(!ledger.has_fired("a", day(2)));
        assert!(!ledger.has_fired("b", day(1)));
    }

    #[test]
    fn roll_over_clears_on_new_day_only() {
        let mut ledger = TriggerLedger::new();
        assert!(!ledger.roll_over(day(1)));
        ledger.record("a", day(1));
        // Same day again: nothing to clear.
        assert!(!ledger.roll_over(day(1)));
        assert_eq!(ledger.len(), 1);
        // Midnight passed.
        assert!(ledger.roll_over(day(2)));
        assert!(ledger.is_empty());
        // Re-arms for the following midnight.
        ledger.record("a", day(2));
        assert!(ledger.roll_over(day(3)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn roll_over_with_empty_ledger_reports_nothing() {
        let mut ledger = TriggerLedger::new();
        ledger.roll_over(day(1));
        assert!(!ledger.roll_over(day(2)));
    }
}
