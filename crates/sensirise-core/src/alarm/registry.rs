//! Sole owner of alarm records.
//!
//! All mutations are synchronous and immediately visible to subsequent
//! reads. Insertion order is preserved so that the scheduler's first-match
//! tie-break is deterministic.

use uuid::Uuid;

use super::{Alarm, AlarmTime, ChallengeKind};

/// In-memory collection of alarm records.
#[derive(Debug, Default, Clone)]
pub struct AlarmRegistry {
    alarms: Vec<Alarm>,
}

impl AlarmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an alarm with a fresh unique id, enabled by default.
    pub fn add(&mut self, time: AlarmTime, label: String, challenge: ChallengeKind) -> Alarm {
        let alarm = Alarm {
            id: Uuid::new_v4().to_string(),
            time,
            label,
            enabled: true,
            challenge,
        };
        self.alarms.push(alarm.clone());
        alarm
    }

    /// Replace the stored record matching `alarm.id`.
    ///
    /// Returns false (no-op) when the id is absent.
    pub fn update(&mut self, alarm: Alarm) -> bool {
        match self.alarms.iter_mut().find(|a| a.id == alarm.id) {
            Some(slot) => {
                *slot = alarm;
                true
            }
            None => false,
        }
    }

    /// Remove the record. Idempotent.
    pub fn delete(&mut self, id: &str) {
        self.alarms.retain(|a| a.id != id);
    }

    /// Flip `enabled` on the matching record. Returns false when absent.
    pub fn toggle_enabled(&mut self, id: &str) -> bool {
        match self.alarms.iter_mut().find(|a| a.id == id) {
            Some(alarm) => {
                alarm.enabled = !alarm.enabled;
                true
            }
            None => false,
        }
    }

    /// Set `enabled` on the matching record. Returns false when absent.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.alarms.iter_mut().find(|a| a.id == id) {
            Some(alarm) => {
                alarm.enabled = enabled;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Alarm> {
        self.alarms.iter().find(|a| a.id == id)
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[Alarm] {
        &self.alarms
    }

    /// Enabled alarms sorted by time ascending, ties broken by insertion
    /// order. This is the scheduler's iteration order.
    pub fn list_enabled(&self) -> Vec<&Alarm> {
        let mut enabled: Vec<&Alarm> = self.alarms.iter().filter(|a| a.enabled).collect();
        // Vec::sort_by_key is stable, which is what keeps the tie-break.
        enabled.sort_by_key(|a| a.time);
        enabled
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }
}
