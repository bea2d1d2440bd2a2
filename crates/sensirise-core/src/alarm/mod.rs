//! Alarm records and their owning registry.

pub mod ledger;
pub mod registry;

pub use ledger::TriggerLedger;
pub use registry::AlarmRegistry;

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Wall-clock time of day for an alarm, minute granularity.
///
/// No date or timezone component; two alarms at "07:00" are equal no matter
/// what day they fire on. Serialized as a 24-hour `"HH:MM"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AlarmTime {
    hour: u8,
    minute: u8,
}

impl AlarmTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::HourOutOfRange { hour });
        }
        if minute > 59 {
            return Err(ValidationError::MinuteOutOfRange { minute });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minute-granularity equality against a wall-clock time.
    pub fn matches(&self, now: NaiveTime) -> bool {
        u32::from(self.hour) == now.hour() && u32::from(self.minute) == now.minute()
    }
}

impl fmt::Display for AlarmTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for AlarmTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime {
            input: s.to_string(),
        };
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let hour: u8 = h.trim().parse().map_err(|_| invalid())?;
        let minute: u8 = m.trim().parse().map_err(|_| invalid())?;
        Self::new(hour, minute)
    }
}

impl Serialize for AlarmTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AlarmTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The deactivation challenge attached to an alarm.
///
/// A closed set: four single-step kinds, the four-step `Gauntlet` sequence,
/// and `None` (dismissable without verification).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeKind {
    #[default]
    None,
    /// Rock-paper-scissors against a locally chosen app gesture.
    Rps,
    /// Two-operand arithmetic quiz.
    Math,
    /// Awake check via the face classifier.
    Face,
    /// Show a randomly chosen household object to the camera.
    Object,
    /// The full sequence: rps, object hunt, math, awake check.
    Gauntlet,
}

/// A user-defined alarm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alarm {
    /// Opaque unique id, assigned at creation, immutable.
    pub id: String,
    pub time: AlarmTime,
    pub label: String,
    pub enabled: bool,
    pub challenge: ChallengeKind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn parse_and_display_round_trip() {
        let t: AlarmTime = "07:05".parse().unwrap();
        assert_eq!(t.hour(), 7);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.to_string(), "07:05");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<AlarmTime>().is_err());
        assert!("0700".parse::<AlarmTime>().is_err());
        assert!("7:xx".parse::<AlarmTime>().is_err());
        assert!("24:00".parse::<AlarmTime>().is_err());
        assert!("12:60".parse::<AlarmTime>().is_err());
    }

    #[test]
    fn matches_ignores_seconds() {
        let t: AlarmTime = "07:00".parse().unwrap();
        assert!(t.matches(NaiveTime::from_hms_opt(7, 0, 0).unwrap()));
        assert!(t.matches(NaiveTime::from_hms_opt(7, 0, 59).unwrap()));
        assert!(!t.matches(NaiveTime::from_hms_opt(7, 1, 0).unwrap()));
    }

    #[test]
    fn alarm_time_orders_by_clock() {
        let early: AlarmTime = "06:30".parse().unwrap();
        let late: AlarmTime = "18:05".parse().unwrap();
        assert!(early < late);
    }

    #[test]
    fn challenge_kind_serde_is_lowercase() {
        let json = serde_json::to_string(&ChallengeKind::Gauntlet).unwrap();
        assert_eq!(json, "\"gauntlet\"");
        let kind: ChallengeKind = serde_json::from_str("\"rps\"").unwrap();
        assert_eq!(kind, ChallengeKind::Rps);
    }
}
