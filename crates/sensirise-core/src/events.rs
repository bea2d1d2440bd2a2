use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::alarm::{AlarmTime, ChallengeKind};
use crate::challenge::{RejectReason, StepKind};

/// Every state change in the core produces an Event.
/// The UI layer polls for events; the CLI prints them as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// An alarm started ringing and its challenge session began.
    AlarmTriggered {
        alarm_id: String,
        label: String,
        time: AlarmTime,
        challenge: ChallengeKind,
        steps: usize,
        at: DateTime<Utc>,
    },
    /// A challenge step was verified and the session moved on.
    StepPassed {
        step_index: usize,
        step: StepKind,
        at: DateTime<Utc>,
    },
    /// A step attempt failed; same step, fresh content.
    StepRejected {
        step_index: usize,
        step: StepKind,
        reason: RejectReason,
        at: DateTime<Utc>,
    },
    /// The challenge finished (or a no-challenge alarm was dismissed); the
    /// alarm is disabled and the ringing state cleared.
    AlarmDisarmed {
        alarm_id: String,
        at: DateTime<Utc>,
    },
    /// A local-midnight boundary passed and the trigger ledger was cleared.
    LedgerCleared {
        day: NaiveDate,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        ringing_alarm_id: Option<String>,
        challenge: Option<ChallengeKind>,
        step_index: Option<usize>,
        step_count: Option<usize>,
        enabled_alarms: usize,
        at: DateTime<Utc>,
    },
}
