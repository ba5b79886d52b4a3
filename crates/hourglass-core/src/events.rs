use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::Hms;
use crate::timer::RunState;

/// Every accepted state transition produces an Event.
/// The presentation layer renders them; `--json` mode prints them verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerSet {
        duration: Hms,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        duration: Hms,
        total_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining: Hms,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining: Hms,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    TimerCompleted {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: RunState,
        remaining: Hms,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        at: DateTime<Utc>,
    },
}
