use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Mode, Status};

/// Every state change in the engine produces an Event.
/// Hosts poll for events and drive notification/sound dispatch from them;
/// the engine itself never dispatches anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        run_length_ms: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        mode: Mode,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: Mode,
        to: Mode,
        at: DateTime<Utc>,
    },
    /// A session ran to its end (natural expiry, or the missed boundary
    /// discovered on restore) and the engine advanced one mode step.
    SessionCompleted {
        from: Mode,
        to: Mode,
        completed_focus_sessions: u32,
        auto_started: bool,
        at: DateTime<Utc>,
    },
    /// The user forced the expiry path without waiting for the countdown.
    SessionSkipped {
        from: Mode,
        to: Mode,
        completed_focus_sessions: u32,
        at: DateTime<Utc>,
    },
    /// An in-progress run survived a suspend/resume cycle.
    TimerRestored {
        mode: Mode,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        status: Status,
        remaining_ms: u64,
        total_ms: u64,
        completed_focus_sessions: u32,
        at: DateTime<Utc>,
    },
}
