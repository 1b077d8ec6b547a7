//! Mode-transition policy.
//!
//! Pure function, no side effects. The engine (and anything replaying
//! history) calls it with the post-increment focus count, so with an
//! interval of 4 the long break lands after the 4th, 8th, ... completed
//! focus session.

use super::mode::Mode;
use crate::storage::TimerConfig;

/// Decide the mode that follows `leaving`.
pub fn next_mode(leaving: Mode, completed_focus_sessions: u32, config: &TimerConfig) -> Mode {
    match leaving {
        Mode::Focus => {
            if config.long_break_enabled
                && completed_focus_sessions % config.long_break_interval == 0
            {
                Mode::LongBreak
            } else {
                Mode::Break
            }
        }
        Mode::Break | Mode::LongBreak => Mode::Focus,
    }
}
