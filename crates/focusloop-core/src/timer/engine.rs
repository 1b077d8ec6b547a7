//! Timer/session engine.
//!
//! The engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller polls `tick()` periodically (every
//! 100 ms or so). While running, remaining time is always
//! recomputed as `run_length_ms - (now - started_at_epoch_ms)`, so
//! delayed or missed ticks cannot accumulate drift; the stored
//! `remaining_ms` is authoritative only while not running.
//!
//! ## State transitions
//!
//! ```text
//! (Stopped, Focus) --start--> Running <--> Paused
//!        ^                       | expiry / skip
//!        |                       v
//!        +--- handle_state_switch / handle_auto_start ---> next mode
//! ```
//!
//! Expiry is split into two primitives so the engine stays a pure state
//! machine: `tick()` reports that the countdown crossed zero and which
//! mode the policy selects next, and the caller - who owns the
//! auto-start configuration - picks `handle_state_switch` (end Stopped)
//! or `handle_auto_start` (begin the next countdown immediately).
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(config.timer.clone());
//! engine.start();
//! // In a loop:
//! if let Some(next) = engine.tick() {
//!     engine.handle_state_switch(next); // or handle_auto_start(next)
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::{Mode, Status};
use super::policy;
use super::snapshot::BackgroundSnapshot;
use crate::clock::{Clock, SystemClock};
use crate::events::Event;
use crate::storage::TimerConfig;

/// Core timer/session engine.
///
/// Owns countdown state, mode, run status, and the completed-focus-session
/// counter. State is mutated exclusively through these methods; hosts only
/// read it or invoke the listed operations.
#[derive(Debug, Clone)]
pub struct TimerEngine<C: Clock = SystemClock> {
    config: TimerConfig,
    mode: Mode,
    status: Status,
    /// Authoritative remaining time while not running.
    remaining_ms: u64,
    /// Wall-clock time the current run began; present iff running.
    started_at_epoch_ms: Option<u64>,
    /// Length the current run was started with; present iff running.
    run_length_ms: Option<u64>,
    completed_focus_sessions: u32,
    /// True while the host process is suspended with the timer running.
    /// Ticks are ignored so a stale observation cannot fire against
    /// state that belongs to the persisted snapshot.
    backgrounded: bool,
    clock: C,
}

/// Serializable projection of the engine for hosts that persist state
/// between invocations. A running countdown is never represented here -
/// that is what [`BackgroundSnapshot`] is for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineState {
    pub mode: Mode,
    pub status: Status,
    pub remaining_ms: u64,
    pub completed_focus_sessions: u32,
}

impl TimerEngine<SystemClock> {
    /// Create an engine on the system clock, starting at
    /// `(Stopped, Focus)` with the configured focus duration.
    pub fn new(config: TimerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    /// Rebuild an engine from a persisted [`EngineState`].
    ///
    /// A record claiming `Running` without its snapshot triple cannot be
    /// honored (the run fields live in the snapshot); it is coerced to
    /// `Stopped` with the configured duration for its mode.
    pub fn from_state(state: EngineState, config: TimerConfig) -> Self {
        let mut engine = Self::new(config);
        engine.mode = state.mode;
        engine.completed_focus_sessions = state.completed_focus_sessions;
        match state.status {
            Status::Paused => {
                engine.status = Status::Paused;
                engine.remaining_ms = state.remaining_ms;
            }
            Status::Stopped | Status::Running => {
                engine.status = Status::Stopped;
                engine.remaining_ms = engine.config.duration_ms(state.mode);
            }
        }
        engine
    }
}

impl<C: Clock> TimerEngine<C> {
    pub fn with_clock(config: TimerConfig, clock: C) -> Self {
        let remaining_ms = config.duration_ms(Mode::Focus);
        Self {
            config,
            mode: Mode::Focus,
            status: Status::Stopped,
            remaining_ms,
            started_at_epoch_ms: None,
            run_length_ms: None,
            completed_focus_sessions: 0,
            backgrounded: false,
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.completed_focus_sessions
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn is_backgrounded(&self) -> bool {
        self.backgrounded
    }

    /// Drift-corrected remaining time in milliseconds.
    pub fn remaining_ms(&self) -> u64 {
        match (self.status, self.started_at_epoch_ms, self.run_length_ms) {
            (Status::Running, Some(started), Some(length)) => {
                let elapsed = self.clock.now_ms().saturating_sub(started);
                length.saturating_sub(elapsed)
            }
            _ => self.remaining_ms,
        }
    }

    /// Configured duration of the current mode.
    pub fn total_ms(&self) -> u64 {
        self.config.duration_ms(self.mode)
    }

    /// 0.0 .. 1.0 progress within the current countdown.
    pub fn progress(&self) -> f64 {
        let total = self.run_length_ms.unwrap_or_else(|| self.total_ms());
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms() as f64 / total as f64)
    }

    /// The mode the transition policy selects if the current session
    /// ended now. Uses the post-increment focus count, so with an
    /// interval of 4 the long break follows the 4th, 8th, ... completed
    /// focus session.
    pub fn next_mode(&self) -> Mode {
        let count = match self.mode {
            Mode::Focus => self.completed_focus_sessions + 1,
            Mode::Break | Mode::LongBreak => self.completed_focus_sessions,
        };
        policy::next_mode(self.mode, count, &self.config)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            status: self.status,
            remaining_ms: self.remaining_ms(),
            total_ms: self.total_ms(),
            completed_focus_sessions: self.completed_focus_sessions,
            at: Utc::now(),
        }
    }

    /// Serializable projection for host persistence.
    pub fn state(&self) -> EngineState {
        EngineState {
            mode: self.mode,
            status: self.status,
            remaining_ms: self.remaining_ms(),
            completed_focus_sessions: self.completed_focus_sessions,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin running with the stored remaining time. No-op (idempotent)
    /// while already running.
    pub fn start(&mut self) -> Option<Event> {
        let run_length_ms = self.remaining_ms;
        self.start_with(run_length_ms)
    }

    /// Begin running with an explicit run length. No-op while running.
    pub fn start_with(&mut self, run_length_ms: u64) -> Option<Event> {
        if self.status == Status::Running {
            return None;
        }
        self.backgrounded = false;
        self.status = Status::Running;
        self.started_at_epoch_ms = Some(self.clock.now_ms());
        self.run_length_ms = Some(run_length_ms);
        self.remaining_ms = run_length_ms;
        Some(Event::TimerStarted {
            mode: self.mode,
            run_length_ms,
            at: Utc::now(),
        })
    }

    /// Freeze the countdown at its drift-corrected value. No-op unless
    /// running.
    pub fn pause(&mut self) -> Option<Event> {
        if self.status != Status::Running {
            return None;
        }
        // Resolve against the wall clock at the moment of pausing; the
        // act of pausing itself must not introduce drift.
        self.remaining_ms = self.remaining_ms();
        self.clear_run();
        self.status = Status::Paused;
        Some(Event::TimerPaused {
            mode: self.mode,
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }

    /// Stop from any status and reset the countdown to the configured
    /// duration for the current mode. Never touches the session counter.
    pub fn stop(&mut self) -> Option<Event> {
        self.clear_run();
        self.status = Status::Stopped;
        self.remaining_ms = self.config.duration_ms(self.mode);
        Some(Event::TimerStopped {
            mode: self.mode,
            at: Utc::now(),
        })
    }

    /// Cancel any run and move to `new_mode`, stopped, with its
    /// configured duration.
    pub fn switch_mode(&mut self, new_mode: Mode) -> Option<Event> {
        let from = self.mode;
        self.clear_run();
        self.mode = new_mode;
        self.status = Status::Stopped;
        self.remaining_ms = self.config.duration_ms(new_mode);
        Some(Event::ModeSwitched {
            from,
            to: new_mode,
            at: Utc::now(),
        })
    }

    /// Poll the countdown. Returns the policy-selected next mode once the
    /// drift-corrected remaining time reaches zero; the caller then picks
    /// [`handle_state_switch`](Self::handle_state_switch) or
    /// [`handle_auto_start`](Self::handle_auto_start). No-op while not
    /// running or while backgrounded.
    pub fn tick(&self) -> Option<Mode> {
        if self.status != Status::Running || self.backgrounded {
            return None;
        }
        if self.remaining_ms() == 0 {
            Some(self.next_mode())
        } else {
            None
        }
    }

    /// Expiry primitive, manual path: count the session if leaving Focus,
    /// then end stopped in `next` with its configured duration.
    pub fn handle_state_switch(&mut self, next: Mode) -> Event {
        let from = self.complete_current();
        self.mode = next;
        self.status = Status::Stopped;
        self.remaining_ms = self.config.duration_ms(next);
        Event::SessionCompleted {
            from,
            to: next,
            completed_focus_sessions: self.completed_focus_sessions,
            auto_started: false,
            at: Utc::now(),
        }
    }

    /// Expiry primitive, auto path: count the session if leaving Focus,
    /// then immediately begin the next mode's countdown.
    pub fn handle_auto_start(&mut self, next: Mode) -> Event {
        let from = self.complete_current();
        let run_length_ms = self.config.duration_ms(next);
        self.mode = next;
        self.status = Status::Running;
        self.started_at_epoch_ms = Some(self.clock.now_ms());
        self.run_length_ms = Some(run_length_ms);
        self.remaining_ms = run_length_ms;
        Event::SessionCompleted {
            from,
            to: next,
            completed_focus_sessions: self.completed_focus_sessions,
            auto_started: true,
            at: Utc::now(),
        }
    }

    /// Force the expiry path without waiting for the countdown. No-op
    /// while stopped. Counts a focus session exactly like natural expiry;
    /// only `stop()` is the non-counting exit.
    pub fn skip(&mut self) -> Option<Event> {
        if self.status == Status::Stopped {
            return None;
        }
        let next = self.next_mode();
        let from = self.complete_current();
        self.mode = next;
        self.status = Status::Stopped;
        self.remaining_ms = self.config.duration_ms(next);
        Some(Event::SessionSkipped {
            from,
            to: next,
            completed_focus_sessions: self.completed_focus_sessions,
            at: Utc::now(),
        })
    }

    /// Explicit reset of the completed-focus-session counter. This is the
    /// only way the counter decreases.
    pub fn reset_sessions(&mut self) {
        self.completed_focus_sessions = 0;
    }

    /// Replace the session configuration. While stopped the countdown is
    /// immediately re-derived for the current mode; an in-progress run is
    /// never altered retroactively.
    pub fn set_config(&mut self, config: TimerConfig) {
        self.config = config;
        if self.status == Status::Stopped {
            self.remaining_ms = self.config.duration_ms(self.mode);
        }
    }

    // ── Background survival ──────────────────────────────────────────

    /// Externalize the raw run triple before process suspension. Marks
    /// the engine backgrounded (ticks are ignored) without altering any
    /// bookkeeping, so wall-clock recovery is exact. No-op unless
    /// running.
    pub fn snapshot_for_background(&mut self) -> Option<BackgroundSnapshot> {
        match (self.status, self.started_at_epoch_ms, self.run_length_ms) {
            (Status::Running, Some(started_at_epoch_ms), Some(run_length_ms)) => {
                self.backgrounded = true;
                Some(BackgroundSnapshot {
                    started_at_epoch_ms,
                    run_length_ms,
                    mode: self.mode,
                })
            }
            _ => None,
        }
    }

    /// Resume from a persisted run triple.
    ///
    /// If the run has time left, running resumes against the original
    /// timestamps. Otherwise the session expired while suspended: the
    /// engine advances exactly one mode step through the manual expiry
    /// path, as if expiry had fired at the missed boundary - never more,
    /// regardless of how long the suspension lasted. The caller may then
    /// apply its auto-start configuration by calling `start()`.
    pub fn restore_from_background(&mut self, snapshot: BackgroundSnapshot) -> Event {
        self.backgrounded = false;
        self.mode = snapshot.mode;
        let elapsed = self.clock.now_ms().saturating_sub(snapshot.started_at_epoch_ms);
        if snapshot.run_length_ms > elapsed {
            self.status = Status::Running;
            self.started_at_epoch_ms = Some(snapshot.started_at_epoch_ms);
            self.run_length_ms = Some(snapshot.run_length_ms);
            self.remaining_ms = snapshot.run_length_ms - elapsed;
            Event::TimerRestored {
                mode: self.mode,
                remaining_ms: self.remaining_ms,
                at: Utc::now(),
            }
        } else {
            self.clear_run();
            self.status = Status::Stopped;
            let next = self.next_mode();
            self.handle_state_switch(next)
        }
    }

    /// DataCorruption fallback: discard whatever was persisted and end
    /// stopped with the default duration - in the persisted mode when it
    /// survived, otherwise the current one.
    pub fn recover_from_corrupt(&mut self, mode_hint: Option<Mode>) -> Option<Event> {
        self.backgrounded = false;
        let mode = mode_hint.unwrap_or(self.mode);
        self.switch_mode(mode)
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Close out the current session: cancel the run, and count it when
    /// leaving Focus. Returns the mode being left.
    fn complete_current(&mut self) -> Mode {
        self.clear_run();
        self.backgrounded = false;
        if self.mode == Mode::Focus {
            self.completed_focus_sessions += 1;
        }
        self.mode
    }

    fn clear_run(&mut self) {
        self.started_at_epoch_ms = None;
        self.run_length_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn engine_at(now_ms: u64) -> (TimerEngine<ManualClock>, ManualClock) {
        let clock = ManualClock::new(now_ms);
        let engine = TimerEngine::with_clock(TimerConfig::default(), clock.clone());
        (engine, clock)
    }

    #[test]
    fn initial_state_is_stopped_focus() {
        let (engine, _clock) = engine_at(0);
        assert_eq!(engine.mode(), Mode::Focus);
        assert_eq!(engine.status(), Status::Stopped);
        assert_eq!(engine.remaining_ms(), 25 * 60 * 1000);
        assert_eq!(engine.completed_focus_sessions(), 0);
    }

    #[test]
    fn start_reads_back_full_duration() {
        let (mut engine, _clock) = engine_at(1_000);
        engine.start();
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(engine.remaining_ms(), 25 * 60 * 1000);
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let (mut engine, clock) = engine_at(1_000);
        assert!(engine.start().is_some());
        clock.advance(5_000);
        // Second start is a no-op: the original start timestamp holds.
        assert!(engine.start().is_none());
        assert_eq!(engine.remaining_ms(), 25 * 60 * 1000 - 5_000);
    }

    #[test]
    fn pause_resolves_exact_remaining() {
        let (mut engine, clock) = engine_at(0);
        engine.start_with(13_000);
        clock.advance(3_000);
        let event = engine.pause().unwrap();
        assert_eq!(engine.status(), Status::Paused);
        assert_eq!(engine.remaining_ms(), 10_000);
        match event {
            Event::TimerPaused { remaining_ms, .. } => assert_eq!(remaining_ms, 10_000),
            other => panic!("expected TimerPaused, got {other:?}"),
        }
    }

    #[test]
    fn pause_then_start_resumes_from_remaining() {
        let (mut engine, clock) = engine_at(0);
        engine.start_with(13_000);
        clock.advance(3_000);
        engine.pause();
        clock.advance(60_000); // paused time does not count
        engine.start();
        assert_eq!(engine.remaining_ms(), 10_000);
        clock.advance(4_000);
        assert_eq!(engine.remaining_ms(), 6_000);
    }

    #[test]
    fn pause_while_stopped_is_noop() {
        let (mut engine, _clock) = engine_at(0);
        assert!(engine.pause().is_none());
        assert_eq!(engine.status(), Status::Stopped);
    }

    #[test]
    fn drift_correction_survives_missed_ticks() {
        let (mut engine, clock) = engine_at(0);
        engine.start_with(10_000);
        // No tick fires for a long stretch; the next observation still
        // resolves from wall-clock time.
        clock.advance(9_999);
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.remaining_ms(), 1);
        clock.advance(5_000);
        assert_eq!(engine.tick(), Some(Mode::Break));
        assert_eq!(engine.remaining_ms(), 0);
    }

    #[test]
    fn tick_is_noop_when_not_running() {
        let (engine, _clock) = engine_at(0);
        assert_eq!(engine.tick(), None);
    }

    #[test]
    fn stop_never_counts_a_session() {
        let (mut engine, clock) = engine_at(0);
        engine.start();
        clock.advance(24 * 60 * 1000); // almost done
        engine.stop();
        assert_eq!(engine.completed_focus_sessions(), 0);
        assert_eq!(engine.status(), Status::Stopped);
        assert_eq!(engine.mode(), Mode::Focus);
        assert_eq!(engine.remaining_ms(), 25 * 60 * 1000);
    }

    #[test]
    fn state_switch_counts_focus_and_lands_stopped() {
        let (mut engine, clock) = engine_at(0);
        engine.start();
        clock.advance(25 * 60 * 1000);
        let next = engine.tick().unwrap();
        assert_eq!(next, Mode::Break);
        let event = engine.handle_state_switch(next);
        assert_eq!(engine.mode(), Mode::Break);
        assert_eq!(engine.status(), Status::Stopped);
        assert_eq!(engine.remaining_ms(), 5 * 60 * 1000);
        assert_eq!(engine.completed_focus_sessions(), 1);
        match event {
            Event::SessionCompleted { auto_started, .. } => assert!(!auto_started),
            other => panic!("expected SessionCompleted, got {other:?}"),
        }
    }

    #[test]
    fn auto_start_begins_next_countdown_immediately() {
        let (mut engine, clock) = engine_at(0);
        engine.start();
        clock.advance(25 * 60 * 1000);
        let next = engine.tick().unwrap();
        engine.handle_auto_start(next);
        assert_eq!(engine.mode(), Mode::Break);
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(engine.remaining_ms(), 5 * 60 * 1000);
    }

    #[test]
    fn leaving_a_break_does_not_count() {
        let (mut engine, clock) = engine_at(0);
        engine.switch_mode(Mode::Break);
        engine.start();
        clock.advance(5 * 60 * 1000);
        let next = engine.tick().unwrap();
        assert_eq!(next, Mode::Focus);
        engine.handle_state_switch(next);
        assert_eq!(engine.completed_focus_sessions(), 0);
    }

    #[test]
    fn skip_during_focus_counts_like_expiry() {
        let (mut engine, clock) = engine_at(0);
        engine.start();
        clock.advance(60_000);
        let event = engine.skip().unwrap();
        assert_eq!(engine.mode(), Mode::Break);
        assert_eq!(engine.status(), Status::Stopped);
        assert_eq!(engine.completed_focus_sessions(), 1);
        assert!(matches!(event, Event::SessionSkipped { .. }));
    }

    #[test]
    fn skip_while_paused_works() {
        let (mut engine, clock) = engine_at(0);
        engine.switch_mode(Mode::Break);
        engine.start();
        clock.advance(1_000);
        engine.pause();
        engine.skip().unwrap();
        assert_eq!(engine.mode(), Mode::Focus);
        assert_eq!(engine.completed_focus_sessions(), 0);
    }

    #[test]
    fn skip_while_stopped_is_noop() {
        let (mut engine, _clock) = engine_at(0);
        assert!(engine.skip().is_none());
        assert_eq!(engine.mode(), Mode::Focus);
    }

    #[test]
    fn fourth_focus_session_earns_long_break() {
        let (mut engine, clock) = engine_at(0);
        for round in 1..=4u32 {
            engine.start();
            clock.advance(25 * 60 * 1000);
            let next = engine.tick().unwrap();
            let expected = if round == 4 { Mode::LongBreak } else { Mode::Break };
            assert_eq!(next, expected, "round {round}");
            engine.handle_state_switch(next);
            assert_eq!(engine.completed_focus_sessions(), round);
            if round < 4 {
                // Finish the break manually to get back to focus.
                engine.start();
                clock.advance(5 * 60 * 1000);
                let back = engine.tick().unwrap();
                assert_eq!(back, Mode::Focus);
                engine.handle_state_switch(back);
            }
        }
        assert_eq!(engine.mode(), Mode::LongBreak);
        assert_eq!(engine.status(), Status::Stopped);
        assert_eq!(engine.remaining_ms(), 15 * 60 * 1000);
    }

    #[test]
    fn set_config_while_stopped_updates_remaining() {
        let (mut engine, _clock) = engine_at(0);
        let config = TimerConfig {
            focus_duration_ms: 50 * 60 * 1000,
            ..TimerConfig::default()
        };
        engine.set_config(config);
        assert_eq!(engine.remaining_ms(), 50 * 60 * 1000);
    }

    #[test]
    fn set_config_while_running_leaves_run_untouched() {
        let (mut engine, clock) = engine_at(0);
        engine.start();
        clock.advance(60_000);
        let config = TimerConfig {
            focus_duration_ms: 50 * 60 * 1000,
            ..TimerConfig::default()
        };
        engine.set_config(config);
        assert_eq!(engine.remaining_ms(), 25 * 60 * 1000 - 60_000);
        // The new duration applies on the next stop.
        engine.stop();
        assert_eq!(engine.remaining_ms(), 50 * 60 * 1000);
    }

    #[test]
    fn snapshot_roundtrip_with_zero_elapsed() {
        let (mut engine, _clock) = engine_at(10_000);
        engine.start_with(90_000);
        let snap = engine.snapshot_for_background().unwrap();
        assert!(engine.is_backgrounded());
        let event = engine.restore_from_background(snap);
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(engine.mode(), Mode::Focus);
        assert_eq!(engine.remaining_ms(), 90_000);
        assert!(matches!(event, Event::TimerRestored { .. }));
    }

    #[test]
    fn backgrounded_engine_ignores_ticks() {
        let (mut engine, clock) = engine_at(0);
        engine.start_with(1_000);
        engine.snapshot_for_background().unwrap();
        clock.advance(5_000);
        assert_eq!(engine.tick(), None);
    }

    #[test]
    fn restore_mid_run_resumes_against_original_timestamps() {
        let (mut engine, clock) = engine_at(0);
        engine.start_with(60_000);
        let snap = engine.snapshot_for_background().unwrap();
        clock.advance(15_000);
        engine.restore_from_background(snap);
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(engine.remaining_ms(), 45_000);
        clock.advance(45_000);
        assert_eq!(engine.tick(), Some(Mode::Break));
    }

    #[test]
    fn expiry_while_suspended_advances_exactly_one_step() {
        let (mut engine, clock) = engine_at(0);
        engine.start_with(1_000);
        let snap = engine.snapshot_for_background().unwrap();
        clock.advance(5_000); // far past the 1s boundary
        let event = engine.restore_from_background(snap);
        assert_eq!(engine.mode(), Mode::Break);
        assert_eq!(engine.status(), Status::Stopped);
        assert_eq!(engine.remaining_ms(), 5 * 60 * 1000);
        assert_eq!(engine.completed_focus_sessions(), 1);
        assert!(matches!(
            event,
            Event::SessionCompleted {
                from: Mode::Focus,
                to: Mode::Break,
                auto_started: false,
                ..
            }
        ));
    }

    #[test]
    fn recover_from_corrupt_honors_mode_hint() {
        let (mut engine, _clock) = engine_at(0);
        engine.recover_from_corrupt(Some(Mode::LongBreak));
        assert_eq!(engine.mode(), Mode::LongBreak);
        assert_eq!(engine.status(), Status::Stopped);
        assert_eq!(engine.remaining_ms(), 15 * 60 * 1000);
    }

    #[test]
    fn recover_from_corrupt_without_hint_keeps_mode() {
        let (mut engine, _clock) = engine_at(0);
        engine.switch_mode(Mode::Break);
        engine.recover_from_corrupt(None);
        assert_eq!(engine.mode(), Mode::Break);
        assert_eq!(engine.remaining_ms(), 5 * 60 * 1000);
    }

    #[test]
    fn reset_sessions_is_the_only_decrease() {
        let (mut engine, clock) = engine_at(0);
        engine.start();
        clock.advance(25 * 60 * 1000);
        let next = engine.tick().unwrap();
        engine.handle_state_switch(next);
        assert_eq!(engine.completed_focus_sessions(), 1);
        engine.reset_sessions();
        assert_eq!(engine.completed_focus_sessions(), 0);
    }

    #[test]
    fn from_state_restores_paused_remaining() {
        let state = EngineState {
            mode: Mode::Break,
            status: Status::Paused,
            remaining_ms: 42_000,
            completed_focus_sessions: 3,
        };
        let engine = TimerEngine::from_state(state, TimerConfig::default());
        assert_eq!(engine.status(), Status::Paused);
        assert_eq!(engine.remaining_ms(), 42_000);
        assert_eq!(engine.completed_focus_sessions(), 3);
    }

    #[test]
    fn from_state_coerces_orphaned_running_to_stopped() {
        let state = EngineState {
            mode: Mode::Focus,
            status: Status::Running,
            remaining_ms: 42_000,
            completed_focus_sessions: 0,
        };
        let engine = TimerEngine::from_state(state, TimerConfig::default());
        assert_eq!(engine.status(), Status::Stopped);
        assert_eq!(engine.remaining_ms(), 25 * 60 * 1000);
    }
}
