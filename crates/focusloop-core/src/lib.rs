//! # Focusloop Core Library
//!
//! This library provides the core business logic for the Focusloop Pomodoro
//! timer. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI shell being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` for progress observation. All
//!   countdown arithmetic is recomputed from absolute timestamps, so missed
//!   or delayed ticks never accumulate drift.
//! - **Storage**: JSON key/value state persistence and TOML-based
//!   configuration.
//! - **Background survival**: an in-progress run is externalized as a flat
//!   `{started_at, run_length, mode}` triple and reconstructed exactly
//!   across a process suspend/resume cycle.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: core timer/session state machine
//! - [`Config`]: application configuration management
//! - [`BackgroundSnapshot`]: suspend/resume run persistence
//! - [`Event`]: state-change notifications hosts react to

pub mod clock;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, Result, SnapshotError, StoreError};
pub use events::Event;
pub use storage::{Config, KvStore, TimerConfig};
pub use timer::{BackgroundSnapshot, EngineState, Mode, Status, TimerEngine};
