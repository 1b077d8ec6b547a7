//! Timer control.
//!
//! Each invocation is a fresh process, so the countdown survives between
//! commands exactly the way it survives app backgrounding: while running,
//! the raw run triple is externalized through [`BackgroundSnapshot`]; the
//! rest of the engine state is kept as a serialized record under its own
//! key. Loading restores the snapshot - applying the auto-start
//! configuration when the countdown expired between invocations, and the
//! corruption fallback when the snapshot is unreadable.

use clap::Subcommand;
use focusloop_core::storage::{Config, KvStore};
use focusloop_core::timer::{BackgroundSnapshot, EngineState, Mode, Status, TimerEngine};
use focusloop_core::Event;

const STATE_KEY: &str = "timer_engine";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the countdown for the current mode
    Start {
        /// Override the run length in minutes
        #[arg(long)]
        minutes: Option<u64>,
    },
    /// Pause the running countdown
    Pause,
    /// Stop and reset the current mode's countdown
    Stop,
    /// Skip ahead to the next mode (counts a focus session)
    Skip,
    /// Switch mode: focus, break, or long-break
    Switch { mode: String },
    /// Print current timer state as JSON
    Status,
    /// Reset the completed-focus-session counter
    ResetSessions,
}

fn load_engine(kv: &KvStore, config: &Config) -> TimerEngine {
    let mut engine = match kv
        .kv_get(STATE_KEY)
        .and_then(|json| serde_json::from_str::<EngineState>(json).ok())
    {
        Some(state) => TimerEngine::from_state(state, config.timer.clone()),
        None => TimerEngine::new(config.timer.clone()),
    };

    match BackgroundSnapshot::read_from(kv) {
        Ok(Some(snap)) => {
            let event = engine.restore_from_background(snap);
            if let Event::SessionCompleted { from, .. } = event {
                // Expired between invocations; honor the auto-start
                // configuration for the mode that was left.
                if config.timer.auto_start_after(from) {
                    engine.start();
                }
            }
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("Warning: discarding corrupt background snapshot: {e}");
            engine.recover_from_corrupt(e.mode_hint());
        }
    }

    engine
}

fn save_engine(
    kv: &mut KvStore,
    engine: &mut TimerEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    if engine.status() == Status::Running {
        if let Some(snap) = engine.snapshot_for_background() {
            snap.write_to(kv)?;
        }
    } else {
        BackgroundSnapshot::clear(kv)?;
    }
    let json = serde_json::to_string(&engine.state())?;
    kv.kv_set(STATE_KEY, &json)?;
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut kv = KvStore::open_default()?;
    let mut engine = load_engine(&kv, &config);

    match action {
        TimerAction::Start { minutes } => {
            let event = match minutes {
                Some(minutes) => engine.start_with(minutes.saturating_mul(60 * 1000)),
                None => engine.start(),
            };
            match event {
                Some(event) => print_event(&event)?,
                None => print_event(&engine.snapshot())?, // already running
            }
        }
        TimerAction::Pause => match engine.pause() {
            Some(event) => print_event(&event)?,
            None => print_event(&engine.snapshot())?,
        },
        TimerAction::Stop => {
            if let Some(event) = engine.stop() {
                print_event(&event)?;
            }
        }
        TimerAction::Skip => match engine.skip() {
            Some(event) => {
                print_event(&event)?;
                if let Event::SessionSkipped { from, .. } = event {
                    if config.timer.auto_start_after(from) {
                        if let Some(started) = engine.start() {
                            print_event(&started)?;
                        }
                    }
                }
            }
            None => print_event(&engine.snapshot())?,
        },
        TimerAction::Switch { mode } => {
            let mode: Mode = mode.parse().map_err(|e: String| -> Box<dyn std::error::Error> { e.into() })?;
            if let Some(event) = engine.switch_mode(mode) {
                print_event(&event)?;
            }
        }
        TimerAction::Status => {
            // Observe the countdown; a crossed boundary is handled here,
            // with the auto/manual decision read from configuration.
            if let Some(next) = engine.tick() {
                let leaving = engine.mode();
                let event = if config.timer.auto_start_after(leaving) {
                    engine.handle_auto_start(next)
                } else {
                    engine.handle_state_switch(next)
                };
                print_event(&event)?;
            }
            print_event(&engine.snapshot())?;
        }
        TimerAction::ResetSessions => {
            engine.reset_sessions();
            print_event(&engine.snapshot())?;
        }
    }

    save_engine(&mut kv, &mut engine)?;
    Ok(())
}
