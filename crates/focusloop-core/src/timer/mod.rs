mod engine;
mod mode;
mod policy;
mod snapshot;

pub use engine::{EngineState, TimerEngine};
pub use mode::{Mode, Status};
pub use policy::next_mode;
pub use snapshot::BackgroundSnapshot;
