mod config;
mod engine;

pub use config::TimerConfig;
pub use engine::{Phase, TimerEngine, TimerState, AUTO_START_DELAY};
