pub mod band;
pub mod clock;
pub mod player;
pub mod program;

pub use band::{FrequencyBand, Schedule, ScheduleError, Transition};
pub use clock::{Clock, StreamClock, WallClock};
pub use player::{PlayerError, PlayerState, RunSummary, SequencePlayer};
pub use program::ProgramConfig;
