//! Headless play: running games between seats, aggregating simulation
//! statistics, and recording search moves as training samples.

mod report;
mod runner;
mod samples;

pub use report::SimulationReport;
pub use runner::{
    play_game, seats_from_config, simulate, GameRecord, Seat, MAX_MOVE_ATTEMPTS,
};
pub use samples::{read_samples, GameSamples, SampleRecorder, TrainingSample};
