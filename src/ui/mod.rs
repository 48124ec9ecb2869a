//! Terminal UI for playing Connect Four between any two seats.

mod app;
mod game_view;

pub use app::{App, DEFAULT_MOVE_DELAY};
