//! # Minimax Connect Four
//!
//! Connect Four played by interchangeable strategies: depth-limited minimax
//! with optional alpha-beta pruning, uniform random play, a small
//! convolutional policy network, and a human at the keyboard.
//!
//! ## Modules
//!
//! - [`game`]: Board, players, win/draw detection, game state machine
//! - [`ai`]: Heuristic evaluator, search engine, strategies, policy network
//! - [`session`]: Headless games, simulation statistics, training samples
//! - [`ui`]: Terminal UI for interactive play
//! - [`config`]: TOML configuration loading and validation
//! - [`cli`]: Command-line flags shared by the binaries
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: Structured error types

#![recursion_limit = "256"]

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod session;
pub mod ui;

#[cfg(test)]
mod arbitrary;
