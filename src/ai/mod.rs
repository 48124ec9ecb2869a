pub mod heuristic;
pub mod model;
pub mod networks;
mod random;
pub mod search;
mod strategy;

pub use model::{best_legal_column, ModelBackend, PolicyModel};
pub use random::RandomMover;
pub use search::{search, Score, SearchConfig, SearchOutcome, DEEP_SEARCH_DEPTH, WIN_SCORE};
pub use strategy::{Strategy, StrategyKind};
