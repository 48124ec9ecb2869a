use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::game::Board;

/// Picks uniformly among the playable columns.
#[derive(Debug)]
pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    pub fn new() -> Self {
        RandomMover {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence of choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        RandomMover {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `None` only when every column is full.
    pub fn choose_column(&mut self, board: &Board) -> Option<usize> {
        let columns = board.playable_columns();
        if columns.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..columns.len());
        Some(columns[idx])
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}
