use quickcheck::{Arbitrary, Gen};

use crate::game::{Board, GameState, Player};

/// A board reached by legal play from the empty position.
#[derive(Clone, Debug)]
pub struct ReachableBoard {
    pub board: Board,
    pub to_move: Player,
}

impl ReachableBoard {
    /// Won or full; such boards have no move to search.
    pub fn is_decided(&self) -> bool {
        crate::game::terminal::outcome(&self.board).is_some()
    }
}

impl Arbitrary for ReachableBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        let first = if bool::arbitrary(g) {
            Player::Red
        } else {
            Player::Yellow
        };
        let plies = usize::arbitrary(g) % 30;

        let mut state = GameState::initial(first);
        for _ in 0..plies {
            let legal = state.legal_columns();
            let Some(&column) = g.choose(&legal) else {
                break;
            };
            // Legal by construction
            state.apply_move(column).unwrap();
        }

        ReachableBoard {
            board: *state.board(),
            to_move: state.current_player(),
        }
    }
}
