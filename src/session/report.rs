use std::fmt;
use std::time::Duration;

use crate::game::{GameOutcome, Player};

use super::runner::GameRecord;

/// Aggregate results of a batch of games.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SimulationReport {
    /// Seat names indexed by [`Player::index`].
    pub seat_names: [String; 2],
    pub games: usize,
    pub wins: [usize; 2],
    pub draws: usize,
    pub total_moves: usize,
    /// Time spent inside games.
    pub game_time: Duration,
    /// Wall time of the whole run, set by the caller once all games are done.
    pub elapsed: Duration,
}

impl SimulationReport {
    pub fn new(seat_names: [String; 2]) -> Self {
        SimulationReport {
            seat_names,
            games: 0,
            wins: [0; 2],
            draws: 0,
            total_moves: 0,
            game_time: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        self.total_moves += game.moves.len();
        self.game_time += game.duration;
        match game.outcome {
            GameOutcome::Winner(player) => self.wins[player.index()] += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn win_percentage(&self, player: Player) -> f64 {
        percentage(self.wins[player.index()], self.games)
    }

    pub fn draw_percentage(&self) -> f64 {
        percentage(self.draws, self.games)
    }

    pub fn average_game_length(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games as f64
    }
}

/// Share of `total` as a percentage rounded to two decimals.
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 10_000.0 / total as f64).round() / 100.0
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games played: {}", self.games)?;
        for player in Player::ALL {
            writeln!(
                f,
                "{} ({}) won {:.2}% of games",
                player,
                self.seat_names[player.index()],
                self.win_percentage(player)
            )?;
        }
        writeln!(f, "Players drew {:.2}% of games", self.draw_percentage())?;
        writeln!(f, "Average game length: {:.1} moves", self.average_game_length())?;
        write!(f, "Elapsed: {:.2}s", self.elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(outcome: GameOutcome, moves: usize) -> GameRecord {
        GameRecord {
            first: Player::Red,
            outcome,
            moves: vec![crate::game::Move { row: 5, column: 0 }; moves],
            moves_by: [moves.div_ceil(2), moves / 2],
            duration: Duration::from_millis(10),
        }
    }

    fn names() -> [String; 2] {
        ["Minimax (depth 2)".to_string(), "Random".to_string()]
    }

    #[test]
    fn test_empty_report() {
        let report = SimulationReport::new(names());
        assert_eq!(report.win_percentage(Player::Red), 0.0);
        assert_eq!(report.draw_percentage(), 0.0);
        assert_eq!(report.average_game_length(), 0.0);
    }

    #[test]
    fn test_percentages_round_to_two_decimals() {
        let mut report = SimulationReport::new(names());
        report.record(&game(GameOutcome::Winner(Player::Red), 7));
        report.record(&game(GameOutcome::Winner(Player::Red), 9));
        report.record(&game(GameOutcome::Winner(Player::Yellow), 8));

        assert_eq!(report.games, 3);
        assert_eq!(report.wins, [2, 1]);
        assert_eq!(report.win_percentage(Player::Red), 66.67);
        assert_eq!(report.win_percentage(Player::Yellow), 33.33);
        assert_eq!(report.draw_percentage(), 0.0);
        assert_eq!(report.average_game_length(), 8.0);
        assert_eq!(report.game_time, Duration::from_millis(30));
        assert_eq!(report.elapsed, Duration::ZERO);
    }

    #[test]
    fn test_display() {
        let mut report = SimulationReport::new(names());
        report.record(&game(GameOutcome::Winner(Player::Yellow), 10));
        report.record(&game(GameOutcome::Draw, 42));

        let text = report.to_string();
        assert!(text.contains("Games played: 2"));
        assert!(text.contains("Red (Minimax (depth 2)) won 0.00% of games"));
        assert!(text.contains("Yellow (Random) won 50.00% of games"));
        assert!(text.contains("Players drew 50.00% of games"));
        assert!(text.contains("Average game length: 26.0 moves"));
    }
}
