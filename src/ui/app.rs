use std::io;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info};

use crate::ai::Strategy;
use crate::config::AppConfig;
use crate::error::{ConfigError, StrategyError};
use crate::game::{GameOutcome, GameState, Move, Player, CENTER_COLUMN, COLS};

use super::game_view::{self, GameView};

/// Pause before an automated seat moves, so its moves can be followed.
pub const DEFAULT_MOVE_DELAY: Duration = Duration::from_millis(400);

struct UiSeat {
    strategy: Strategy,
    input: Option<Sender<usize>>,
}

pub struct App {
    /// Indexed by [`Player::index`]: player one is Red, player two Yellow.
    seats: [UiSeat; 2],
    game_state: GameState,
    first: Player,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    move_delay: Duration,
    last_move_at: Instant,
    /// Red wins, Yellow wins, draws.
    tally: [usize; 3],
}

impl App {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let seed = config.simulation.seed;
        let (red, red_input) = Strategy::from_seat(&config.player_one, config, seed)?;
        let (yellow, yellow_input) =
            Strategy::from_seat(&config.player_two, config, seed.map(|s| s.wrapping_add(1)))?;
        Ok(App {
            seats: [
                UiSeat {
                    strategy: red,
                    input: red_input,
                },
                UiSeat {
                    strategy: yellow,
                    input: yellow_input,
                },
            ],
            game_state: GameState::initial(Player::Red),
            first: Player::Red,
            selected_column: CENTER_COLUMN,
            should_quit: false,
            message: None,
            move_delay: DEFAULT_MOVE_DELAY,
            last_move_at: Instant::now(),
            tally: [0; 3],
        })
    }

    pub fn with_move_delay(mut self, delay: Duration) -> Self {
        self.move_delay = delay;
        self
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            if self.last_move_at.elapsed() >= self.move_delay || self.current_seat_is_human() {
                self.advance();
            }
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = c as usize - '1' as usize;
                self.submit_column();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.submit_column();
            }
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    fn current_seat_is_human(&self) -> bool {
        self.seats[self.game_state.current_player().index()]
            .strategy
            .is_human()
    }

    /// Hand the selected column to the human seat on turn.
    fn submit_column(&mut self) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        let seat = &self.seats[self.game_state.current_player().index()];
        match &seat.input {
            Some(tx) => {
                // The receiver lives in the same seat, so this cannot fail.
                let _ = tx.send(self.selected_column);
                self.advance();
            }
            None => {
                self.message = Some(format!("{} is not yours to move.", seat.strategy.name()));
            }
        }
    }

    /// Ask the seat on turn for a move and apply it. Returns the applied move.
    fn advance(&mut self) -> Option<Move> {
        if self.game_state.is_terminal() {
            return None;
        }
        let player = self.game_state.current_player();
        let board = *self.game_state.board();
        let seat = &mut self.seats[player.index()];

        let proposed = match seat.strategy.choose_move(&board, player) {
            Ok(mv) => mv,
            Err(StrategyError::AwaitingInput) => return None,
            Err(err) => {
                self.message = Some(err.to_string());
                return None;
            }
        };

        let mv = match self.game_state.apply_move(proposed.column) {
            Ok(mv) => mv,
            Err(err) => {
                self.message = Some(format!("Illegal move: {err}"));
                return None;
            }
        };
        debug!(%player, column = mv.column, "move applied");
        self.last_move_at = Instant::now();
        self.message = None;

        if let Some(outcome) = self.game_state.outcome() {
            self.finish(outcome);
        }
        Some(mv)
    }

    fn finish(&mut self, outcome: GameOutcome) {
        let text = match outcome {
            GameOutcome::Winner(player) => {
                self.tally[player.index()] += 1;
                format!(
                    "{} ({}) wins!",
                    player,
                    self.seats[player.index()].strategy.name()
                )
            }
            GameOutcome::Draw => {
                self.tally[2] += 1;
                "It's a draw!".to_string()
            }
        };
        info!(result = %text, moves = self.game_state.moves_played(), "game over");
        self.message = Some(format!("{text}  Press 'r' for a rematch."));
    }

    /// New game; the other player opens.
    fn restart(&mut self) {
        self.first = self.first.other();
        self.game_state = GameState::initial(self.first);
        self.selected_column = CENTER_COLUMN;
        self.last_move_at = Instant::now();
        self.message = Some(format!("New game started! {} opens.", self.first));
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let seat_names = [self.seats[0].strategy.name(), self.seats[1].strategy.name()];
        game_view::render(
            frame,
            &GameView {
                game_state: &self.game_state,
                selected_column: self.selected_column,
                message: self.message.as_deref(),
                seat_names: &seat_names,
                tally: self.tally,
            },
        );
    }
}
