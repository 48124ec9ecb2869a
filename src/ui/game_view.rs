use crate::game::{Board, Cell, GameState, Player, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the game screen shows.
pub struct GameView<'a> {
    pub game_state: &'a GameState,
    pub selected_column: usize,
    pub message: Option<&'a str>,
    /// Indexed by [`Player::index`].
    pub seat_names: &'a [String; 2],
    /// Red wins, Yellow wins, draws.
    pub tally: [usize; 3],
}

pub fn render(frame: &mut Frame, view: &GameView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Score
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_board(frame, view.game_state.board(), view.selected_column, chunks[1]);
    render_score(frame, view, chunks[2]);
    render_message(frame, view.message, chunks[3]);
    render_controls(frame, chunks[4]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, view: &GameView<'_>, area: Rect) {
    let current_player = view.game_state.current_player();
    let status = if view.game_state.is_terminal() {
        "Game Over".to_string()
    } else {
        format!(
            "Current Player: {} ({})  |  Move {}",
            current_player,
            view.seat_names[current_player.index()],
            view.game_state.moves_played() + 1
        )
    };

    let header = Paragraph::new(status)
        .style(
            Style::default()
                .fg(player_color(current_player))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, board: &Board, selected_column: usize, area: Rect) {
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let (symbol, color) = match board.get(row, col) {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::Red => (" ● ", Color::Red),
                Cell::Yellow => (" ● ", Color::Yellow),
            };
            row_spans.push(Span::styled(symbol, Style::default().fg(color)));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_score(frame: &mut Frame, view: &GameView<'_>, area: Rect) {
    let mut spans = Vec::new();
    for player in Player::ALL {
        spans.push(Span::styled(
            format!("{} ({})", player, view.seat_names[player.index()]),
            Style::default()
                .fg(player_color(player))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(": {}   ", view.tally[player.index()])));
    }
    spans.push(Span::raw(format!("Draws: {}", view.tally[2])));

    let score = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));
    frame.render_widget(score, area);
}

fn render_message(frame: &mut Frame, message: Option<&str>, area: Rect) {
    let msg_widget = Paragraph::new(message.unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("←/→: Move  |  1-7 or Enter: Drop  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_render_shows_discs_and_names() {
        let mut state = GameState::initial(Player::Red);
        state.apply_move(3).unwrap();
        let names = ["Human".to_string(), "Random".to_string()];
        let view = GameView {
            game_state: &state,
            selected_column: 3,
            message: Some("hello"),
            seat_names: &names,
            tally: [1, 0, 2],
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, &view)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Current Player: Yellow (Random)"));
        assert!(text.contains("hello"));
        assert!(text.contains("Draws: 2"));
        assert!(text.contains('●'));
    }
}
