//! Terminal UI rendering with ratatui

use blocktris::highscore::HighScoreTable;
use blocktris::settings::Settings;
use blocktris::tetromino::TetrominoType;
use blocktris::view::{DisplayCell, display_grid};
use blocktris::{GameState, Status};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const EMPTY: &str = "  ";

/// Total width needed: scores(24) + board(22) + next/stats(16) = 62
const GAME_WIDTH: u16 = 62;
/// Total height needed: board(20) + 2 for borders
const GAME_HEIGHT: u16 = 22;

/// Placed blocks lose their piece color once merged
const PLACED_COLOR: Color = Color::Gray;

/// Render one full frame for `state`
pub fn render_game(frame: &mut Frame, state: &GameState, scores: &HighScoreTable, settings: &Settings) {
    let area = frame.area();
    let (block_char, empty_char) = settings.visual.block_chars();

    // Center the game area
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // Create main layout: high scores | board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24), // High scores
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(16), // Next piece + stats
        ])
        .split(game_area);

    render_high_scores(frame, main_layout[0], scores);
    render_board(frame, main_layout[1], state, block_char, empty_char);

    // Right side: next piece and stats
    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Next piece
            Constraint::Min(6),    // Stats
        ])
        .split(main_layout[2]);

    render_next(frame, right_layout[0], state.next_piece.map(|p| p.piece_type), block_char);
    render_stats(frame, right_layout[1], state);

    // Overlays
    match state.status() {
        Status::NotStarted => {
            let hint = format!("{} to start", key_label(&settings.keys.new_game));
            render_overlay(frame, area, "BLOCKTRIS", &hint);
        }
        Status::Paused => {
            let hint = format!("{} to resume", key_label(&settings.keys.pause));
            render_overlay(frame, area, "PAUSED", &hint);
        }
        Status::GameOver => {
            let hint = format!("{} to play again", key_label(&settings.keys.new_game));
            render_overlay(frame, area, "GAME OVER", &hint);
        }
        Status::Running => {}
    }
}

/// Center a rectangle of the given size inside `area`
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Display name for the first key bound to an action
fn key_label(keys: &[String]) -> String {
    match keys.first() {
        Some(key) if key.chars().count() == 1 => key.to_uppercase(),
        Some(key) => key.clone(),
        None => "?".to_string(),
    }
}

/// Parse a `#rrggbb` piece color
fn piece_color(hex: &str) -> Color {
    let digits = hex.trim_start_matches('#');
    match u32::from_str_radix(digits, 16) {
        Ok(rgb) if digits.len() == 6 => {
            Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
        }
        _ => Color::White,
    }
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, state: &GameState, block_char: &str, empty_char: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let falling_color = state
        .current_piece
        .map(|piece| piece_color(piece.color()))
        .unwrap_or(Color::White);

    let lines: Vec<Line> = display_grid(state)
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    DisplayCell::Empty => Span::styled(empty_char, Style::default().fg(Color::DarkGray)),
                    DisplayCell::Placed => Span::styled(block_char, Style::default().fg(PLACED_COLOR)),
                    DisplayCell::Falling => Span::styled(block_char, Style::default().fg(falling_color)),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the next piece box
fn render_next(frame: &mut Frame, area: Rect, next: Option<TetrominoType>, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(piece_type) = next {
        render_mini_piece(frame, inner, piece_type, block_char);
    }
}

/// Render a small piece preview at spawn orientation
fn render_mini_piece(frame: &mut Frame, area: Rect, piece_type: TetrominoType, block_char: &str) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    let color = piece_color(piece_type.color());
    let shape = piece_type.shape();

    let lines: Vec<Line> = (0..shape.rows())
        .map(|row| {
            let spans: Vec<Span> = (0..shape.cols())
                .map(|col| {
                    if shape.is_filled(row, col) {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_stats(frame: &mut Frame, area: Rect, state: &GameState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", state.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LEVEL", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", state.level),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", state.lines),
            Style::default().fg(Color::Green),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the leaderboard
fn render_high_scores(frame: &mut Frame, area: Rect, scores: &HighScoreTable) {
    let block = Block::default()
        .title(" HIGH SCORES ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if scores.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled("no scores yet", Style::default().fg(Color::DarkGray))),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = scores
        .entries()
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            let name: String = entry.player_name.chars().take(10).collect();
            Line::from(vec![
                Span::styled(format!("{:>2}. ", rank + 1), Style::default().fg(Color::Gray)),
                Span::styled(format!("{:<10}", name), Style::default().fg(Color::White)),
                Span::styled(format!("{:>7}", entry.score), Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for title, pause and game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
