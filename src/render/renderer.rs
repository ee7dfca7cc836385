use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::canvas::{Canvas, Rgb};
use crate::game::{GameState, Phase, Position};
use crate::notify::Toast;

/// Everything one snake frame is drawn from
pub struct SnakeFrame<'a> {
    pub state: &'a GameState,
    pub canvas: &'a Canvas,
    pub high_score: u32,
    pub games_played: u32,
    pub elapsed: String,
    pub toast: Option<&'a Toast>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &SnakeFrame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Toast
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Status
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        if let Some(toast) = view.toast {
            frame.render_widget(render_toast(toast), chunks[1]);
        }

        let (width, height) = grid_extent(view.state.grid_size);
        let grid_area = centered(chunks[2], width, height);
        frame.render_widget(self.render_grid(view), grid_area);

        if let Some(status) = status_text(view.state) {
            let style = match view.state.phase {
                Phase::GameOver => Style::default().fg(Color::Red),
                _ => Style::default().fg(Color::Gray),
            };
            frame.render_widget(
                Paragraph::new(Span::styled(status, style)).alignment(Alignment::Center),
                chunks[3],
            );
        }

        frame.render_widget(self.render_controls(view.state), chunks[4]);
    }

    /// One two-column block per cell, coloured from the canvas
    fn render_grid(&self, view: &SnakeFrame<'_>) -> Paragraph<'_> {
        let size = view.state.grid_size;
        let mut lines = Vec::with_capacity(size);

        for y in 0..size {
            let spans: Vec<Span> = (0..size)
                .map(|x| {
                    let color = view
                        .canvas
                        .cell_color(Position::new(x as i32, y as i32))
                        .map(to_color)
                        .unwrap_or(Color::Reset);
                    Span::styled("██", Style::default().fg(color))
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, view: &SnakeFrame<'_>) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.games_played.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.elapsed.clone(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let pause_label = match state.phase {
            Phase::Running => " pause | ",
            _ => " start | ",
        };
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(pause_label),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Hint shown under the grid for the current phase
pub fn status_text(state: &GameState) -> Option<&'static str> {
    match state.phase {
        Phase::Paused => Some("Press Space to play. Use arrow keys to move."),
        Phase::GameOver => Some("Game Over! Press R to play again."),
        Phase::Running => None,
    }
}

pub(crate) fn render_toast(toast: &Toast) -> Paragraph<'_> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            toast.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(toast.description.as_str()),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta)),
    )
}

/// Terminal columns and rows taken by a bordered grid, two columns per cell
fn grid_extent(grid_size: usize) -> (u16, u16) {
    let side = u16::try_from(grid_size).unwrap_or(u16::MAX);
    (
        side.saturating_mul(2).saturating_add(2),
        side.saturating_add(2),
    )
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Centre a `width` x `height` box inside `area`
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
