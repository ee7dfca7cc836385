use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListState, Paragraph},
    Frame,
};

use super::renderer::render_toast;
use crate::notify::Toast;
use crate::todo::TodoItem;

pub const EMPTY_HINT: &str = "No todos yet. Add some!";
pub const INPUT_PLACEHOLDER: &str = "Add a new task...";

pub struct TodoFrame<'a> {
    pub items: &'a [TodoItem],
    pub input: &'a str,
    pub selected: Option<usize>,
    pub toast: Option<&'a Toast>,
}

pub struct TodoView;

impl TodoView {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &TodoFrame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Min(0),    // List
                Constraint::Length(4), // Toast
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_input(view.input), chunks[0]);
        self.render_list(frame, view, chunks[1]);

        if let Some(toast) = view.toast {
            frame.render_widget(render_toast(toast), chunks[2]);
        }

        frame.render_widget(self.render_controls(), chunks[3]);
    }

    /// The list scrolls so the selected item stays in view
    fn render_list(&self, frame: &mut Frame, view: &TodoFrame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Todo ");

        if view.items.is_empty() {
            let hint = Paragraph::new(Span::styled(
                EMPTY_HINT,
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let list = List::new(item_lines(view.items))
            .block(block)
            .highlight_symbol("> ")
            .highlight_style(Style::default().add_modifier(Modifier::BOLD));
        let mut state = ListState::default().with_selected(view.selected);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_input<'a>(&self, input: &'a str) -> Paragraph<'a> {
        let line = if input.is_empty() {
            Line::from(Span::styled(
                INPUT_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(vec![Span::raw(input), Span::styled("▏", Style::default().fg(Color::Cyan))])
        };

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" add | "),
            Span::styled("↑↓", Style::default().fg(Color::Cyan)),
            Span::raw(" select | "),
            Span::styled("Tab", Style::default().fg(Color::Green)),
            Span::raw(" toggle | "),
            Span::styled("Del", Style::default().fg(Color::Red)),
            Span::raw(" remove | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center)
    }
}

impl Default for TodoView {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per item, a check box and the text, struck through when completed
pub fn item_lines(items: &[TodoItem]) -> Vec<Line<'_>> {
    items
        .iter()
        .map(|item| {
            let (check, text_style) = if item.completed {
                (
                    "[x] ",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ] ", Style::default())
            };
            Line::from(vec![
                Span::raw(check),
                Span::styled(item.text.as_str(), text_style),
            ])
        })
        .collect()
}
