use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the snake widget to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Proposed direction for the next tick
    Steer(Direction),
    TogglePause,
    Reset,
    Quit,
    None,
}

/// What a key press asks the todo widget to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoKeyAction {
    Insert(char),
    Backspace,
    Submit,
    SelectPrevious,
    SelectNext,
    ToggleSelected,
    DeleteSelected,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if is_ctrl_c(&key) {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Reset,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Todo keys: letters go to the input line, so only Esc and Ctrl+C quit
    pub fn handle_todo_key_event(&self, key: KeyEvent) -> TodoKeyAction {
        if is_ctrl_c(&key) {
            return TodoKeyAction::Quit;
        }

        match key.code {
            KeyCode::Esc => TodoKeyAction::Quit,
            KeyCode::Enter => TodoKeyAction::Submit,
            KeyCode::Backspace => TodoKeyAction::Backspace,
            KeyCode::Up => TodoKeyAction::SelectPrevious,
            KeyCode::Down => TodoKeyAction::SelectNext,
            KeyCode::Tab => TodoKeyAction::ToggleSelected,
            KeyCode::Delete => TodoKeyAction::DeleteSelected,
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                TodoKeyAction::Insert(c)
            }
            _ => TodoKeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
