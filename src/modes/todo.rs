use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use super::snake::cleanup_terminal;
use crate::input::{InputHandler, TodoKeyAction};
use crate::notify::Toasts;
use crate::render::{TodoFrame, TodoView};
use crate::todo::{KeyValueStorage, TodoList};

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// One mounted todo widget, persisting through the injected storage
pub struct TodoMode<S: KeyValueStorage> {
    list: TodoList<S>,
    input: String,
    selected: Option<usize>,
    toasts: Toasts,
    view: TodoView,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<S: KeyValueStorage> TodoMode<S> {
    /// Mount the widget, loading the stored list
    pub fn new(storage: S) -> Result<Self> {
        let list = TodoList::load(storage).context("Failed to load todo list")?;
        let selected = (!list.is_empty()).then_some(0);
        info!(count = list.len(), "todo widget mounted");

        Ok(Self {
            list,
            input: String::new(),
            selected,
            toasts: Toasts::new(),
            view: TodoView::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub fn list(&self) -> &TodoList<S> {
        &self.list
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_loop(&mut terminal).await;

        cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, Instant::now())?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = frame_timer.tick() => {
                    self.toasts.prune(Instant::now());
                    terminal.draw(|frame| {
                        let view = TodoFrame {
                            items: self.list.items(),
                            input: &self.input,
                            selected: self.selected,
                            toast: self.toasts.latest(),
                        };
                        self.view.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, now: Instant) -> Result<()> {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_todo_key_event(key);
            self.handle_action(action, now)?;
        }
        Ok(())
    }

    pub fn handle_action(&mut self, action: TodoKeyAction, now: Instant) -> Result<()> {
        match action {
            TodoKeyAction::Insert(c) => self.input.push(c),
            TodoKeyAction::Backspace => {
                self.input.pop();
            }
            TodoKeyAction::Submit => self.submit(now)?,
            TodoKeyAction::SelectPrevious => self.move_selection(-1),
            TodoKeyAction::SelectNext => self.move_selection(1),
            TodoKeyAction::ToggleSelected => self.toggle_selected()?,
            TodoKeyAction::DeleteSelected => self.delete_selected(now)?,
            TodoKeyAction::Quit => self.should_quit = true,
            TodoKeyAction::None => {}
        }
        Ok(())
    }

    /// Add the input line as a new item and clear it. Blank input stays as typed.
    fn submit(&mut self, now: Instant) -> Result<()> {
        let added = self
            .list
            .add(&self.input)
            .context("Failed to save todo list")?
            .map(|item| item.text.clone());

        if let Some(text) = added {
            self.toasts
                .push("Todo added", format!("\"{text}\" added to your list."), now);
            self.input.clear();
            self.selected = Some(self.list.len() - 1);
        }
        Ok(())
    }

    fn toggle_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_id() else {
            return Ok(());
        };
        self.list.toggle(&id).context("Failed to save todo list")?;
        Ok(())
    }

    fn delete_selected(&mut self, now: Instant) -> Result<()> {
        let Some(id) = self.selected_id() else {
            return Ok(());
        };

        if let Some(removed) = self.list.remove(&id).context("Failed to save todo list")? {
            self.toasts.push(
                "Todo removed",
                format!("\"{}\" removed from your list.", removed.text),
                now,
            );
        }

        self.selected = match (self.selected, self.list.len()) {
            (_, 0) => None,
            (Some(index), len) => Some(index.min(len - 1)),
            (None, _) => Some(0),
        };
        Ok(())
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.list.len();
        if len == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as isize;
        self.selected = Some((current + offset).clamp(0, len as isize - 1) as usize);
    }

    fn selected_id(&self) -> Option<String> {
        self.selected
            .and_then(|index| self.list.items().get(index))
            .map(|item| item.id.clone())
    }
}

impl<S: KeyValueStorage> Drop for TodoMode<S> {
    fn drop(&mut self) {
        info!(count = self.list.len(), "todo widget unmounted");
    }
}
