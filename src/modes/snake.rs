use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use crate::game::{Direction, GameConfig, GameEngine, GameState, Phase, StepResult, TickTimer};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::notify::Toasts;
use crate::render::{Canvas, Renderer, SnakeFrame};

/// Redraw cadence, independent of the tick cadence
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// One mounted snake widget. Owns its state, its tick timer and its canvas.
pub struct SnakeMode {
    engine: GameEngine,
    state: GameState,
    pending_direction: Option<Direction>,
    timer: TickTimer,
    canvas: Canvas,
    metrics: GameMetrics,
    toasts: Toasts,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl SnakeMode {
    /// Mount a widget for `config`, refusing grids the game cannot be played on
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate().context("Invalid game configuration")?;
        Ok(Self::with_engine(GameEngine::new(config)))
    }

    pub fn with_engine(engine: GameEngine) -> Self {
        let state = engine.initial_state();
        let mut canvas = Canvas::for_config(engine.config());
        canvas.paint(&state);
        let timer = TickTimer::new(engine.config().tick_interval());

        info!(grid = state.grid_size, "snake widget mounted");

        Self {
            engine,
            state,
            pending_direction: None,
            timer,
            canvas,
            metrics: GameMetrics::new(),
            toasts: Toasts::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn is_ticking(&self) -> bool {
        self.timer.is_armed()
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, Instant::now()),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Every frame redraws; the tick timer decides whether the state advances
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    self.on_frame(now);
                    terminal.draw(|frame| {
                        let view = SnakeFrame {
                            state: &self.state,
                            canvas: &self.canvas,
                            high_score: self.metrics.high_score,
                            games_played: self.metrics.games_played,
                            elapsed: self.metrics.format_time(now),
                            toast: self.toasts.latest(),
                        };
                        self.renderer.render(frame, &view);
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

    fn handle_event(&mut self, event: Event, now: Instant) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action, now);
        }
    }

    pub fn handle_action(&mut self, action: KeyAction, now: Instant) {
        match action {
            KeyAction::Steer(direction) => {
                self.steer(direction);
            }
            KeyAction::TogglePause => {
                self.toggle_pause(now);
            }
            KeyAction::Reset => self.reset(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    /// Queue a direction for the next tick.
    ///
    /// Rejected when the game is over or when it reverses the committed direction.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.state.is_game_over() || self.state.snake.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Start or pause the game. No effect once the game is over.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        if !self.state.toggle_pause() {
            return false;
        }

        if self.state.is_running() {
            self.timer.arm();
            self.metrics.on_resume(now);
            info!(score = self.state.score, "snake resumed");
        } else {
            self.timer.cancel();
            self.metrics.on_pause(now);
            info!(score = self.state.score, "snake paused");
        }
        true
    }

    /// Back to a fresh paused game with relocated food
    pub fn reset(&mut self) {
        self.state = self.engine.reset();
        self.pending_direction = None;
        self.timer.cancel();
        self.metrics.on_reset();
        self.canvas.paint(&self.state);
        info!(food = ?self.state.food, "snake reset");
    }

    /// Per-frame driver: advance at most one tick, then repaint the canvas
    pub fn on_frame(&mut self, now: Instant) -> Option<StepResult> {
        self.toasts.prune(now);

        let mut stepped = None;
        if self.timer.poll(now) {
            let action = self.pending_direction.take().into();
            let result = self.engine.step(&mut self.state, action);

            if result.terminated && self.state.phase == Phase::GameOver {
                self.on_game_over(now);
            }
            stepped = Some(result);
        }

        self.canvas.paint(&self.state);
        stepped
    }

    fn on_game_over(&mut self, now: Instant) {
        let score = self.state.score;
        self.timer.cancel();
        self.metrics.on_game_over(score, now);
        self.toasts
            .push("Game Over!", format!("Your score: {score}"), now);
        info!(score, steps = self.state.steps, "snake game over");
    }
}

impl Drop for SnakeMode {
    fn drop(&mut self) {
        self.timer.cancel();
        info!(score = self.state.score, "snake widget unmounted");
    }
}

pub(crate) fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
