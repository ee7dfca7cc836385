//! Snake game logic.
//!
//! Pure simulation without any terminal or rendering dependencies: the grid model,
//! the per-tick step, and the tick timer that paces it.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;
pub mod ticker;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{ConfigError, GameConfig, MAX_GRID_SIZE};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use state::{CollisionType, GameState, Phase, Position, Snake};
pub use ticker::TickTimer;
