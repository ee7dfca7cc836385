use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::state::Position;

/// Largest grid the terminal view is laid out for
pub const MAX_GRID_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size {0} is outside 1..={max}", max = MAX_GRID_SIZE)]
    GridSize(usize),
    #[error("cell size must be at least one pixel")]
    CellSize,
    #[error("{what} {pos:?} lies outside a {grid_size}x{grid_size} grid")]
    OffGrid {
        what: &'static str,
        pos: Position,
        grid_size: usize,
    },
}

/// Configuration for the snake widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid, in cells
    pub grid_size: usize,
    /// Side length of one cell on the canvas, in pixels
    pub cell_size: usize,
    /// Milliseconds between two simulation ticks
    pub tick_interval_ms: u64,
    /// Cell the single-segment snake starts on after mount and reset
    pub start: Position,
    /// Food cell at mount, before the first relocation
    pub initial_food: Position,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 15,
            cell_size: 20,
            tick_interval_ms: 200,
            start: Position::new(5, 5),
            initial_food: Position::new(10, 10),
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    pub fn with_tick_interval(mut self, millis: u64) -> Self {
        self.tick_interval_ms = millis;
        self
    }

    /// Reject grids that cannot hold the start cell and the first food
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if self.cell_size == 0 {
            return Err(ConfigError::CellSize);
        }
        for (what, pos) in [("start cell", self.start), ("initial food", self.initial_food)] {
            if !self.contains(pos) {
                return Err(ConfigError::OffGrid {
                    what,
                    pos,
                    grid_size: self.grid_size,
                });
            }
        }
        Ok(())
    }

    fn contains(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Canvas side length in pixels
    pub fn canvas_size(&self) -> usize {
        self.grid_size * self.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 15);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
        assert_eq!(config.start, Position::new(5, 5));
        assert_eq!(config.canvas_size(), 300);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(20).with_tick_interval(100);
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.canvas_size(), 400);
    }

    #[test]
    fn test_smallest_playable_grid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert_eq!(GameConfig::new(11).validate(), Ok(()));
        assert_eq!(GameConfig::new(MAX_GRID_SIZE).validate(), Ok(()));
    }

    #[test]
    fn test_grid_too_small_for_first_food() {
        let err = GameConfig::new(8).validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::OffGrid {
                what: "initial food",
                pos: Position::new(10, 10),
                grid_size: 8,
            }
        );
    }

    #[test]
    fn test_grid_too_small_for_start() {
        assert!(matches!(
            GameConfig::new(4).validate(),
            Err(ConfigError::OffGrid {
                what: "start cell",
                ..
            })
        ));
    }

    #[test]
    fn test_grid_size_bounds() {
        assert_eq!(GameConfig::new(0).validate(), Err(ConfigError::GridSize(0)));
        assert_eq!(
            GameConfig::new(MAX_GRID_SIZE + 1).validate(),
            Err(ConfigError::GridSize(MAX_GRID_SIZE + 1))
        );

        let mut config = GameConfig::default();
        config.cell_size = 0;
        assert_eq!(config.validate(), Err(ConfigError::CellSize));
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
