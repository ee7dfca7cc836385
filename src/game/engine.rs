use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, Phase, Position, Snake},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the state advanced this step
    pub advanced: bool,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Score after the step
    pub score: u32,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with a deterministic food sequence
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// State at mount: start cell, heading right, food on its fixed first cell, paused
    pub fn initial_state(&self) -> GameState {
        GameState::new(
            Snake::new(self.config.start, Direction::Right),
            self.config.initial_food,
            self.config.grid_size,
        )
    }

    /// Reset the game: same as mount, except the food is relocated
    pub fn reset(&mut self) -> GameState {
        let food = self.place_food();
        GameState::new(
            Snake::new(self.config.start, Direction::Right),
            food,
            self.config.grid_size,
        )
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if state.phase != Phase::Running {
            return StepResult {
                advanced: false,
                terminated: state.is_game_over(),
                score: state.score,
                info: StepInfo::default(),
            };
        }

        // Update direction based on action (prevent 180° turns)
        if let Action::Move(new_direction) = action {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        let new_head = state.snake.next_head();
        let ate_food = new_head == state.food;

        if let Some(collision_type) = self.check_collision(state, new_head, ate_food) {
            state.phase = Phase::GameOver;
            state.steps += 1;

            return StepResult {
                advanced: true,
                terminated: true,
                score: state.score,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        state.snake.advance(ate_food);

        if ate_food {
            state.score += 1;
            state.food = self.place_food();
            debug!(score = state.score, food = ?state.food, "food eaten");
        }

        state.steps += 1;

        StepResult {
            advanced: true,
            terminated: false,
            score: state.score,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(
        &self,
        state: &GameState,
        pos: Position,
        growing: bool,
    ) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(pos, growing) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a uniformly random cell. Cells under the snake are not excluded.
    pub fn place_food(&mut self) -> Position {
        let x = self.rng.gen_range(0..self.config.grid_size) as i32;
        let y = self.rng.gen_range(0..self.config.grid_size) as i32;
        Position::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(engine: &GameEngine) -> GameState {
        let mut state = engine.initial_state();
        state.phase = Phase::Running;
        state
    }

    fn snake(cells: &[(i32, i32)], direction: Direction) -> Snake {
        let body = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        Snake::from_segments(body, direction).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let engine = GameEngine::seeded(GameConfig::default(), 1);
        let state = engine.initial_state();

        assert!(state.is_paused());
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.body, vec![Position::new(5, 5)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.food, Position::new(10, 10));
    }

    #[test]
    fn test_one_tick_without_input() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let mut state = running(&engine);

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.advanced);
        assert!(!result.terminated);
        assert_eq!(state.snake.body, vec![Position::new(6, 5)]);
        assert_eq!(state.steps, 1);
    }

    #[test]
    fn test_paused_game_does_not_advance() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let mut state = engine.initial_state();
        let before = state.clone();

        let result = engine.step(&mut state, Action::Move(Direction::Down));

        assert!(!result.advanced);
        assert!(!result.terminated);
        assert_eq!(state, before);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 7);
        let mut state = running(&engine);
        state.food = Position::new(6, 5);

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.info.ate_food);
        assert_eq!(result.score, 1);
        assert_eq!(state.score, 1);
        assert_eq!(
            state.snake.body,
            vec![Position::new(6, 5), Position::new(5, 5)]
        );
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_score_only_moves_on_food() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 3);
        let mut state = running(&engine);
        state.food = Position::new(0, 14);

        for _ in 0..5 {
            let len = state.snake.len();
            let prior_food = state.food;
            let result = engine.step(&mut state, Action::Continue);
            let ate = state.snake.head() == prior_food;
            assert_eq!(result.info.ate_food, ate);
            assert_eq!(state.snake.len(), if ate { len + 1 } else { len });
        }
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_wall_collision_right_edge() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let mut state = running(&engine);
        state.snake = Snake::new(Position::new(14, 3), Direction::Right);
        let body_before = state.snake.body.clone();

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.terminated);
        assert!(state.is_game_over());
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake.body, body_before);
    }

    #[test]
    fn test_wall_collision_left_edge() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let mut state = running(&engine);
        state.snake = Snake::new(Position::new(0, 7), Direction::Left);

        let result = engine.step(&mut state, Action::Continue);

        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.snake.head(), Position::new(0, 7));
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let mut state = running(&engine);
        state.snake = Snake::new(Position::new(0, 0), Direction::Up);
        engine.step(&mut state, Action::Continue);
        let frozen = state.clone();

        let result = engine.step(&mut state, Action::Move(Direction::Down));

        assert!(result.terminated);
        assert!(!result.advanced);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let mut state = running(&engine);
        // Hook shape: turning up from (5,6) lands on (5,5), which stays occupied
        state.snake = snake(&[(5, 6), (6, 6), (6, 5), (5, 5), (4, 5)], Direction::Left);

        let result = engine.step(&mut state, Action::Move(Direction::Up));

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_chasing_own_tail_is_allowed() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let mut state = running(&engine);
        // 2x2 loop: the head moves into the cell the tail vacates
        state.snake = snake(&[(5, 5), (5, 6), (4, 6), (4, 5)], Direction::Left);

        let result = engine.step(&mut state, Action::Continue);

        assert!(!result.terminated);
        assert_eq!(state.snake.head(), Position::new(4, 5));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_tail_blocks_when_growing() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let mut state = running(&engine);
        state.snake = snake(&[(5, 5), (5, 6), (4, 6), (4, 5)], Direction::Left);
        state.food = Position::new(4, 5);

        let result = engine.step(&mut state, Action::Continue);

        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let mut state = running(&engine);

        engine.step(&mut state, Action::Move(Direction::Left));

        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 9);
        let mut state = running(&engine);
        state.snake = Snake::new(Position::new(14, 0), Direction::Right);
        state.score = 4;
        engine.step(&mut state, Action::Continue);
        assert!(state.is_game_over());

        let state = engine.reset();

        assert!(state.is_paused());
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.body, vec![Position::new(5, 5)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_body_has_no_duplicates_while_playing() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 42);
        let mut state = running(&engine);
        let turns = [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ];

        for step in 0..200 {
            if state.is_game_over() {
                break;
            }
            // Steer towards the food, spiralling when blocked
            let head = state.snake.head();
            let wanted = if state.food.x > head.x {
                Direction::Right
            } else if state.food.x < head.x {
                Direction::Left
            } else if state.food.y > head.y {
                Direction::Down
            } else {
                Direction::Up
            };
            let action = if step % 7 == 0 {
                Action::Move(turns[step % 4])
            } else {
                Action::Move(wanted)
            };
            let score_before = state.score;
            engine.step(&mut state, action);

            assert!(state.score >= score_before);
            let mut cells = state.snake.body.clone();
            cells.sort_by_key(|p| (p.x, p.y));
            cells.dedup();
            assert_eq!(cells.len(), state.snake.len());
        }
    }
}
