use log::debug;
use serde::Serialize;
use std::time::Duration;

use super::observation::{encode_grid, Observation};
use crate::game::{
    Action, CollisionType, Direction, GameConfig, GameEngine, GameError, GameState, StepInfo,
};

/// Number of discrete actions: 0 = Up, 1 = Down, 2 = Left, 3 = Right
pub const ACTION_COUNT: usize = 4;

/// Auxiliary data returned alongside every observation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Info {
    pub score: u32,
    pub snake_length: usize,
    pub steps: u32,
    pub moved: bool,
    pub ate_food: bool,
    pub collision: Option<CollisionType>,
    pub board_full: bool,
}

impl Info {
    fn from_state(state: &GameState, step: &StepInfo) -> Self {
        Self {
            score: state.score.value(),
            snake_length: state.snake.len(),
            steps: state.steps,
            moved: step.moved,
            ate_food: step.ate_food,
            collision: step.collision_type,
            board_full: step.board_full,
        }
    }
}

/// Everything `step` hands back to the agent
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub observation: Observation,
    pub reward: f32,
    pub terminated: bool,
    /// Always false here; step limits belong to wrappers such as `TimeLimit`
    pub truncated: bool,
    pub info: Info,
}

/// Snake environment for reinforcement learning
///
/// Wraps the game engine and provides a gym-style interface with:
/// - Integer grid observations (see `observation`)
/// - Discrete action space (4 actions: Up, Down, Left, Right)
/// - Seeded, reproducible `reset`
pub struct SnakeEnvironment {
    engine: GameEngine,
    frame_delta: Duration,
    closed: bool,
}

impl SnakeEnvironment {
    /// Create a new Snake environment; call `reset` before stepping
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let frame_delta = config.frame_delta();
        Ok(Self {
            engine: GameEngine::new(config)?,
            frame_delta,
            closed: false,
        })
    }

    /// Reset the environment and return the initial observation
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(Observation, Info), GameError> {
        self.closed = false;
        let state = self.engine.reset(seed)?;
        Ok((encode_grid(state), Info::from_state(state, &StepInfo::default())))
    }

    /// Step with the configured frame delta
    pub fn step(&mut self, action: i64) -> Result<Transition, GameError> {
        self.step_with_delta(action, self.frame_delta)
    }

    /// Step the environment with a discrete action and the caller's elapsed time
    ///
    /// Actions:
    /// - 0: Up
    /// - 1: Down
    /// - 2: Left
    /// - 3: Right
    ///
    /// Anything else is `InvalidAction` and leaves the episode untouched.
    pub fn step_with_delta(&mut self, action: i64, delta: Duration) -> Result<Transition, GameError> {
        let direction = Direction::try_from(action)?;
        if self.closed {
            return Err(GameError::UninitializedState);
        }

        let result = self.engine.step(Action::Move(direction), delta)?;
        let state = self.engine.state().ok_or(GameError::UninitializedState)?;

        if result.terminated && (result.info.collision_type.is_some() || result.info.board_full) {
            debug!(
                "terminal transition: reward={} score={} length={}",
                result.reward,
                state.score.value(),
                state.snake.len()
            );
        }

        Ok(Transition {
            observation: encode_grid(state),
            reward: result.reward,
            terminated: result.terminated,
            truncated: false,
            info: Info::from_state(state, &result.info),
        })
    }

    /// Get current observation without stepping
    pub fn observation(&self) -> Result<Observation, GameError> {
        self.state().map(encode_grid)
    }

    /// Get reference to current game state (read-only, for renderers)
    pub fn state(&self) -> Result<&GameState, GameError> {
        if self.closed {
            return Err(GameError::UninitializedState);
        }
        self.engine.state().ok_or(GameError::UninitializedState)
    }

    /// `(rows, cols)`
    pub fn observation_shape(&self) -> (usize, usize) {
        let grid = self.engine.grid();
        (grid.rows as usize, grid.cols as usize)
    }

    pub fn action_count(&self) -> usize {
        ACTION_COUNT
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Release the episode; stepping fails until the next `reset`
    pub fn close(&mut self) {
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, EpisodeStatus};
    use crate::rl::observation::{FOOD, HEAD};

    const STEP_PENALTY: f32 = -0.01;
    const EAT_BONUS: f32 = 1.0;
    const RIGHT: i64 = 3;
    const LEFT: i64 = 2;

    fn move_now() -> Duration {
        Duration::from_millis(300)
    }

    fn env() -> SnakeEnvironment {
        SnakeEnvironment::new(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_reset_returns_valid_observation() {
        let mut env = env();
        let (obs, info) = env.reset(Some(42)).unwrap();

        assert_eq!(obs.shape(), (15, 20));
        assert_eq!(env.observation_shape(), (15, 20));
        assert_eq!(obs.get(Cell::new(10, 7)), Some(HEAD));
        assert_eq!(obs.count(FOOD), 1);
        assert_eq!(info.score, 0);
        assert_eq!(info.snake_length, 1);
    }

    #[test]
    fn test_step_before_reset() {
        let mut env = env();
        assert_eq!(env.step(RIGHT), Err(GameError::UninitializedState));
        assert_eq!(env.observation(), Err(GameError::UninitializedState));
    }

    #[test]
    fn test_invalid_action_leaves_state_unchanged() {
        let mut env = env();
        env.reset(Some(7)).unwrap();
        let before = env.state().unwrap().clone();

        assert_eq!(env.step(4), Err(GameError::InvalidAction(4)));
        assert_eq!(env.step(-1), Err(GameError::InvalidAction(-1)));
        assert_eq!(env.state().unwrap(), &before);
    }

    #[test]
    fn test_rightward_trajectory_from_center() {
        let mut env = env();
        env.reset(Some(42)).unwrap();
        {
            // Pin the heading and move food out of the way so the path is clean
            let state = env.engine.state_mut().unwrap();
            state.snake.reset(Cell::new(10, 7), Direction::Right);
            state.food = Some(Cell::new(0, 0));
        }

        let mut heads = vec![env.state().unwrap().snake.head().cell];
        for _ in 0..5 {
            let t = env.step_with_delta(RIGHT, move_now()).unwrap();
            assert_eq!(t.reward, STEP_PENALTY);
            assert!(!t.terminated);
            assert!(!t.truncated);
            heads.push(env.state().unwrap().snake.head().cell);
        }

        let expected: Vec<Cell> = (10..=15).map(|col| Cell::new(col, 7)).collect();
        assert_eq!(heads, expected);
    }

    #[test]
    fn test_reversal_request_ignored() {
        let mut env = env();
        env.reset(Some(42)).unwrap();
        env.engine
            .state_mut()
            .unwrap()
            .snake
            .reset(Cell::new(10, 7), Direction::Right);

        env.step_with_delta(LEFT, move_now()).unwrap();

        let snake = &env.state().unwrap().snake;
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head().cell, Cell::new(11, 7));
    }

    #[test]
    fn test_food_reward() {
        let mut env = env();
        env.reset(Some(11)).unwrap();
        {
            let state = env.engine.state_mut().unwrap();
            state.snake.reset(Cell::new(10, 7), Direction::Right);
            state.food = Some(Cell::new(11, 7));
        }

        let t = env.step_with_delta(RIGHT, move_now()).unwrap();

        assert!((t.reward - (STEP_PENALTY + EAT_BONUS)).abs() < 1e-6);
        assert!(t.info.ate_food);
        assert_eq!(t.info.score, 1);
        assert_eq!(t.info.snake_length, 2);
        let state = env.state().unwrap();
        let food = state.food.unwrap();
        assert_ne!(food, Cell::new(11, 7));
        assert!(!state.is_occupied_by_snake(food));
        assert_eq!(t.observation.get(food), Some(FOOD));
    }

    #[test]
    fn test_wall_collision_on_left_edge() {
        let mut env = env();
        env.reset(Some(3)).unwrap();
        {
            let state = env.engine.state_mut().unwrap();
            state.snake.reset(Cell::new(0, 4), Direction::Left);
            state.food = Some(Cell::new(10, 10));
        }

        // Below the interval: no move, still alive at column 0
        let t = env.step_with_delta(LEFT, Duration::from_millis(100)).unwrap();
        assert!(!t.terminated);

        let t = env.step_with_delta(LEFT, Duration::from_millis(200)).unwrap();
        assert!(t.terminated);
        assert_eq!(t.info.collision, Some(CollisionType::Wall));
        assert!((t.reward - (STEP_PENALTY - 10.0)).abs() < 1e-5);
        assert_eq!(
            env.state().unwrap().status,
            EpisodeStatus::Collided(CollisionType::Wall)
        );
    }

    #[test]
    fn test_terminated_is_absorbing() {
        let mut env = env();
        env.reset(Some(3)).unwrap();
        env.engine
            .state_mut()
            .unwrap()
            .snake
            .reset(Cell::new(0, 4), Direction::Left);
        assert!(env.step_with_delta(LEFT, move_now()).unwrap().terminated);

        let t = env.step_with_delta(RIGHT, move_now()).unwrap();
        assert!(t.terminated);
        assert_eq!(t.reward, 0.0);

        let (_, info) = env.reset(None).unwrap();
        assert_eq!(info.snake_length, 1);
        assert!(!env.step(RIGHT).unwrap().terminated);
    }

    #[test]
    fn test_default_step_uses_frame_delta() {
        let mut env = env();
        env.reset(Some(9)).unwrap();

        let t = env.step(RIGHT).unwrap();
        assert!(!t.info.moved);
        assert_eq!(env.state().unwrap().snake.clock().elapsed(), Duration::from_millis(16));
    }

    #[test]
    fn test_close_then_reset() {
        let mut env = env();
        env.reset(Some(1)).unwrap();
        env.close();

        assert_eq!(env.step(RIGHT), Err(GameError::UninitializedState));
        assert!(env.reset(Some(1)).is_ok());
        assert!(env.step(RIGHT).is_ok());
    }

    #[test]
    fn test_same_seed_same_episode() {
        let actions = [3, 3, 0, 0, 2, 1, 1, 3, 0, 2];
        let run = |seed| {
            let mut env = env();
            let (first, _) = env.reset(Some(seed)).unwrap();
            let mut observations = vec![first];
            for &a in actions.iter().cycle().take(400) {
                let t = env.step_with_delta(a, Duration::from_millis(100)).unwrap();
                observations.push(t.observation);
                if t.terminated {
                    break;
                }
            }
            observations
        };

        assert_eq!(run(2024), run(2024));
    }
}
