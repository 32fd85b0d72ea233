use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::time::Duration;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    error::GameError,
    food::FoodSpawner,
    state::{CollisionType, EpisodeStatus, GameState, GridSize, Snake},
};

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the clock triggered a logical move this step
    pub moved: bool,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Whether food could not be relocated because every cell is snake
    pub board_full: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Reward for this step (for RL training)
    pub reward: f32,
    /// Whether the episode has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The simulation core shared by the interactive loop and the RL environment
pub struct GameEngine {
    config: GameConfig,
    grid: GridSize,
    spawner: FoodSpawner,
    rng: Option<StdRng>,
    state: Option<GameState>,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let grid = config.grid();
        Ok(Self {
            config,
            grid,
            spawner: FoodSpawner::new(grid),
            rng: None,
            state: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Current state, if the engine has been reset
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> Option<&mut GameState> {
        self.state.as_mut()
    }

    /// Start a new episode
    ///
    /// `Some(seed)` reseeds the generator, making the episode reproducible.
    /// `None` keeps drawing from the current generator, seeding one from OS
    /// entropy the first time.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<&GameState, GameError> {
        let mut rng = match (seed, self.rng.take()) {
            (Some(seed), _) => StdRng::seed_from_u64(seed),
            (None, Some(rng)) => rng,
            (None, None) => StdRng::from_entropy(),
        };

        let center = self.grid.center();
        let direction = *Direction::ALL
            .choose(&mut rng)
            .unwrap_or(&Direction::Right);

        let snake = match self.state.take() {
            Some(GameState { mut snake, .. }) => {
                snake.reset(center, direction);
                snake
            }
            None => Snake::new(center, direction, self.config.movement_clock()),
        };

        let food = self.spawner.spawn(&mut rng, snake.cells());
        self.rng = Some(rng);
        let food = food?;

        debug!(
            "reset: seed={:?} head=({}, {}) direction={:?} food=({}, {})",
            seed, center.col, center.row, direction, food.col, food.row
        );

        Ok(&*self.state.insert(GameState::new(snake, food, self.grid)))
    }

    /// Execute one step of the game
    ///
    /// `delta` is the caller's elapsed time since the previous step; it only
    /// decides whether the snake moves, never how far.
    pub fn step(&mut self, action: Action, delta: Duration) -> Result<StepResult, GameError> {
        let (state, rng) = match (self.state.as_mut(), self.rng.as_mut()) {
            (Some(state), Some(rng)) => (state, rng),
            _ => return Err(GameError::UninitializedState),
        };

        if state.status.is_terminal() {
            return Ok(StepResult {
                reward: 0.0,
                terminated: true,
                info: StepInfo::default(),
            });
        }

        if let Action::Move(direction) = action {
            state.snake.change_direction(direction);
        }

        let moved = state.snake.update(delta);
        let collision_type = state.snake.collision(self.grid);

        let mut reward = self.config.step_penalty;
        let mut step_info = StepInfo {
            moved,
            collision_type,
            ..Default::default()
        };

        let ate_food = state.food.is_some_and(|food| state.snake.eats(food));
        if ate_food {
            reward += self.config.food_reward;
            state.snake.grow();
            state.score.increase();
            step_info.ate_food = true;

            match self.spawner.spawn(rng, state.snake.cells()) {
                Ok(cell) => state.food = Some(cell),
                Err(GameError::BoardFull) => {
                    info!(
                        "board full after {} steps, score {}",
                        state.steps + 1,
                        state.score.value()
                    );
                    state.food = None;
                    state.status = EpisodeStatus::BoardFull;
                    step_info.board_full = true;
                }
                Err(err) => return Err(err),
            }
        } else if collision_type.is_some() {
            reward += self.config.death_penalty;
        }

        if let Some(collision) = collision_type {
            state.status = EpisodeStatus::Collided(collision);
            debug!(
                "episode ended: {:?} after {} steps, score {}",
                collision,
                state.steps + 1,
                state.score.value()
            );
        }

        state.steps += 1;

        Ok(StepResult {
            reward,
            terminated: state.status.is_terminal(),
            info: step_info,
        })
    }
}
