//! Step-limit truncation wrapper
//!
//! The environment itself never truncates. `TimeLimit` counts steps since
//! the last reset and flags `truncated` once the budget is spent.

use super::environment::{Info, SnakeEnvironment, Transition};
use super::observation::Observation;
use crate::game::GameError;

pub struct TimeLimit {
    env: SnakeEnvironment,
    max_steps: usize,
    elapsed_steps: usize,
}

impl TimeLimit {
    pub fn new(env: SnakeEnvironment, max_steps: usize) -> Self {
        Self {
            env,
            max_steps,
            elapsed_steps: 0,
        }
    }

    pub fn reset(&mut self, seed: Option<u64>) -> Result<(Observation, Info), GameError> {
        self.elapsed_steps = 0;
        self.env.reset(seed)
    }

    pub fn step(&mut self, action: i64) -> Result<Transition, GameError> {
        let mut transition = self.env.step(action)?;
        self.elapsed_steps += 1;
        if self.elapsed_steps >= self.max_steps && !transition.terminated {
            transition.truncated = true;
        }
        Ok(transition)
    }

    pub fn elapsed_steps(&self) -> usize {
        self.elapsed_steps
    }

    pub fn inner(&self) -> &SnakeEnvironment {
        &self.env
    }

    pub fn into_inner(self) -> SnakeEnvironment {
        self.env
    }

    pub fn close(&mut self) {
        self.env.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    #[test]
    fn test_truncates_at_limit() {
        let env = SnakeEnvironment::new(GameConfig::default()).unwrap();
        let mut limited = TimeLimit::new(env, 3);
        limited.reset(Some(0)).unwrap();

        // 16ms frames: the snake cannot move, let alone die, in 3 steps
        assert!(!limited.step(0).unwrap().truncated);
        assert!(!limited.step(0).unwrap().truncated);
        let last = limited.step(0).unwrap();
        assert!(last.truncated);
        assert!(!last.terminated);
        assert_eq!(limited.elapsed_steps(), 3);

        limited.reset(Some(0)).unwrap();
        assert_eq!(limited.elapsed_steps(), 0);
    }

    #[test]
    fn test_invalid_action_not_counted() {
        let env = SnakeEnvironment::new(GameConfig::default()).unwrap();
        let mut limited = TimeLimit::new(env, 3);
        limited.reset(Some(0)).unwrap();

        assert!(limited.step(9).is_err());
        assert_eq!(limited.elapsed_steps(), 0);
    }
}
