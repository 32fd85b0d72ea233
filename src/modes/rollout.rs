//! Rollout mode
//!
//! Runs episodes against `SnakeEnvironment` with a seeded uniform-random
//! policy, standing in for an external agent. Useful for smoke-testing the
//! environment contract and for reward baselines.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::GameConfig;
use crate::metrics::EpisodeStats;
use crate::rl::{SnakeEnvironment, TimeLimit, ACTION_COUNT};

/// Configuration for rollout mode
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    pub num_episodes: usize,
    /// Steps before an episode is truncated
    pub max_steps: usize,
    /// Base seed; episode `i` resets with `seed + i`
    pub seed: u64,
    /// Log a summary every N episodes
    pub log_frequency: usize,
    pub game_config: GameConfig,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            num_episodes: 10,
            max_steps: 5_000,
            seed: 0,
            log_frequency: 10,
            game_config: GameConfig::default(),
        }
    }
}

/// Outcome of a single episode
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeReport {
    pub total_reward: f32,
    pub steps: usize,
    pub score: u32,
    pub terminated: bool,
    pub truncated: bool,
}

pub struct RolloutMode {
    config: RolloutConfig,
    env: TimeLimit,
    policy_rng: StdRng,
    stats: EpisodeStats,
}

impl RolloutMode {
    pub fn new(config: RolloutConfig) -> Result<Self> {
        let env = SnakeEnvironment::new(config.game_config.clone())
            .context("Invalid game configuration")?;
        let policy_rng = StdRng::seed_from_u64(config.seed.wrapping_add(u64::MAX / 2));

        Ok(Self {
            env: TimeLimit::new(env, config.max_steps.max(1)),
            policy_rng,
            stats: EpisodeStats::new(100),
            config,
        })
    }

    pub fn run(&mut self) -> Result<&EpisodeStats> {
        info!(
            "rollout: {} episodes, max {} steps, seed {}",
            self.config.num_episodes, self.config.max_steps, self.config.seed
        );

        for episode in 0..self.config.num_episodes {
            let seed = self.config.seed.wrapping_add(episode as u64);
            let report = self.run_episode(seed)?;
            debug!("episode {}: {:?}", episode, report);

            self.stats
                .record_episode(report.total_reward, report.steps, report.score);

            let log_frequency = self.config.log_frequency.max(1);
            if (episode + 1) % log_frequency == 0 {
                info!("{}", self.stats.format_summary());
            }
        }

        self.env.close();
        Ok(&self.stats)
    }

    pub fn run_episode(&mut self, seed: u64) -> Result<EpisodeReport> {
        self.env
            .reset(Some(seed))
            .with_context(|| format!("Failed to reset episode with seed {seed}"))?;

        let mut report = EpisodeReport {
            total_reward: 0.0,
            steps: 0,
            score: 0,
            terminated: false,
            truncated: false,
        };

        while !(report.terminated || report.truncated) {
            let action = self.policy_rng.gen_range(0..ACTION_COUNT as i64);
            let transition = self.env.step(action).context("Environment step failed")?;

            report.total_reward += transition.reward;
            report.steps += 1;
            report.score = transition.info.score;
            report.terminated = transition.terminated;
            report.truncated = transition.truncated;
        }

        Ok(report)
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> RolloutConfig {
        RolloutConfig {
            num_episodes: 3,
            max_steps: 2_000,
            seed: 17,
            log_frequency: 1,
            game_config: GameConfig::small(),
        }
    }

    #[test]
    fn test_episode_ends() {
        let mut mode = RolloutMode::new(small_config()).unwrap();
        let report = mode.run_episode(17).unwrap();

        assert!(report.terminated || report.truncated);
        assert!(report.steps <= 2_000);
    }

    #[test]
    fn test_run_records_every_episode() {
        let mut mode = RolloutMode::new(small_config()).unwrap();
        let stats = mode.run().unwrap();
        assert_eq!(stats.total_episodes(), 3);
    }

    #[test]
    fn test_rollouts_are_reproducible() {
        let a = RolloutMode::new(small_config()).unwrap().run_episode(5).unwrap();
        let b = RolloutMode::new(small_config()).unwrap().run_episode(5).unwrap();
        assert_eq!(a, b);
    }
}
