use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use snake_sim::game::GameConfig;
use snake_sim::modes::{HumanMode, RolloutConfig, RolloutMode};

#[derive(Parser)]
#[command(name = "snake_sim")]
#[command(version, about = "Grid snake simulation: play it or roll out a random agent")]
struct Cli {
    #[arg(long, value_enum, default_value = "human")]
    mode: Mode,

    /// JSON game config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Seed for reproducible episodes
    #[arg(long)]
    seed: Option<u64>,

    /// Episodes to run in rollout mode
    #[arg(long, default_value = "10")]
    episodes: usize,

    /// Step limit per episode in rollout mode
    #[arg(long, default_value = "5000")]
    max_steps: usize,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Run seeded random-policy episodes against the RL environment
    Rollout,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.game_config()?;

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.seed)?;
            human_mode.run().await?;
        }
        Mode::Rollout => {
            let rollout_config = RolloutConfig {
                num_episodes: cli.episodes,
                max_steps: cli.max_steps,
                seed: cli.seed.unwrap_or(0),
                game_config: config,
                ..Default::default()
            };
            let mut rollout = RolloutMode::new(rollout_config)?;
            let stats = rollout.run()?;
            println!("{}", stats.format_summary());
        }
    }

    Ok(())
}
