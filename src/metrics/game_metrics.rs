use std::time::{Duration, Instant};

/// Session bookkeeping for interactive play
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub longest_snake: usize,
    pub games_played: u32,
    /// Set once the current game's end has been recorded
    recorded_game_over: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            longest_snake: 0,
            games_played: 0,
            recorded_game_over: false,
        }
    }

    /// Refresh elapsed time; frozen once the game is over
    pub fn update(&mut self) {
        if !self.recorded_game_over {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.recorded_game_over = false;
    }

    /// Record a finished game; repeated calls for the same game are ignored
    pub fn on_game_over(&mut self, final_score: u32, final_length: usize) {
        if self.recorded_game_over {
            return;
        }
        self.recorded_game_over = true;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
        self.longest_snake = self.longest_snake.max(final_length);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
