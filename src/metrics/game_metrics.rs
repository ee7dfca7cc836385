use std::time::{Duration, Instant};

/// Session statistics for one mounted snake widget.
///
/// The clock only runs while the game is running; pauses and game over stop it.
#[derive(Debug, Clone, Default)]
pub struct GameMetrics {
    played: Duration,
    running_since: Option<Instant>,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn on_pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.played += now.saturating_duration_since(since);
        }
    }

    pub fn on_game_over(&mut self, final_score: u32, now: Instant) {
        self.on_pause(now);
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    /// A reset starts a fresh game clock; session records are kept
    pub fn on_reset(&mut self) {
        self.played = Duration::ZERO;
        self.running_since = None;
    }

    /// Running time of the current game
    pub fn elapsed(&self, now: Instant) -> Duration {
        let running = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.played + running
    }

    pub fn format_time(&self, now: Instant) -> String {
        let total_secs = self.elapsed(now).as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let start = Instant::now();
        let mut metrics = GameMetrics::new();
        assert_eq!(metrics.format_time(start), "00:00");

        metrics.on_resume(start);
        assert_eq!(metrics.format_time(start + Duration::from_secs(125)), "02:05");
        assert_eq!(metrics.format_time(start + Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_clock_stops_while_paused() {
        let start = Instant::now();
        let mut metrics = GameMetrics::new();

        metrics.on_resume(start);
        metrics.on_pause(start + Duration::from_secs(10));
        assert_eq!(
            metrics.elapsed(start + Duration::from_secs(60)),
            Duration::from_secs(10)
        );

        metrics.on_resume(start + Duration::from_secs(60));
        assert_eq!(
            metrics.elapsed(start + Duration::from_secs(65)),
            Duration::from_secs(15)
        );
    }

    #[test]
    fn test_high_score_tracking() {
        let now = Instant::now();
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10, now);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5, now);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(15, now);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_reset_clears_clock_only() {
        let start = Instant::now();
        let mut metrics = GameMetrics::new();
        metrics.on_resume(start);
        metrics.on_game_over(4, start + Duration::from_secs(30));

        metrics.on_reset();

        assert_eq!(metrics.elapsed(start + Duration::from_secs(40)), Duration::ZERO);
        assert_eq!(metrics.high_score, 4);
    }
}
