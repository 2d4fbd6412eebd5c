use std::collections::VecDeque;

use crate::game::Stone;

/// Result of a single learning episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeResult {
    pub winner: Option<Stone>,
    pub learner: Stone,
    pub game_length: usize,
    pub mean_td_error: f32,
}

impl EpisodeResult {
    pub fn learner_won(&self) -> bool {
        self.winner == Some(self.learner)
    }

    pub fn learner_lost(&self) -> bool {
        self.winner == Some(self.learner.other())
    }
}

/// Training metrics tracker with rolling window computations.
pub struct TrainingMetrics {
    episode_results: VecDeque<EpisodeResult>,
    capacity: usize,
    total_episodes: usize, // lifetime count, never capped
    total_wins: usize,
}

impl TrainingMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        TrainingMetrics {
            episode_results: VecDeque::with_capacity(capacity),
            capacity,
            total_episodes: 0,
            total_wins: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_episode(&mut self, result: EpisodeResult) {
        self.total_episodes += 1;
        if result.learner_won() {
            self.total_wins += 1;
        }
        self.episode_results.push_back(result);
        if self.episode_results.len() > self.capacity {
            self.episode_results.pop_front();
        }
    }

    fn rate(&self, last_n: usize, keep: impl Fn(&EpisodeResult) -> bool) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .filter(|&r| keep(r))
            .count();
        hits as f32 / n as f32
    }

    /// Learner win rate in the last N episodes.
    pub fn win_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, EpisodeResult::learner_won)
    }

    pub fn loss_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, EpisodeResult::learner_lost)
    }

    /// Draw rate in the last N episodes.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner.is_none())
    }

    /// Average game length over the last N episodes.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.game_length)
            .sum();
        total as f32 / n as f32
    }

    /// Mean absolute TD error over the last N episodes.
    pub fn average_td_error(&self, last_n: usize) -> f32 {
        let n = self.episode_results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let sum: f32 = self
            .episode_results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.mean_td_error)
            .sum();
        sum / n as f32
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    /// Lifetime learner win rate
    pub fn overall_win_rate(&self) -> f32 {
        if self.total_episodes == 0 {
            return 0.0;
        }
        self.total_wins as f32 / self.total_episodes as f32
    }
}

impl Default for TrainingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winner: Option<Stone>, game_length: usize) -> EpisodeResult {
        EpisodeResult {
            winner,
            learner: Stone::White,
            game_length,
            mean_td_error: 0.0,
        }
    }

    #[test]
    fn test_win_and_loss_rate() {
        let mut m = TrainingMetrics::new();
        for _ in 0..7 {
            m.record_episode(result(Some(Stone::White), 10));
        }
        for _ in 0..3 {
            m.record_episode(result(Some(Stone::Black), 10));
        }
        assert!((m.win_rate(10) - 0.7).abs() < 1e-6);
        assert!((m.loss_rate(10) - 0.3).abs() < 1e-6);
        assert!((m.loss_rate(3) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_draw_rate() {
        let mut m = TrainingMetrics::new();
        m.record_episode(result(None, 81));
        m.record_episode(result(Some(Stone::Black), 10));
        assert!((m.draw_rate(10) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_average_game_length() {
        let mut m = TrainingMetrics::new();
        m.record_episode(result(None, 20));
        m.record_episode(result(None, 30));
        assert!((m.average_game_length(10) - 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_td_error() {
        let mut m = TrainingMetrics::new();
        for td in [0.5, 1.5] {
            m.record_episode(EpisodeResult {
                mean_td_error: td,
                ..result(None, 9)
            });
        }
        assert!((m.average_td_error(10) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_window_is_capped_but_totals_are_not() {
        let mut m = TrainingMetrics::with_capacity(4);
        for _ in 0..6 {
            m.record_episode(result(Some(Stone::White), 5));
        }
        for _ in 0..2 {
            m.record_episode(result(Some(Stone::Black), 5));
        }
        assert_eq!(m.total_episodes(), 8);
        assert!((m.win_rate(100) - 0.5).abs() < 1e-6);
        assert!((m.overall_win_rate() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_empty_metrics() {
        let m = TrainingMetrics::default();
        assert_eq!(m.win_rate(10), 0.0);
        assert_eq!(m.average_game_length(10), 0.0);
        assert_eq!(m.overall_win_rate(), 0.0);
    }
}
