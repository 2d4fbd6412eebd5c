use std::path::PathBuf;

use tracing::info;

use crate::ai::{LinearEstimator, Player, PolicyPlayer, RandomPlayer, TabularLearner};
use crate::error::{PersistenceError, TrainingError};
use crate::game::{Game, Stone};
use crate::training::environment::GomokuEnv;
use crate::training::episode::{derive_seed, simulate, SimulationReport};
use crate::training::metrics::TrainingMetrics;

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Board side length.
    pub scale: usize,
    /// Learning episodes against the opponent.
    pub rounds: usize,
    /// Greedy evaluation matches after learning; 0 skips evaluation.
    pub eval_games: usize,
    /// Alternate the learner between Black and White.
    pub swap_order: bool,
    pub log_interval: usize,
    /// JSON weights for a [`LinearEstimator`] opponent. Unset means a
    /// [`RandomPlayer`] opponent.
    pub opponent_weights: Option<PathBuf>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            scale: 9,
            rounds: 10_000,
            eval_games: 100,
            swap_order: true,
            log_interval: 1000,
            opponent_weights: None,
        }
    }
}

/// Summary of a finished training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub episodes: usize,
    pub overall_win_rate: f32,
    /// Win rate over the last `log_interval` episodes.
    pub recent_win_rate: f32,
    pub states: usize,
    pub updates: usize,
    pub evaluation: SimulationReport,
}

const TRAIN_OPPONENT_STREAM: usize = 0;
const EVAL_OPPONENT_STREAM: usize = 1;
const EVAL_POLICY_STREAM: usize = 2;

/// Learns a table against a fixed opponent and then evaluates it greedily.
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Trainer { config }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Run the full training loop followed by evaluation.
    pub fn train(&self, learner: &mut TabularLearner) -> Result<TrainingReport, TrainingError> {
        let scale = self.config.scale;
        let expected = scale * scale;
        if learner.table().actions() != expected {
            return Err(TrainingError::ActionSpace {
                scale,
                expected,
                found: learner.table().actions(),
            });
        }

        let seed = learner.config().seed;
        let window = self.config.log_interval.max(1);
        let mut metrics = TrainingMetrics::with_capacity(window);
        let weights = self.load_opponent_weights()?;
        let mut env = GomokuEnv::new(
            scale,
            opponent(weights.as_ref(), seed, TRAIN_OPPONENT_STREAM),
            Stone::Black,
        );

        info!(
            scale,
            rounds = self.config.rounds,
            alpha = learner.config().alpha,
            gamma = learner.config().gamma,
            epsilon = learner.epsilon(),
            opponent = env.opponent().name(),
            "training started"
        );

        for round in 1..=self.config.rounds {
            if self.config.swap_order {
                let stone = if round % 2 == 1 {
                    Stone::Black
                } else {
                    Stone::White
                };
                env.set_learner_stone(stone);
            }
            let result = learner.learn_episode(&mut env)?;
            metrics.record_episode(result);

            if round % window == 0 {
                info!(
                    round,
                    win_rate = metrics.win_rate(window),
                    loss_rate = metrics.loss_rate(window),
                    draw_rate = metrics.draw_rate(window),
                    avg_len = metrics.average_game_length(window),
                    td_error = metrics.average_td_error(window),
                    states = learner.table().len(),
                    "training progress"
                );
            }
        }

        let evaluation = self.evaluate_against(learner, weights.as_ref())?;
        let report = TrainingReport {
            episodes: metrics.total_episodes(),
            overall_win_rate: metrics.overall_win_rate(),
            recent_win_rate: metrics.win_rate(window),
            states: learner.table().len(),
            updates: learner.update_count(),
            evaluation,
        };
        info!(
            episodes = report.episodes,
            states = report.states,
            eval_win_rate = report.evaluation.win_rate(),
            "training complete"
        );
        Ok(report)
    }

    /// Play the learned table greedily against a fresh copy of the opponent.
    pub fn evaluate(&self, learner: &TabularLearner) -> Result<SimulationReport, TrainingError> {
        let weights = self.load_opponent_weights()?;
        self.evaluate_against(learner, weights.as_ref())
    }

    fn evaluate_against(
        &self,
        learner: &TabularLearner,
        weights: Option<&LinearEstimator>,
    ) -> Result<SimulationReport, TrainingError> {
        if self.config.eval_games == 0 {
            return Ok(SimulationReport::default());
        }

        let seed = learner.config().seed;
        let table = learner.table().clone();
        let policy = match seed {
            Some(seed) => PolicyPlayer::with_seed(table, derive_seed(seed, EVAL_POLICY_STREAM)),
            None => PolicyPlayer::new(table),
        };
        let mut game = Game::new(
            Box::new(policy),
            opponent(weights, seed, EVAL_OPPONENT_STREAM),
            self.config.scale,
        );
        info!(
            games = self.config.eval_games,
            opponent = game.player(1).name(),
            "evaluating"
        );
        Ok(simulate(
            &mut game,
            0,
            self.config.eval_games,
            self.config.swap_order,
        )?)
    }

    /// Read the configured opponent weights, checking they fit the board.
    fn load_opponent_weights(&self) -> Result<Option<LinearEstimator>, TrainingError> {
        let Some(path) = &self.config.opponent_weights else {
            return Ok(None);
        };
        let estimator = LinearEstimator::load(path)?;
        if estimator.scale() != self.config.scale {
            return Err(PersistenceError::Shape {
                scale: self.config.scale,
                reason: format!(
                    "{} holds weights for a {}x{} board",
                    path.display(),
                    estimator.scale(),
                    estimator.scale()
                ),
            }
            .into());
        }
        info!(path = %path.display(), "loaded opponent weights");
        Ok(Some(estimator))
    }
}

fn opponent(
    weights: Option<&LinearEstimator>,
    seed: Option<u64>,
    stream: usize,
) -> Box<dyn Player> {
    match (weights, seed) {
        (Some(weights), Some(seed)) => Box::new(PolicyPlayer::with_seed(
            weights.clone(),
            derive_seed(seed, stream),
        )),
        (Some(weights), None) => Box::new(PolicyPlayer::new(weights.clone())),
        (None, Some(seed)) => Box::new(RandomPlayer::with_seed(derive_seed(seed, stream))),
        (None, None) => Box::new(RandomPlayer::new()),
    }
}
