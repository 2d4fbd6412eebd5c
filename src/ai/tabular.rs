use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::{debug, trace};

use super::estimator::Estimator;
use super::masking::masked_argmax;
use super::state_encoding::StateKey;
use crate::error::EnvError;
use crate::game::{legal_indices, Cell, GameOutcome};
use crate::training::environment::Environment;
use crate::training::metrics::EpisodeResult;

/// Tabular Q-learning hyperparameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    pub alpha: f32,
    pub gamma: f32,
    pub epsilon: f32,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        LearnerConfig {
            alpha: 0.1,
            gamma: 0.99,
            epsilon: 0.1,
            seed: None,
        }
    }
}

/// Per-state action values, one entry per board cell.
///
/// Entries are created on first visit with independent uniform [0, 1)
/// values and are never evicted.
#[derive(Debug, Clone)]
pub struct QTable {
    actions: usize,
    entries: HashMap<StateKey, Vec<f32>>,
}

impl QTable {
    pub fn new(actions: usize) -> Self {
        QTable {
            actions,
            entries: HashMap::new(),
        }
    }

    /// Number of visited states
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn actions(&self) -> usize {
        self.actions
    }

    pub fn get(&self, state: &[Cell]) -> Option<&[f32]> {
        self.entries
            .get(&StateKey::encode(state))
            .map(Vec::as_slice)
    }

    /// Values for `key`, initializing them randomly on first visit.
    fn entry<R: Rng>(&mut self, key: StateKey, rng: &mut R) -> &mut Vec<f32> {
        let actions = self.actions;
        self.entries
            .entry(key)
            .or_insert_with(|| (0..actions).map(|_| rng.random::<f32>()).collect())
    }
}

/// Greedy read of a learned table. Unseen states score zero everywhere.
impl Estimator for QTable {
    fn evaluate(&self, state: &[Cell]) -> Vec<f32> {
        self.get(state)
            .map(<[f32]>::to_vec)
            .unwrap_or_else(|| vec![0.0; state.len()])
    }
}

/// Epsilon-greedy tabular Q-learner with legality masking.
pub struct TabularLearner {
    config: LearnerConfig,
    table: QTable,
    rng: StdRng,
    updates: usize,
}

impl TabularLearner {
    pub fn new(config: LearnerConfig, actions: usize) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        TabularLearner {
            config,
            table: QTable::new(actions),
            rng,
            updates: 0,
        }
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn into_table(self) -> QTable {
        self.table
    }

    pub fn epsilon(&self) -> f32 {
        self.config.epsilon
    }

    /// Set epsilon directly (e.g. 0.0 for pure greedy play).
    pub fn set_epsilon(&mut self, epsilon: f32) {
        self.config.epsilon = epsilon;
    }

    /// Number of TD updates applied so far
    pub fn update_count(&self) -> usize {
        self.updates
    }

    /// Select an action for `state`, or `None` if every cell is occupied.
    ///
    /// With probability epsilon a legal cell is drawn uniformly; otherwise
    /// the masked argmax of the state's values is taken.
    pub fn select_action(&mut self, state: &[Cell]) -> Option<usize> {
        if self.rng.random_range(0.0..1.0) < self.config.epsilon {
            let legal = legal_indices(state);
            if legal.is_empty() {
                return None;
            }
            return Some(legal[self.rng.random_range(0..legal.len())]);
        }

        let values = self.table.entry(StateKey::encode(state), &mut self.rng);
        masked_argmax(values, state)
    }

    /// One-step Q-learning update. Returns the TD error before scaling.
    ///
    /// Both states must have one cell per action and `action` must be an
    /// index into them.
    pub fn update(
        &mut self,
        state: &[Cell],
        action: usize,
        reward: f32,
        next_state: &[Cell],
        done: bool,
    ) -> Result<f32, EnvError> {
        let expected = self.table.actions();
        for found in [state.len(), next_state.len()] {
            if found != expected {
                return Err(EnvError::ActionSpace { expected, found });
            }
        }
        if action >= expected {
            return Err(EnvError::IllegalAction { action });
        }

        let next_max = if done {
            0.0
        } else {
            self.table
                .entry(StateKey::encode(next_state), &mut self.rng)
                .iter()
                .copied()
                .fold(f32::NEG_INFINITY, f32::max)
        };

        let alpha = self.config.alpha;
        let target = reward + self.config.gamma * next_max;
        let values = self.table.entry(StateKey::encode(state), &mut self.rng);
        let td_error = target - values[action];
        values[action] += alpha * td_error;
        self.updates += 1;

        trace!(action, reward, done, td_error, "q update");
        Ok(td_error)
    }

    /// Play one episode against `env`, updating after every transition.
    pub fn learn_episode<E: Environment>(
        &mut self,
        env: &mut E,
    ) -> Result<EpisodeResult, EnvError> {
        let expected = self.table.actions();
        let found = env.action_count();
        if found != expected {
            return Err(EnvError::ActionSpace { expected, found });
        }

        let learner = env.learner_stone();
        let mut state = env.reset()?;
        let mut td_total = 0.0;
        let mut steps = 0;

        loop {
            let Some(action) = self.select_action(&state) else {
                // The opponent filled the board before the learner could move.
                return Ok(EpisodeResult {
                    winner: None,
                    learner,
                    game_length: stone_count(&state),
                    mean_td_error: 0.0,
                });
            };

            let step = env.step(action)?;
            td_total += self
                .update(&state, action, step.reward, &step.state, step.done)?
                .abs();
            steps += 1;

            if step.done {
                let winner = match step.info.outcome {
                    Some(GameOutcome::Winner(stone)) => Some(stone),
                    _ => None,
                };
                debug!(
                    ?winner,
                    reward = step.reward,
                    states = self.table.len(),
                    "episode finished"
                );
                return Ok(EpisodeResult {
                    winner,
                    learner,
                    game_length: stone_count(&step.state),
                    mean_td_error: td_total / steps as f32,
                });
            }
            state = step.state;
        }
    }

    /// Run `rounds` episodes against `env`.
    pub fn learn<E: Environment>(
        &mut self,
        env: &mut E,
        rounds: usize,
    ) -> Result<Vec<EpisodeResult>, EnvError> {
        (0..rounds).map(|_| self.learn_episode(env)).collect()
    }
}

fn stone_count(state: &[Cell]) -> usize {
    state.iter().filter(|cell| !cell.is_empty()).count()
}
