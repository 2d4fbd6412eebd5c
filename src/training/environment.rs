use tracing::debug;

use crate::ai::Player;
use crate::error::{EnvError, PlayerError};
use crate::game::{Board, Cell, GameOutcome, Judgement, Stone};

/// Extra information attached to a step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// Final result once the episode is done.
    pub outcome: Option<GameOutcome>,
}

/// Result of one environment transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: Vec<Cell>,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

/// Gym-style step contract consumed by learners.
///
/// Rewards follow the learner's perspective: +1 for a win, -1 for a loss,
/// 0 for a draw or a non-terminal step.
pub trait Environment {
    /// Size of the discrete action space (one action per cell).
    fn action_count(&self) -> usize;

    /// Stone the learner plays in the current episode.
    fn learner_stone(&self) -> Stone;

    /// Start a new episode and return the first observation.
    fn reset(&mut self) -> Result<Vec<Cell>, EnvError>;

    /// Apply the learner's action, let the opponent answer, and report.
    fn step(&mut self, action: usize) -> Result<Step, EnvError>;
}

/// Gomoku against a fixed opponent player.
///
/// When the learner plays White the opponent opens the game during `reset`.
pub struct GomokuEnv<P> {
    board: Board,
    opponent: P,
    learner: Stone,
    done: bool,
}

impl<P: Player> GomokuEnv<P> {
    pub fn new(scale: usize, mut opponent: P, learner: Stone) -> Self {
        opponent.set_color(learner.other());
        GomokuEnv {
            board: Board::new(scale),
            opponent,
            learner,
            done: false,
        }
    }

    /// Change which color the learner plays from the next `reset` on.
    pub fn set_learner_stone(&mut self, learner: Stone) {
        self.learner = learner;
        self.opponent.set_color(learner.other());
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn opponent(&self) -> &P {
        &self.opponent
    }

    fn observation(&self) -> Vec<Cell> {
        self.board.cells().to_vec()
    }

    fn finish(&mut self, outcome: GameOutcome) -> Step {
        self.done = true;
        let reward = match outcome {
            GameOutcome::Winner(stone) if stone == self.learner => 1.0,
            GameOutcome::Winner(_) => -1.0,
            GameOutcome::Draw => 0.0,
        };
        debug!(?outcome, reward, plies = self.board.stone_count(), "episode done");
        Step {
            state: self.observation(),
            reward,
            done: true,
            info: StepInfo {
                outcome: Some(outcome),
            },
        }
    }

    /// Let the opponent move. `None` means it had no legal move.
    fn opponent_move(&mut self) -> Result<Option<Judgement>, EnvError> {
        let point = match self.opponent.decide_move(&self.board) {
            Ok(point) => point,
            Err(PlayerError::NoLegalMove(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        self.board.put_point(point, self.opponent.color())?;
        Ok(Some(self.board.judge()))
    }
}

impl<P: Player> Environment for GomokuEnv<P> {
    fn action_count(&self) -> usize {
        self.board.size()
    }

    fn learner_stone(&self) -> Stone {
        self.learner
    }

    fn reset(&mut self) -> Result<Vec<Cell>, EnvError> {
        self.board.reset();
        self.opponent.reset();
        self.done = false;

        if self.learner == Stone::White {
            match self.opponent_move()? {
                Some(Judgement::Continue) => {}
                // Only a 1x1 board ends on the opening stone.
                Some(_) | None => self.done = true,
            }
        }
        Ok(self.observation())
    }

    fn step(&mut self, action: usize) -> Result<Step, EnvError> {
        if self.done {
            return Err(EnvError::EpisodeFinished);
        }
        let point = self
            .board
            .index_to_point(action)
            .filter(|&point| self.board.can_put_point(point))
            .ok_or(EnvError::IllegalAction { action })?;
        self.board
            .put_point(point, self.learner)
            .map_err(|_| EnvError::IllegalAction { action })?;

        match self.board.judge() {
            Judgement::Win(stone) => return Ok(self.finish(GameOutcome::Winner(stone))),
            Judgement::Draw => return Ok(self.finish(GameOutcome::Draw)),
            Judgement::Continue => {}
        }

        match self.opponent_move()? {
            Some(Judgement::Win(stone)) => Ok(self.finish(GameOutcome::Winner(stone))),
            Some(Judgement::Draw) | None => Ok(self.finish(GameOutcome::Draw)),
            Some(Judgement::Continue) => Ok(Step {
                state: self.observation(),
                reward: 0.0,
                done: false,
                info: StepInfo::default(),
            }),
        }
    }
}
