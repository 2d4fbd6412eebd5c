use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::player::Player;
use crate::error::{NoLegalMove, PlayerError};
use crate::game::{Board, Point, Stone};

/// A player that selects uniformly at random from legal cells.
pub struct RandomPlayer {
    color: Stone,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        RandomPlayer {
            color: Stone::Black,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomPlayer {
            color: Stone::Black,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick a uniformly random empty cell.
pub(crate) fn sample_legal<R: Rng>(rng: &mut R, board: &Board) -> Result<Point, NoLegalMove> {
    let legal = board.legal_moves();
    if legal.is_empty() {
        return Err(NoLegalMove);
    }
    let index = legal[rng.random_range(0..legal.len())];
    board.index_to_point(index).ok_or(NoLegalMove)
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn color(&self) -> Stone {
        self.color
    }

    fn set_color(&mut self, color: Stone) {
        self.color = color;
    }

    fn decide_move(&mut self, board: &Board) -> Result<Point, PlayerError> {
        Ok(sample_legal(&mut self.rng, board)?)
    }
}
