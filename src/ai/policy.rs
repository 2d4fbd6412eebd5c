use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use super::estimator::Estimator;
use super::masking::{argmax, masked_argmax};
use super::player::Player;
use super::random::sample_legal;
use crate::error::{NoLegalMove, PlayerError};
use crate::game::{Board, Point, Stone};

/// Player that follows an estimator's scores with masked argmax.
///
/// The estimator's own proposal is the unmasked argmax. When it lands on an
/// occupied cell, or the score vector is unusable, the miss counter goes up
/// once and the masked argmax is played instead; if masking leaves nothing
/// to choose from, a uniformly random legal cell is played.
pub struct PolicyPlayer<E> {
    estimator: E,
    color: Stone,
    misses: usize,
    rng: StdRng,
}

impl<E: Estimator> PolicyPlayer<E> {
    pub fn new(estimator: E) -> Self {
        PolicyPlayer {
            estimator,
            color: Stone::Black,
            misses: 0,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seed the RNG used for the random fallback
    pub fn with_seed(estimator: E, seed: u64) -> Self {
        PolicyPlayer {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(estimator)
        }
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }
}

impl<E: Estimator> Player for PolicyPlayer<E> {
    fn name(&self) -> &str {
        "Policy"
    }

    fn color(&self) -> Stone {
        self.color
    }

    fn set_color(&mut self, color: Stone) {
        self.color = color;
    }

    fn reset(&mut self) {
        self.misses = 0;
    }

    fn decide_move(&mut self, board: &Board) -> Result<Point, PlayerError> {
        if board.legal_moves().is_empty() {
            return Err(NoLegalMove.into());
        }

        let scores = self.estimator.evaluate(board.cells());
        let proposal = argmax(&scores)
            .filter(|_| scores.len() == board.size())
            .and_then(|index| board.index_to_point(index));
        if let Some(point) = proposal.filter(|&point| board.can_put_point(point)) {
            return Ok(point);
        }

        self.misses += 1;
        warn!(
            proposal = ?proposal,
            scores = scores.len(),
            misses = self.misses,
            "estimator proposed an illegal move"
        );

        let masked =
            masked_argmax(&scores, board.cells()).and_then(|index| board.index_to_point(index));
        match masked {
            Some(point) => Ok(point),
            None => Ok(sample_legal(&mut self.rng, board)?),
        }
    }

    fn miss_count(&self) -> usize {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn favor(index: usize) -> impl Fn(&[Cell]) -> Vec<f32> {
        move |state: &[Cell]| {
            let mut scores: Vec<f32> = (0..state.len()).map(|i| i as f32 * 0.01).collect();
            scores[index] = 10.0;
            scores
        }
    }

    #[test]
    fn test_policy_plays_estimator_choice() {
        let mut player = PolicyPlayer::with_seed(favor(40), 1);
        let board = Board::new(9);
        assert_eq!(player.decide_move(&board).unwrap(), Point::new(4, 4));
        assert_eq!(player.miss_count(), 0);
    }

    #[test]
    fn test_policy_masks_occupied_favorite() {
        let mut player = PolicyPlayer::with_seed(favor(40), 1);
        let mut board = Board::new(9);
        board.put(4, 4, Stone::White).unwrap();

        // Next best score is the highest index, cell 80.
        assert_eq!(player.decide_move(&board).unwrap(), Point::new(8, 8));
        assert_eq!(player.miss_count(), 1);

        board.put(8, 8, Stone::Black).unwrap();
        assert_eq!(player.decide_move(&board).unwrap(), Point::new(7, 8));
        assert_eq!(player.miss_count(), 2);

        player.reset();
        assert_eq!(player.miss_count(), 0);
    }

    #[test]
    fn test_policy_falls_back_on_unusable_scores() {
        let short = |_: &[Cell]| vec![1.0f32; 3];
        let mut player = PolicyPlayer::with_seed(short, 5);
        let mut board = Board::new(3);
        board.put(1, 1, Stone::Black).unwrap();

        for round in 1..=20 {
            let point = player.decide_move(&board).unwrap();
            assert!(board.can_put_point(point));
            assert_eq!(player.miss_count(), round);
        }
    }

    #[test]
    fn test_policy_falls_back_on_nan_scores() {
        let nan = |state: &[Cell]| vec![f32::NAN; state.len()];
        let mut player = PolicyPlayer::with_seed(nan, 8);
        let board = Board::new(4);
        let point = player.decide_move(&board).unwrap();
        assert!(board.can_put_point(point));
        assert_eq!(player.miss_count(), 1);
    }

    #[test]
    fn test_policy_full_board() {
        let mut player = PolicyPlayer::new(favor(0));
        let mut board = Board::new(1);
        board.put(0, 0, Stone::Black).unwrap();
        assert!(matches!(
            player.decide_move(&board),
            Err(PlayerError::NoLegalMove(_))
        ));
        assert_eq!(player.miss_count(), 0);
    }
}
