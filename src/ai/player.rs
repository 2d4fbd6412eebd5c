use crate::error::PlayerError;
use crate::game::{Board, Point, Stone};

/// Universal interface for every player strategy.
///
/// The board is lent to the player for each decision, so a player never
/// holds on to a board between matches.
pub trait Player {
    /// Return the player's display name.
    fn name(&self) -> &str;

    /// Stone color assigned for the current match.
    fn color(&self) -> Stone;

    /// Assign the stone color. Called by the match on setup and on `change`.
    fn set_color(&mut self, color: Stone);

    /// Prepare for a new match.
    fn reset(&mut self) {}

    /// Choose a legal point on `board`.
    ///
    /// Returns [`NoLegalMove`](crate::error::NoLegalMove) when the board has no
    /// empty cell.
    fn decide_move(&mut self, board: &Board) -> Result<Point, PlayerError>;

    /// Illegal estimator proposals replaced since the last reset.
    fn miss_count(&self) -> usize {
        0
    }
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn color(&self) -> Stone {
        (**self).color()
    }

    fn set_color(&mut self, color: Stone) {
        (**self).set_color(color);
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn decide_move(&mut self, board: &Board) -> Result<Point, PlayerError> {
        (**self).decide_move(board)
    }

    fn miss_count(&self) -> usize {
        (**self).miss_count()
    }
}
