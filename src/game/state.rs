use tracing::{debug, info};

use super::{Board, Judgement, Stone};
use crate::ai::Player;
use crate::error::{GameError, PlayerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Stone),
    Draw,
}

impl From<GameOutcome> for Judgement {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Winner(stone) => Judgement::Win(stone),
            GameOutcome::Draw => Judgement::Draw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    InProgress,
    Finished(GameOutcome),
}

/// Turn-based match between two players sharing one board.
///
/// Players keep the slot they were constructed in (`0` or `1`); `change`
/// only swaps which slot moves first. The acting slot is derived from the
/// seat order and the stone count on every ply.
pub struct Game {
    players: [Box<dyn Player>; 2],
    first: usize,
    board: Board,
    phase: GamePhase,
}

impl Game {
    /// Create a match where `first` plays Black and moves first.
    pub fn new(first: Box<dyn Player>, second: Box<dyn Player>, scale: usize) -> Self {
        let mut game = Game {
            players: [first, second],
            first: 0,
            board: Board::new(scale),
            phase: GamePhase::InProgress,
        };
        game.assign_colors();
        game
    }

    fn assign_colors(&mut self) {
        let first = self.first;
        self.players[first].set_color(Stone::Black);
        self.players[1 - first].set_color(Stone::White);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            GamePhase::InProgress => None,
            GamePhase::Finished(outcome) => Some(outcome),
        }
    }

    /// Player in construction slot `slot` (0 or 1)
    pub fn player(&self, slot: usize) -> &dyn Player {
        self.players[slot].as_ref()
    }

    /// Construction slot of the player that currently moves first
    pub fn first_slot(&self) -> usize {
        self.first
    }

    /// Construction slot of the player whose turn it is
    pub fn active_slot(&self) -> usize {
        if self.board.stone_count() % 2 == 0 {
            self.first
        } else {
            1 - self.first
        }
    }

    /// Play plies until the match is decided.
    pub fn play(&mut self) -> Result<GameOutcome, GameError> {
        info!(
            first = self.players[self.first].name(),
            second = self.players[1 - self.first].name(),
            scale = self.board.scale(),
            "match started"
        );
        loop {
            if let GamePhase::Finished(outcome) = self.phase {
                info!(?outcome, plies = self.board.stone_count(), "match finished");
                return Ok(outcome);
            }
            self.step()?;
        }
    }

    /// Let the active player move once and judge the result.
    pub fn step(&mut self) -> Result<Judgement, GameError> {
        if let GamePhase::Finished(outcome) = self.phase {
            return Ok(outcome.into());
        }

        let slot = self.active_slot();
        let player = &mut self.players[slot];
        let stone = player.color();
        let point = match player.decide_move(&self.board) {
            Ok(point) => point,
            Err(PlayerError::NoLegalMove(_)) => {
                self.phase = GamePhase::Finished(GameOutcome::Draw);
                return Ok(Judgement::Draw);
            }
            Err(source) => {
                return Err(GameError::Player {
                    player: player.name().to_string(),
                    source,
                })
            }
        };

        self.board
            .put_point(point, stone)
            .map_err(|source| GameError::IllegalMove {
                player: player.name().to_string(),
                source,
            })?;
        debug!(
            ply = self.board.stone_count(),
            player = player.name(),
            %stone,
            x = point.x,
            y = point.y,
            "stone placed"
        );
        debug!("\n{}", self.board);

        let judgement = self.board.judge();
        match judgement {
            Judgement::Win(winner) => {
                self.phase = GamePhase::Finished(GameOutcome::Winner(winner));
            }
            Judgement::Draw => self.phase = GamePhase::Finished(GameOutcome::Draw),
            Judgement::Continue => {}
        }
        Ok(judgement)
    }

    /// Reset both players and the board for a new match with the same seats.
    pub fn reset(&mut self) {
        self.board.reset();
        for player in &mut self.players {
            player.reset();
        }
        self.phase = GamePhase::InProgress;
    }

    /// Swap move order (and colors) between the two players.
    ///
    /// Intended between matches; strategy state is left untouched.
    pub fn change(&mut self) {
        self.first = 1 - self.first;
        self.assign_colors();
        debug!(first = self.players[self.first].name(), "move order swapped");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::ai::{PolicyPlayer, RandomPlayer};
    use crate::error::NoLegalMove;
    use crate::game::{Cell, Point};

    /// Plays a fixed script and logs its name on every call.
    struct ScriptedPlayer {
        name: &'static str,
        color: Stone,
        script: Vec<Point>,
        cursor: usize,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ScriptedPlayer {
        fn boxed(
            name: &'static str,
            script: &[(usize, usize)],
            log: &Rc<RefCell<Vec<&'static str>>>,
        ) -> Box<dyn Player> {
            Box::new(ScriptedPlayer {
                name,
                color: Stone::Black,
                script: script.iter().map(|&(x, y)| Point::new(x, y)).collect(),
                cursor: 0,
                log: Rc::clone(log),
            })
        }
    }

    impl Player for ScriptedPlayer {
        fn name(&self) -> &str {
            self.name
        }

        fn color(&self) -> Stone {
            self.color
        }

        fn set_color(&mut self, color: Stone) {
            self.color = color;
        }

        fn reset(&mut self) {
            self.cursor = 0;
        }

        fn decide_move(&mut self, _board: &Board) -> Result<Point, PlayerError> {
            self.log.borrow_mut().push(self.name);
            // An exhausted script behaves like a player facing a full board.
            let Some(&point) = self.script.get(self.cursor) else {
                return Err(NoLegalMove.into());
            };
            self.cursor += 1;
            Ok(point)
        }
    }

    fn log() -> Rc<RefCell<Vec<&'static str>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    #[test]
    fn test_construction_assigns_colors() {
        let log = log();
        let game = Game::new(
            ScriptedPlayer::boxed("a", &[], &log),
            ScriptedPlayer::boxed("b", &[], &log),
            9,
        );
        assert_eq!(game.player(0).color(), Stone::Black);
        assert_eq!(game.player(1).color(), Stone::White);
        assert_eq!(game.active_slot(), 0);
        assert_eq!(game.phase(), GamePhase::InProgress);
    }

    #[test]
    fn test_play_alternates_and_detects_win() {
        let log = log();
        let mut game = Game::new(
            ScriptedPlayer::boxed("a", &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)], &log),
            ScriptedPlayer::boxed("b", &[(0, 1), (1, 1), (2, 1), (3, 1)], &log),
            9,
        );

        let outcome = game.play().unwrap();
        assert_eq!(outcome, GameOutcome::Winner(Stone::Black));
        assert_eq!(
            *log.borrow(),
            vec!["a", "b", "a", "b", "a", "b", "a", "b", "a"]
        );
        assert_eq!(game.board().stone_count(), 9);
        assert_eq!(game.phase(), GamePhase::Finished(outcome));
    }

    #[test]
    fn test_play_fills_small_board_to_draw() {
        let log = log();
        let mut game = Game::new(
            ScriptedPlayer::boxed("a", &[(0, 0), (2, 0), (1, 1), (0, 2), (2, 2)], &log),
            ScriptedPlayer::boxed("b", &[(1, 0), (0, 1), (2, 1), (1, 2)], &log),
            3,
        );
        assert_eq!(game.play().unwrap(), GameOutcome::Draw);
        assert!(game.board().is_full());
    }

    #[test]
    fn test_no_legal_move_resolves_as_draw() {
        let log = log();
        let mut game = Game::new(
            ScriptedPlayer::boxed("a", &[(0, 0)], &log),
            ScriptedPlayer::boxed("b", &[], &log),
            9,
        );
        assert_eq!(game.step().unwrap(), Judgement::Continue);
        assert_eq!(game.step().unwrap(), Judgement::Draw);
        assert_eq!(game.outcome(), Some(GameOutcome::Draw));
        assert_eq!(game.board().stone_count(), 1);
        // Stepping a finished match does not ask anyone to move.
        assert_eq!(game.step().unwrap(), Judgement::Draw);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_single_cell_board_draws_on_first_stone() {
        let log = log();
        let mut game = Game::new(
            ScriptedPlayer::boxed("a", &[(0, 0)], &log),
            ScriptedPlayer::boxed("b", &[], &log),
            1,
        );
        assert_eq!(game.play().unwrap(), GameOutcome::Draw);
        assert_eq!(*log.borrow(), vec!["a"]);
    }

    #[test]
    fn test_illegal_move_is_a_defect() {
        let log = log();
        let mut game = Game::new(
            ScriptedPlayer::boxed("a", &[(0, 0), (1, 1)], &log),
            ScriptedPlayer::boxed("b", &[(0, 0)], &log),
            9,
        );
        let err = game.play().unwrap_err();
        assert!(matches!(err, GameError::IllegalMove { ref player, .. } if player == "b"));
        assert_eq!(game.board().stone_count(), 1);
    }

    #[test]
    fn test_change_swaps_move_order() {
        let log = log();
        let mut game = Game::new(
            ScriptedPlayer::boxed("a", &[(0, 0), (1, 0)], &log),
            ScriptedPlayer::boxed("b", &[(0, 5), (1, 5)], &log),
            9,
        );
        game.change();
        assert_eq!(game.first_slot(), 1);
        assert_eq!(game.player(0).color(), Stone::White);
        assert_eq!(game.player(1).color(), Stone::Black);

        game.step().unwrap();
        game.step().unwrap();
        assert_eq!(*log.borrow(), vec!["b", "a"]);
        let history = game.board().history();
        assert_eq!((history[0].x, history[0].y, history[0].stone), (0, 5, Stone::Black));
        assert_eq!((history[1].x, history[1].y, history[1].stone), (0, 0, Stone::White));
    }

    #[test]
    fn test_change_preserves_strategy_state() {
        // The policy always wants the lowest index, so every move after its
        // first one is a miss.
        let lowest =
            |state: &[Cell]| (0..state.len()).map(|i| -(i as f32)).collect::<Vec<f32>>();
        let log = log();
        let mut game = Game::new(
            Box::new(PolicyPlayer::with_seed(lowest, 3)),
            ScriptedPlayer::boxed("b", &[(8, 8)], &log),
            9,
        );
        for _ in 0..3 {
            game.step().unwrap();
        }
        assert_eq!(game.player(0).miss_count(), 1);

        game.change();
        assert_eq!(game.player(0).name(), "Policy");
        assert_eq!(game.player(0).color(), Stone::White);
        assert_eq!(game.player(0).miss_count(), 1);

        // Three stones are down, so the new second seat is on move. The
        // policy keeps its estimator and its running miss count.
        assert_eq!(game.active_slot(), 0);
        game.step().unwrap();
        assert_eq!(game.player(0).miss_count(), 2);
        let last = game.board().last_move().unwrap();
        assert_eq!((last.x, last.y, last.stone), (2, 0, Stone::White));
    }

    #[test]
    fn test_reset_restarts_match() {
        let mut game = Game::new(
            Box::new(RandomPlayer::with_seed(1)),
            Box::new(RandomPlayer::with_seed(2)),
            5,
        );
        game.play().unwrap();
        game.reset();
        assert_eq!(game.phase(), GamePhase::InProgress);
        assert_eq!(game.board().stone_count(), 0);
        assert_eq!(game.active_slot(), game.first_slot());
    }

    #[test]
    fn test_random_match_always_terminates() {
        let mut game = Game::new(
            Box::new(RandomPlayer::with_seed(7)),
            Box::new(RandomPlayer::with_seed(8)),
            9,
        );
        for _ in 0..20 {
            let outcome = game.play().unwrap();
            match outcome {
                GameOutcome::Winner(stone) => {
                    assert_eq!(game.board().judge(), Judgement::Win(stone));
                    assert_eq!(game.board().last_move().unwrap().stone, stone);
                }
                GameOutcome::Draw => assert!(game.board().is_full()),
            }
            game.reset();
            game.change();
        }
    }
}
