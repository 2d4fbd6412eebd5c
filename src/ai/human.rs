use std::io::{self, BufRead, StdinLock, Stdout, Write};

use super::player::Player;
use crate::error::{NoLegalMove, PlayerError};
use crate::game::{Board, Point, Stone};

/// Human player reading `x y` coordinates from a line-based input.
///
/// The board is printed before the first prompt of every turn, and the
/// player is asked again until the entered coordinate is legal.
pub struct HumanPlayer<R, W> {
    name: String,
    color: Stone,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        HumanPlayer {
            name: name.into(),
            color: Stone::Black,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl HumanPlayer<StdinLock<'static>, Stdout> {
    /// Human player on the process terminal
    pub fn stdio(name: impl Into<String>) -> Self {
        HumanPlayer::new(name, io::stdin().lock(), io::stdout())
    }
}

fn parse_coordinates(line: &str) -> Option<(i64, i64)> {
    let mut parts = line.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((x, y))
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn color(&self) -> Stone {
        self.color
    }

    fn set_color(&mut self, color: Stone) {
        self.color = color;
    }

    fn decide_move(&mut self, board: &Board) -> Result<Point, PlayerError> {
        if board.legal_moves().is_empty() {
            return Err(NoLegalMove.into());
        }

        write!(self.output, "{board}")?;
        loop {
            write!(self.output, "{} ({}) to move, enter `x y`: ", self.name, self.color)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PlayerError::InputClosed);
            }

            let Some((x, y)) = parse_coordinates(&line) else {
                writeln!(self.output, "expected two integers separated by a space")?;
                continue;
            };
            if !board.can_put(x, y) {
                writeln!(self.output, "({x}, {y}) is not a legal move")?;
                continue;
            }

            // can_put guarantees both coordinates are in range
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                return Ok(Point::new(x, y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn player(input: &str) -> HumanPlayer<Cursor<Vec<u8>>, Vec<u8>> {
        HumanPlayer::new("Alice", Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("3 4\n"), Some((3, 4)));
        assert_eq!(parse_coordinates("  -1   2 "), Some((-1, 2)));
        assert_eq!(parse_coordinates("3"), None);
        assert_eq!(parse_coordinates("a b"), None);
        assert_eq!(parse_coordinates("1 2 3"), None);
    }

    #[test]
    fn test_human_accepts_legal_input() {
        let mut human = player("2 1\n");
        let board = Board::new(5);
        assert_eq!(human.decide_move(&board).unwrap(), Point::new(2, 1));
    }

    #[test]
    fn test_human_reprompts_until_legal() {
        let mut human = player("oops\n9 9\n0 0\n-1 0\n1 0\n");
        let mut board = Board::new(5);
        board.put(0, 0, Stone::White).unwrap();

        assert_eq!(human.decide_move(&board).unwrap(), Point::new(1, 0));

        let transcript = String::from_utf8(human.into_output()).unwrap();
        assert_eq!(transcript.matches("to move").count(), 5);
        assert!(transcript.contains("expected two integers"));
        assert!(transcript.contains("(9, 9) is not a legal move"));
        assert!(transcript.contains("(0, 0) is not a legal move"));
        assert!(transcript.contains("(-1, 0) is not a legal move"));
    }

    #[test]
    fn test_human_input_closed() {
        let mut human = player("7 7\n");
        let board = Board::new(5);
        assert!(matches!(
            human.decide_move(&board),
            Err(PlayerError::InputClosed)
        ));
    }

    #[test]
    fn test_human_full_board() {
        let mut human = player("");
        let mut board = Board::new(1);
        board.put(0, 0, Stone::Black).unwrap();
        assert!(matches!(
            human.decide_move(&board),
            Err(PlayerError::NoLegalMove(_))
        ));
    }
}
