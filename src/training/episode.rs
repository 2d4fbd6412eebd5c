use tracing::{debug, info};

use crate::error::GameError;
use crate::game::{Game, GameOutcome};

/// Tally of repeated matches seen from one player's point of view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationReport {
    pub games: usize,
    /// Wins while moving first
    pub first_wins: usize,
    /// Wins while moving second
    pub second_wins: usize,
    pub draws: usize,
    pub losses: usize,
    /// Estimator misses per match
    pub miss_counts: Vec<usize>,
}

impl SimulationReport {
    pub fn wins(&self) -> usize {
        self.first_wins + self.second_wins
    }

    pub fn win_rate(&self) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins() as f32 / self.games as f32
    }

    pub fn average_misses(&self) -> f32 {
        if self.miss_counts.is_empty() {
            return 0.0;
        }
        self.miss_counts.iter().sum::<usize>() as f32 / self.miss_counts.len() as f32
    }

    pub fn max_misses(&self) -> usize {
        self.miss_counts.iter().copied().max().unwrap_or(0)
    }
}

/// Play `count` matches and score them for the player in slot `subject`.
///
/// The game is reset before every match. With `change` set, move order is
/// swapped after each match so the subject alternates between first and
/// second.
pub fn simulate(
    game: &mut Game,
    subject: usize,
    count: usize,
    change: bool,
) -> Result<SimulationReport, GameError> {
    let mut report = SimulationReport::default();

    for index in 0..count {
        game.reset();
        let outcome = game.play()?;
        let player = game.player(subject);
        report.games += 1;
        report.miss_counts.push(player.miss_count());

        let moved_first = game.first_slot() == subject;
        match outcome {
            GameOutcome::Winner(stone) if stone == player.color() => {
                if moved_first {
                    report.first_wins += 1;
                } else {
                    report.second_wins += 1;
                }
            }
            GameOutcome::Winner(_) => report.losses += 1,
            GameOutcome::Draw => report.draws += 1,
        }
        debug!(
            index,
            ?outcome,
            moved_first,
            misses = player.miss_count(),
            "simulated match"
        );

        if change {
            game.change();
        }
    }

    info!(
        games = report.games,
        first_wins = report.first_wins,
        second_wins = report.second_wins,
        draws = report.draws,
        losses = report.losses,
        average_misses = report.average_misses(),
        max_misses = report.max_misses(),
        "simulation finished"
    );
    Ok(report)
}

/// Split one run seed into independent per-component seeds.
///
/// A stream is one consumer of randomness within a run, such as the
/// training opponent or the evaluated policy. Each stream replays
/// identically whenever the run seed is fixed.
pub fn derive_seed(base_seed: u64, stream: usize) -> u64 {
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = stream as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}
