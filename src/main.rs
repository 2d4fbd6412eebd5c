use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gomoku_rl::ai::{HumanPlayer, RandomPlayer};
use gomoku_rl::game::{Game, GameOutcome};

/// Play Gomoku against a random opponent on the terminal.
#[derive(Parser)]
#[command(name = "gomoku_rl", about = "Play Gomoku against a random opponent")]
struct Cli {
    /// Board side length
    #[arg(long, default_value_t = 19)]
    scale: usize,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Let the opponent move first
    #[arg(long)]
    second: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.scale > 0, "--scale must be at least 1");

    let opponent = match cli.seed {
        Some(seed) => RandomPlayer::with_seed(seed),
        None => RandomPlayer::new(),
    };
    let mut game = Game::new(
        Box::new(HumanPlayer::stdio("You")),
        Box::new(opponent),
        cli.scale,
    );
    if cli.second {
        game.change();
    }

    let outcome = game.play().context("match aborted")?;
    println!("{}", game.board());
    match outcome {
        GameOutcome::Winner(stone) if stone == game.player(0).color() => println!("You win!"),
        GameOutcome::Winner(stone) => println!("{stone} wins."),
        GameOutcome::Draw => println!("Draw."),
    }
    Ok(())
}
