use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use gomoku_rl::ai::{LinearEstimator, TabularLearner};
use gomoku_rl::config::AppConfig;
use gomoku_rl::training::trainer::Trainer;

/// Train a tabular Q-learner against a random or weights-file Gomoku opponent.
#[derive(Parser)]
#[command(name = "train", about = "Train a tabular Gomoku Q-learner")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override number of learning rounds
    #[arg(long)]
    rounds: Option<usize>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override number of evaluation games
    #[arg(long)]
    eval_games: Option<usize>,

    /// Override exploration rate
    #[arg(long)]
    epsilon: Option<f32>,

    /// Train and evaluate against a policy opponent loaded from this JSON weights file
    #[arg(long)]
    opponent_weights: Option<PathBuf>,

    /// Write random opponent weights for the configured board to this path and exit
    #[arg(long)]
    export_random_weights: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rounds) = cli.rounds {
        app_config.training.rounds = rounds;
    }
    if let Some(seed) = cli.seed {
        app_config.learner.seed = Some(seed);
    }
    if let Some(eval_games) = cli.eval_games {
        app_config.training.eval_games = eval_games;
    }
    if let Some(epsilon) = cli.epsilon {
        app_config.learner.epsilon = epsilon;
    }
    if let Some(path) = cli.opponent_weights {
        app_config.training.opponent_weights = Some(path);
    }
    app_config
        .validate()
        .context("invalid configuration after CLI overrides")?;

    let scale = app_config.training.scale;
    if let Some(path) = cli.export_random_weights {
        let mut rng = match app_config.learner.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        LinearEstimator::random(scale, &mut rng)
            .save(&path)
            .with_context(|| format!("writing weights to {}", path.display()))?;
        println!("Wrote {scale}x{scale} random weights to {}", path.display());
        return Ok(());
    }

    let mut learner = TabularLearner::new(app_config.learner.clone(), scale * scale);
    let trainer = Trainer::new(app_config.training.clone());
    let report = trainer.train(&mut learner).context("training failed")?;

    let eval = &report.evaluation;
    println!("-------------------------------------------");
    println!(
        "Episodes: {} | win rate: {:.1}% (last {}: {:.1}%)",
        report.episodes,
        report.overall_win_rate * 100.0,
        trainer.config().log_interval,
        report.recent_win_rate * 100.0,
    );
    println!(
        "Visited states: {} | updates: {}",
        report.states, report.updates
    );
    if eval.games > 0 {
        let opponent = if trainer.config().opponent_weights.is_some() {
            "Policy"
        } else {
            "Random"
        };
        println!(
            "Eval vs {} ({} games): first {} | second {} | draw {} | lose {}",
            opponent, eval.games, eval.first_wins, eval.second_wins, eval.draws, eval.losses
        );
        println!(
            "Misses per game: avg {:.2} | max {}",
            eval.average_misses(),
            eval.max_misses()
        );
    }
    Ok(())
}
