use antichess_core::{Difficulty, EngineConfig};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod app;
mod board_view;

use app::MatchRunner;

/// Plays an anti-chess match between two engine players on the console.
#[derive(Debug, Parser)]
#[command(name = "antichess", version)]
struct Args {
    /// Difficulty of the White player (easy, medium or hard).
    #[arg(long, default_value = "medium")]
    white: Difficulty,

    /// Difficulty of the Black player (easy, medium or hard).
    #[arg(long, default_value = "easy")]
    black: Difficulty,

    /// Seed for the random choices of the easy tier. Picked at random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many plies even if nobody has won.
    #[arg(long, default_value_t = 400)]
    max_plies: usize,

    /// JSON engine configuration. Weights are scale factors over the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the board after every move.
    #[arg(long)]
    show_board: bool,

    /// Print the final summary as JSON.
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    EngineConfig::load_from_json(&text)
        .with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(white = %args.white, black = %args.black, seed, "starting match");

    let mut runner = MatchRunner::new(args.white, args.black, config, seed)?;
    let show_board = args.show_board;
    let summary = runner.run(args.max_plies, |game, record| {
        let marker = if record.captured.is_some() { "x" } else { "-" };
        println!(
            "{:>3}. {} {}{}{}",
            game.history().len(),
            record.color(),
            record.from,
            marker,
            record.to
        );
        if show_board {
            println!("{}", board_view::render(game.board()));
        }
    })?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", board_view::render(runner.game().board()));
        match (summary.winner, summary.stalled) {
            (Some(winner), _) => println!("{winner} wins after {} plies", summary.plies),
            (None, Some(color)) => println!("{color} has no legal move; game left open"),
            (None, None) if runner.game().over() => println!("draw after {} plies", summary.plies),
            (None, None) => println!("stopped after {} plies", summary.plies),
        }
        println!(
            "captures: white {} black {}, {} nodes searched",
            summary.scores.white, summary.scores.black, summary.nodes_searched
        );
    }

    Ok(())
}
